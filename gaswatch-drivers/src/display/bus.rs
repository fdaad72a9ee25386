//! Display bus over six GPIO lines

use gaswatch_hal::{DisplayBus, OutputPin, RegisterSelect};

/// 4-bit display bus built from discrete output pins
///
/// RS, E and D4..D7. RW must be tied low in hardware.
pub struct PinBus<RS, EN, D4, D5, D6, D7> {
    rs: RS,
    en: EN,
    d4: D4,
    d5: D5,
    d6: D6,
    d7: D7,
}

impl<RS, EN, D4, D5, D6, D7> PinBus<RS, EN, D4, D5, D6, D7>
where
    RS: OutputPin,
    EN: OutputPin,
    D4: OutputPin,
    D5: OutputPin,
    D6: OutputPin,
    D7: OutputPin,
{
    /// Create a bus from already-configured output pins
    pub fn new(rs: RS, en: EN, d4: D4, d5: D5, d6: D6, d7: D7) -> Self {
        Self {
            rs,
            en,
            d4,
            d5,
            d6,
            d7,
        }
    }

    /// Give the pins back
    pub fn release(self) -> (RS, EN, D4, D5, D6, D7) {
        (self.rs, self.en, self.d4, self.d5, self.d6, self.d7)
    }
}

impl<RS, EN, D4, D5, D6, D7> DisplayBus for PinBus<RS, EN, D4, D5, D6, D7>
where
    RS: OutputPin,
    EN: OutputPin,
    D4: OutputPin,
    D5: OutputPin,
    D6: OutputPin,
    D7: OutputPin,
{
    fn configure_outputs(&mut self) {
        // Pins are outputs by construction; park every line low so the
        // panel sees no stray strobe
        self.rs.set_low();
        self.en.set_low();
        self.write_nibble(0);
    }

    fn set_mode(&mut self, mode: RegisterSelect) {
        self.rs.set_state(mode == RegisterSelect::Data);
    }

    fn write_nibble(&mut self, nibble: u8) {
        self.d4.set_state(nibble & 0x01 != 0);
        self.d5.set_state(nibble & 0x02 != 0);
        self.d6.set_state(nibble & 0x04 != 0);
        self.d7.set_state(nibble & 0x08 != 0);
    }

    fn set_enable(&mut self, high: bool) {
        self.en.set_state(high);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mock GPIO pin for testing
    #[derive(Default)]
    struct MockPin {
        high: bool,
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    fn bus() -> PinBus<MockPin, MockPin, MockPin, MockPin, MockPin, MockPin> {
        PinBus::new(
            MockPin::default(),
            MockPin::default(),
            MockPin::default(),
            MockPin::default(),
            MockPin::default(),
            MockPin::default(),
        )
    }

    #[test]
    fn test_nibble_bit_order() {
        let mut bus = bus();
        bus.write_nibble(0b1010);
        let (_, _, d4, d5, d6, d7) = bus.release();
        assert!(!d4.is_set_high());
        assert!(d5.is_set_high());
        assert!(!d6.is_set_high());
        assert!(d7.is_set_high());
    }

    #[test]
    fn test_high_bits_ignored() {
        let mut bus = bus();
        bus.write_nibble(0xF1);
        let (_, _, d4, d5, d6, d7) = bus.release();
        assert!(d4.is_set_high());
        assert!(!d5.is_set_high() && !d6.is_set_high() && !d7.is_set_high());
    }

    #[test]
    fn test_mode_and_enable_lines() {
        let mut bus = bus();
        bus.set_mode(RegisterSelect::Data);
        bus.set_enable(true);
        let (rs, en, ..) = bus.release();
        assert!(rs.is_set_high());
        assert!(en.is_set_high());
    }

    #[test]
    fn test_configure_parks_lines_low() {
        let mut bus = bus();
        bus.set_mode(RegisterSelect::Data);
        bus.set_enable(true);
        bus.write_nibble(0xF);
        bus.configure_outputs();
        let (rs, en, d4, d5, d6, d7) = bus.release();
        for pin in [&rs, &en, &d4, &d5, &d6, &d7] {
            assert!(pin.is_set_low());
        }
    }
}
