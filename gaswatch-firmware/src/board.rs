//! Reference board wiring
//!
//! | Signal        | Pin  |
//! |---------------|------|
//! | LCD RS        | PA1  |
//! | LCD E         | PA3  |
//! | LCD D4..D7    | PB4..PB7 |
//! | MQ-2 analog   | PA0 (ADC1 channel 0) |
//! | Relay         | PD12 |
//!
//! LCD R/W is tied to ground: the panel is write-only.

use embassy_stm32::adc::SampleTime;
use embassy_stm32::gpio::{self, Level, Output, Speed};
use embassy_stm32::{Peri, Peripherals};
use gaswatch_drivers::display::PinBus;
use gaswatch_hal_stm32f4::{Adc1, Pin};

/// 4-bit LCD bus on the board pins
pub type LcdBus = PinBus<
    Pin<'static>,
    Pin<'static>,
    Pin<'static>,
    Pin<'static>,
    Pin<'static>,
    Pin<'static>,
>;

/// Board peripherals handed to the drivers
pub struct Board {
    pub lcd_bus: LcdBus,
    pub adc: Adc1<'static>,
    pub relay: Pin<'static>,
}

impl Board {
    /// Claim the board pins
    ///
    /// `relay_idle` is the pin level that leaves the relay released, so the
    /// relay never chatters between reset and the first iteration.
    pub fn new(p: Peripherals, sample_time: SampleTime, relay_idle: Level) -> Self {
        let lcd_bus = PinBus::new(
            output(p.PA1),
            output(p.PA3),
            output(p.PB4),
            output(p.PB5),
            output(p.PB6),
            output(p.PB7),
        );

        let adc = Adc1::new(p.ADC1, p.PA0, sample_time);
        let relay = Pin::new(Output::new(p.PD12, relay_idle, Speed::Low));

        Self {
            lcd_bus,
            adc,
            relay,
        }
    }
}

/// Push-pull output starting low
fn output(pin: Peri<'static, impl gpio::Pin>) -> Pin<'static> {
    Pin::new(Output::new(pin, Level::Low, Speed::Low))
}
