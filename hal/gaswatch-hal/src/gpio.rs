//! GPIO pin abstractions
//!
//! Provides the digital output trait used for the display bus lines and
//! the relay driver input.

/// Digital output pin
///
/// Implementations own the register manipulation for the specific chip.
/// Writes are infallible: on the supported targets a GPIO write cannot fail.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently driven high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently driven low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}
