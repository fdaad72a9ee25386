//! Analog-to-digital conversion abstractions
//!
//! Models a single conversion unit that is triggered by software and polled
//! for completion. Chip-specific setup (clocks, resolution, sample time)
//! happens when the implementation is constructed.

/// Software-triggered, polled conversion unit
pub trait ConversionUnit {
    /// Make `channel` the only entry of the regular conversion sequence
    fn select_channel(&mut self, channel: u8);

    /// Trigger one conversion
    fn start_conversion(&mut self);

    /// End-of-conversion flag
    fn is_complete(&self) -> bool;

    /// Read the data register
    ///
    /// On most parts this read also clears the end-of-conversion flag.
    fn read_result(&mut self) -> u16;
}
