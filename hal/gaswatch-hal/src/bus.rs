//! 4-bit parallel character display bus
//!
//! The HD44780 family latches the nibble presented on D4..D7 on the falling
//! edge of E. RS selects whether the byte is a command or character data.
//! RW is assumed tied low (write only).

/// Register select line level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterSelect {
    /// RS low: instruction register
    Command,
    /// RS high: data register
    Data,
}

/// Typed operations on the display bus lines
///
/// Timing is not this trait's concern: callers insert the settle delays.
pub trait DisplayBus {
    /// Put every line in output mode and drive it low
    fn configure_outputs(&mut self);

    /// Drive the register select line
    fn set_mode(&mut self, mode: RegisterSelect);

    /// Drive D4..D7 with the low four bits of `nibble`
    fn write_nibble(&mut self, nibble: u8);

    /// Drive the enable (strobe) line
    fn set_enable(&mut self, high: bool);
}
