//! Character display drivers

pub mod bus;
pub mod hd44780;

pub use bus::PinBus;
pub use hd44780::{Hd44780, InitPhase};
