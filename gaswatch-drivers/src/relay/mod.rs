//! Relay output implementations

pub mod gpio;

pub use gpio::GpioRelay;
