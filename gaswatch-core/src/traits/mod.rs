//! Device traits
//!
//! These traits define the interface between the monitor loop and the
//! concrete drivers in `gaswatch-drivers`.

pub mod display;
pub mod relay;
pub mod sensor;

pub use display::{CharacterDisplay, DisplayError};
pub use relay::{ActuatorState, RelayOutput};
pub use sensor::{GasSensor, SensorError};
