//! GPIO relay output
//!
//! Relay driven from a GPIO pin through a transistor or relay module. Most
//! hobby relay boards pull in when their input is low (active-low).

use gaswatch_core::traits::{ActuatorState, RelayOutput};
use gaswatch_hal::OutputPin;

/// GPIO relay output
pub struct GpioRelay<P> {
    pin: P,
    /// If true, relay engaged = pin LOW
    active_low: bool,
    state: ActuatorState,
}

impl<P: OutputPin> GpioRelay<P> {
    /// Create a relay output; the relay starts disengaged
    ///
    /// # Arguments
    /// - `pin`: The GPIO pin to control
    /// - `active_low`: If true, the relay engages when the pin is LOW
    pub fn new(pin: P, active_low: bool) -> Self {
        let mut relay = Self {
            pin,
            active_low,
            state: ActuatorState::Disengaged,
        };
        relay.set_state(ActuatorState::Disengaged);
        relay
    }

    /// Relay that engages on a high pin
    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    /// Relay that engages on a low pin
    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }

    /// Give the pin back
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> RelayOutput for GpioRelay<P> {
    fn set_state(&mut self, state: ActuatorState) {
        self.state = state;
        // Engaged drives high unless inverted
        self.pin.set_state(state.is_engaged() != self.active_low);
    }

    fn state(&self) -> ActuatorState {
        self.state
    }
}
