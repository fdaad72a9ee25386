//! Relay (actuator) output trait

/// Logical actuator state, independent of the pin polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActuatorState {
    /// Relay pulled in, load powered
    Engaged,
    /// Relay released
    Disengaged,
}

impl ActuatorState {
    /// Label shown on the display
    pub const fn label(self) -> &'static str {
        match self {
            ActuatorState::Engaged => "ON",
            ActuatorState::Disengaged => "OFF",
        }
    }

    /// Whether the relay is pulled in
    pub const fn is_engaged(self) -> bool {
        matches!(self, ActuatorState::Engaged)
    }
}

/// Trait for relay output control
///
/// Implementations drive the relay through a GPIO and own the polarity.
pub trait RelayOutput {
    /// Drive the relay to `state`
    fn set_state(&mut self, state: ActuatorState);

    /// Last commanded state
    fn state(&self) -> ActuatorState;
}

impl<T: RelayOutput + ?Sized> RelayOutput for &mut T {
    fn set_state(&mut self, state: ActuatorState) {
        (**self).set_state(state);
    }

    fn state(&self) -> ActuatorState {
        (**self).state()
    }
}
