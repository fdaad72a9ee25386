//! Monitor loop
//!
//! One iteration samples the gas sensor, renders the reading and the
//! iteration counter, and switches the relay from a plain threshold
//! comparison. There is no hysteresis: every iteration sets the relay
//! unconditionally from the current reading.

pub mod render;

use gaswatch_hal::Delay;

use crate::config::MonitorConfig;
use crate::traits::{
    ActuatorState, CharacterDisplay, DisplayError, GasSensor, RelayOutput, SensorError,
};

use render::{render_number, COUNTER_POS, READING_POS, STATE_POS};

/// Relay decision for a reading
///
/// Strictly greater than: a reading equal to the threshold stays off.
pub const fn decide(reading: u16, threshold: u16) -> ActuatorState {
    if reading > threshold {
        ActuatorState::Engaged
    } else {
        ActuatorState::Disengaged
    }
}

/// Outcome of one monitor iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleReport {
    /// Iteration number (starts at 1, wraps)
    pub iteration: u32,
    /// Sensor reading or the reason there is none
    pub reading: Result<u16, SensorError>,
    /// Relay state commanded this iteration
    pub actuator: ActuatorState,
}

/// Monitor state carried across iterations
#[derive(Debug, Clone)]
pub struct Monitor {
    config: MonitorConfig,
    iteration: u32,
}

impl Monitor {
    /// Create a monitor that has not run yet
    pub const fn new(config: MonitorConfig) -> Self {
        Self {
            config,
            iteration: 0,
        }
    }

    /// Iterations completed so far
    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    /// Active configuration
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Show the boot banner, hold it, then blank the display
    pub fn splash<D, T>(&self, display: &mut D, delay: &mut T) -> Result<(), DisplayError>
    where
        D: CharacterDisplay,
        T: Delay,
    {
        display.print_at(0, 0, self.config.splash_text)?;
        delay.delay_ms(self.config.splash_ms);
        display.clear()
    }

    /// Run one iteration
    ///
    /// A failed read is shown as `ERR` and leaves the relay disengaged.
    pub fn step<D, S, R, T>(
        &mut self,
        display: &mut D,
        sensor: &mut S,
        relay: &mut R,
        delay: &mut T,
    ) -> Result<CycleReport, DisplayError>
    where
        D: CharacterDisplay,
        S: GasSensor,
        R: RelayOutput,
        T: Delay,
    {
        display.clear()?;
        self.iteration = self.iteration.wrapping_add(1);

        let reading = sensor.read_raw();

        let (row, col) = READING_POS;
        match reading {
            Ok(value) => display.print_at(row, col, &render_number(u32::from(value)))?,
            Err(_) => display.print_at(row, col, "ERR")?,
        }

        let (row, col) = COUNTER_POS;
        display.print_at(row, col, &render_number(self.iteration))?;

        let actuator = match reading {
            Ok(value) => decide(value, self.config.threshold),
            Err(_) => ActuatorState::Disengaged,
        };
        relay.set_state(actuator);

        let (row, col) = STATE_POS;
        display.print_at(row, col, actuator.label())?;
        delay.delay_ms(self.config.actuator_hold_ms);

        delay.delay_ms(self.config.loop_period_ms);

        Ok(CycleReport {
            iteration: self.iteration,
            reading,
            actuator,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Display that records every operation as text
    #[derive(Default)]
    struct RecordingDisplay {
        ops: Vec<String>,
    }

    impl CharacterDisplay for RecordingDisplay {
        fn clear(&mut self) -> Result<(), DisplayError> {
            self.ops.push("clear".into());
            Ok(())
        }

        fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError> {
            self.ops.push(format!("cursor {row},{col}"));
            Ok(())
        }

        fn print(&mut self, text: &str) -> Result<(), DisplayError> {
            self.ops.push(format!("print {text}"));
            Ok(())
        }
    }

    struct FixedSensor(Result<u16, SensorError>);

    impl GasSensor for FixedSensor {
        fn read_raw(&mut self) -> Result<u16, SensorError> {
            self.0
        }
    }

    struct MockRelay {
        state: ActuatorState,
        writes: u32,
    }

    impl MockRelay {
        fn new() -> Self {
            Self {
                state: ActuatorState::Disengaged,
                writes: 0,
            }
        }
    }

    impl RelayOutput for MockRelay {
        fn set_state(&mut self, state: ActuatorState) {
            self.state = state;
            self.writes += 1;
        }

        fn state(&self) -> ActuatorState {
            self.state
        }
    }

    #[derive(Default)]
    struct MockDelay {
        ms: Vec<u32>,
    }

    impl Delay for MockDelay {
        fn delay_us(&mut self, _us: u32) {}

        fn delay_ms(&mut self, ms: u32) {
            self.ms.push(ms);
        }
    }

    #[test]
    fn test_threshold_boundary() {
        assert_eq!(decide(2301, 2300), ActuatorState::Engaged);
        assert_eq!(decide(2300, 2300), ActuatorState::Disengaged);
        assert_eq!(decide(0, 2300), ActuatorState::Disengaged);
        assert_eq!(decide(4095, 2300), ActuatorState::Engaged);
    }

    #[test]
    fn test_step_above_threshold() {
        let mut monitor = Monitor::new(MonitorConfig::default());
        let mut display = RecordingDisplay::default();
        let mut sensor = FixedSensor(Ok(2301));
        let mut relay = MockRelay::new();
        let mut delay = MockDelay::default();

        let report = monitor
            .step(&mut display, &mut sensor, &mut relay, &mut delay)
            .unwrap();

        assert_eq!(report.iteration, 1);
        assert_eq!(report.reading, Ok(2301));
        assert_eq!(report.actuator, ActuatorState::Engaged);
        assert_eq!(relay.state(), ActuatorState::Engaged);
        assert_eq!(
            display.ops,
            [
                "clear",
                "cursor 0,0",
                "print 2301",
                "cursor 0,15",
                "print 1",
                "cursor 1,13",
                "print ON",
            ]
        );
        assert_eq!(delay.ms, [50, 500]);
    }

    #[test]
    fn test_step_at_threshold() {
        let mut monitor = Monitor::new(MonitorConfig::default());
        let mut display = RecordingDisplay::default();
        let mut relay = MockRelay::new();
        let mut delay = MockDelay::default();

        let report = monitor
            .step(&mut display, &mut FixedSensor(Ok(2300)), &mut relay, &mut delay)
            .unwrap();

        assert_eq!(report.actuator, ActuatorState::Disengaged);
        assert_eq!(display.ops.last().map(String::as_str), Some("print OFF"));
        assert_eq!(relay.writes, 1);
    }

    #[test]
    fn test_failed_read_disengages() {
        let mut monitor = Monitor::new(MonitorConfig::default());
        let mut display = RecordingDisplay::default();
        let mut relay = MockRelay::new();
        relay.set_state(ActuatorState::Engaged);
        let mut delay = MockDelay::default();

        let report = monitor
            .step(
                &mut display,
                &mut FixedSensor(Err(SensorError::Timeout)),
                &mut relay,
                &mut delay,
            )
            .unwrap();

        assert_eq!(report.reading, Err(SensorError::Timeout));
        assert_eq!(relay.state(), ActuatorState::Disengaged);
        assert!(display.ops.contains(&String::from("print ERR")));
    }

    #[test]
    fn test_counter_increments_and_wraps() {
        let mut monitor = Monitor::new(MonitorConfig::default());
        let mut display = RecordingDisplay::default();
        let mut relay = MockRelay::new();
        let mut delay = MockDelay::default();
        let mut sensor = FixedSensor(Ok(100));

        for expected in 1..=3 {
            let report = monitor
                .step(&mut display, &mut sensor, &mut relay, &mut delay)
                .unwrap();
            assert_eq!(report.iteration, expected);
            assert_eq!(monitor.iteration(), expected);
        }
        assert_eq!(monitor.config().threshold, 2300);

        monitor.iteration = u32::MAX;
        let report = monitor
            .step(&mut display, &mut sensor, &mut relay, &mut delay)
            .unwrap();
        assert_eq!(report.iteration, 0);
    }

    #[test]
    fn test_splash() {
        let monitor = Monitor::new(MonitorConfig::default());
        let mut display = RecordingDisplay::default();
        let mut delay = MockDelay::default();

        monitor.splash(&mut display, &mut delay).unwrap();

        assert_eq!(
            display.ops,
            ["cursor 0,0", "print Merhaba Dunya!", "clear"]
        );
        assert_eq!(delay.ms, [500]);
    }

    proptest! {
        /// The relay follows the reading every iteration, no memory of the
        /// previous state
        #[test]
        fn relay_tracks_each_reading(readings in proptest::collection::vec(0u16..=4095, 1..20)) {
            let mut monitor = Monitor::new(MonitorConfig::default());
            let mut display = RecordingDisplay::default();
            let mut relay = MockRelay::new();
            let mut delay = MockDelay::default();

            for reading in readings {
                let report = monitor
                    .step(&mut display, &mut FixedSensor(Ok(reading)), &mut relay, &mut delay)
                    .unwrap();
                prop_assert_eq!(report.actuator.is_engaged(), reading > 2300);
                prop_assert_eq!(relay.state(), report.actuator);
            }
        }
    }
}
