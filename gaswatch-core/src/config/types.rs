//! Configuration type definitions

/// Core clock the board runs at after PLL bring-up (8 MHz HSE, PLL to 72 MHz)
pub const DEFAULT_CORE_CLOCK_HZ: u32 = 72_000_000;

/// Periodic tick rate driving the millisecond sleep
pub const DEFAULT_TICK_HZ: u32 = 1_000;

/// Reading above which the relay engages
pub const DEFAULT_THRESHOLD: u16 = 2300;

/// Largest value the tick reload register accepts (24-bit down-counter)
pub const MAX_TICK_RELOAD: u32 = 0x00FF_FFFF;

/// Clock configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockConfig {
    /// Core (processor) clock in Hz
    pub core_clock_hz: u32,
    /// Tick interrupt rate in Hz
    pub tick_hz: u32,
}

impl ClockConfig {
    /// Default board clocking
    pub const DEFAULT: Self = Self {
        core_clock_hz: DEFAULT_CORE_CLOCK_HZ,
        tick_hz: DEFAULT_TICK_HZ,
    };

    /// Core clock cycles per microsecond (72 at 72 MHz)
    pub const fn cycles_per_us(&self) -> u32 {
        self.core_clock_hz / 1_000_000
    }

    /// Reload value giving one tick every `1 / tick_hz` seconds
    ///
    /// The counter counts `reload + 1` core cycles per period.
    pub const fn tick_reload(&self) -> u32 {
        self.core_clock_hz / self.tick_hz - 1
    }

    /// Whether the tick period is representable by the reload register
    pub const fn tick_reload_fits(&self) -> bool {
        self.tick_hz != 0
            && self.core_clock_hz >= self.tick_hz
            && self.core_clock_hz / self.tick_hz - 1 <= MAX_TICK_RELOAD
    }
}

/// Clock settings the hardware cannot honour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// Configured core clock differs from what the clock tree produces
    CoreClockMismatch,
    /// Tick period does not fit the 24-bit reload register
    TickReloadOverflow,
}

impl ClockConfig {
    /// Check the configuration against the clock the board actually runs at
    ///
    /// Every delay is derived from `core_clock_hz`; a value that differs from
    /// the real SYSCLK scales all of them.
    pub const fn validate(&self, sysclk_hz: u32) -> Result<(), ClockError> {
        if self.core_clock_hz != sysclk_hz {
            Err(ClockError::CoreClockMismatch)
        } else if !self.tick_reload_fits() {
            Err(ClockError::TickReloadOverflow)
        } else {
            Ok(())
        }
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// How long to wait after a display command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandTiming {
    /// Wait 2 ms after every command
    #[default]
    Conservative,
    /// Wait 2 ms after clear / return-home, 50 µs after anything else
    Fast,
}

/// Character display configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// Post-command wait policy
    pub command_timing: CommandTiming,
}

impl DisplayConfig {
    /// Default display settings
    pub const DEFAULT: Self = Self {
        command_timing: CommandTiming::Conservative,
    };
}

/// Analog sampler configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SamplerConfig {
    /// Converter input channel the sensor is wired to
    pub channel: u8,
    /// Maximum end-of-conversion checks before giving up
    pub poll_budget: u32,
}

impl SamplerConfig {
    /// Default sampler settings (channel 0 on PA0)
    pub const DEFAULT: Self = Self {
        channel: 0,
        poll_budget: 10_000,
    };
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Monitor loop configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MonitorConfig {
    /// Relay engages when the reading is strictly above this
    pub threshold: u16,
    /// Pause at the end of every iteration (ms)
    pub loop_period_ms: u32,
    /// Pause right after the relay is switched (ms)
    pub actuator_hold_ms: u32,
    /// Boot banner
    pub splash_text: &'static str,
    /// How long the boot banner stays up (ms)
    pub splash_ms: u32,
}

impl MonitorConfig {
    /// Default monitor settings
    pub const DEFAULT: Self = Self {
        threshold: DEFAULT_THRESHOLD,
        loop_period_ms: 500,
        actuator_hold_ms: 50,
        splash_text: "Merhaba Dunya!",
        splash_ms: 500,
    };
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_clock_derivations() {
        let clock = ClockConfig::default();
        assert_eq!(clock.cycles_per_us(), 72);
        assert_eq!(clock.tick_reload(), 71_999);
        assert!(clock.tick_reload_fits());
    }

    #[test]
    fn test_tick_reload_range() {
        // 200 MHz at 10 Hz needs 20M cycles per tick, above 24 bits
        let slow = ClockConfig {
            core_clock_hz: 200_000_000,
            tick_hz: 10,
        };
        assert!(!slow.tick_reload_fits());

        let zero = ClockConfig {
            core_clock_hz: 72_000_000,
            tick_hz: 0,
        };
        assert!(!zero.tick_reload_fits());
    }

    #[test]
    fn test_clock_must_match_sysclk() {
        assert_eq!(ClockConfig::DEFAULT.validate(72_000_000), Ok(()));

        // Config claiming 168 MHz on a 72 MHz tree would stretch every delay
        let overclaimed = ClockConfig {
            core_clock_hz: 168_000_000,
            tick_hz: 1_000,
        };
        assert_eq!(
            overclaimed.validate(72_000_000),
            Err(ClockError::CoreClockMismatch)
        );

        let bad_tick = ClockConfig {
            core_clock_hz: 72_000_000,
            tick_hz: 1,
        };
        assert_eq!(
            bad_tick.validate(72_000_000),
            Err(ClockError::TickReloadOverflow)
        );
    }

    #[test]
    fn test_sampler_default_reads_pa0_channel() {
        assert_eq!(SamplerConfig::default().channel, 0);
    }

    #[test]
    fn test_display_default_is_conservative() {
        assert_eq!(
            DisplayConfig::default().command_timing,
            CommandTiming::Conservative
        );
        assert_eq!(DisplayConfig::default(), DisplayConfig::DEFAULT);
    }

    #[test]
    fn test_monitor_defaults() {
        let cfg = MonitorConfig::default();
        assert_eq!(cfg.threshold, 2300);
        assert_eq!(cfg.loop_period_ms, 500);
        assert_eq!(cfg.actuator_hold_ms, 50);
        assert_eq!(cfg.splash_text, "Merhaba Dunya!");
    }
}
