//! Timing service
//!
//! Two blocking primitives:
//!
//! - [`TickCounter::sleep_ms`] - millisecond sleep paced by a periodic tick
//!   interrupt that decrements a shared counter
//! - [`BusyWait::delay_us`] - microsecond spin on a free-running cycle
//!   counter
//!
//! [`Timing`] bundles both behind the [`Delay`] trait (and embedded-hal's
//! `DelayNs`) so drivers never see which one serves a given wait.
//!
//! The tick handler is the only code that preempts the foreground. It does a
//! single bounded decrement and never blocks.

pub mod busy_wait;
pub mod tick;

pub use busy_wait::{elapsed_cycles, BusyWait};
pub use tick::TickCounter;

use core::hint::spin_loop;

use gaswatch_hal::{CycleCounter, CycleCounterControl, Delay};

/// Spins allowed for the cycle counter to leave zero after enable
const SETTLE_SPINS: u32 = 3;

/// Errors reported by the timing service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimingError {
    /// Cycle counter did not advance after being enabled
    HardwareNotResponding,
    /// Bounded wait ran out of polls before the condition was met
    Timeout,
}

/// Enable the cycle counter and check that it runs
///
/// Enables the counter, zeroes it, lets a few cycles pass and reads it back.
/// A counter still at zero means the block is absent or gated off; that is
/// reported, not fatal. Microsecond delays are meaningless until it runs.
pub fn init_cycle_counter<C: CycleCounterControl>(counter: &mut C) -> Result<(), TimingError> {
    counter.enable();
    counter.reset();

    for _ in 0..SETTLE_SPINS {
        spin_loop();
    }

    if counter.cycles() == 0 {
        Err(TimingError::HardwareNotResponding)
    } else {
        Ok(())
    }
}

/// Combined delay provider
///
/// Microsecond waits spin on the cycle counter, millisecond waits sleep on
/// the tick counter. Cheap to copy when the cycle counter handle is.
///
/// Without a running cycle counter, [`tick_fallback`](Self::tick_fallback)
/// rounds microsecond waits up to whole tick periods: coarse, never short.
#[derive(Clone, Copy)]
pub struct Timing<'a, C> {
    ticks: &'a TickCounter,
    busy: BusyWait<C>,
    coarse_us: bool,
}

impl<'a, C: CycleCounter> Timing<'a, C> {
    /// Create a delay provider from the shared tick counter and a busy-wait
    pub const fn new(ticks: &'a TickCounter, busy: BusyWait<C>) -> Self {
        Self {
            ticks,
            busy,
            coarse_us: false,
        }
    }

    /// Serve microsecond waits from the tick counter instead
    pub fn tick_fallback(mut self) -> Self {
        self.coarse_us = true;
        self
    }

    /// Whether microsecond waits are rounded up to tick periods
    pub fn is_coarse(&self) -> bool {
        self.coarse_us
    }

    /// Block for `ms` tick periods
    pub fn sleep_ms(&self, ms: u32) {
        self.ticks.sleep_ms(ms);
    }

    /// Block for at least `us` microseconds
    pub fn busy_wait_us(&self, us: u32) {
        if self.coarse_us {
            self.ticks.sleep_ms(us.div_ceil(1_000));
        } else {
            self.busy.delay_us(us);
        }
    }

    /// Block for `ms` tick periods, failing if the tick stops
    pub fn try_sleep_ms(&self, ms: u32, max_polls: u32) -> Result<(), TimingError> {
        self.ticks.try_sleep_ms(ms, max_polls)
    }
}

impl<C: CycleCounter> Delay for Timing<'_, C> {
    fn delay_us(&mut self, us: u32) {
        self.busy_wait_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.ticks.sleep_ms(ms);
    }
}

impl<C: CycleCounter> embedded_hal::delay::DelayNs for Timing<'_, C> {
    fn delay_ns(&mut self, ns: u32) {
        self.busy_wait_us(ns.div_ceil(1_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.busy_wait_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.ticks.sleep_ms(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    /// Counter that advances a fixed step on every read once enabled
    struct MockCounter {
        value: Cell<u32>,
        step: u32,
        enabled: bool,
        resets: u32,
    }

    impl MockCounter {
        fn new(start: u32, step: u32) -> Self {
            Self {
                value: Cell::new(start),
                step,
                enabled: false,
                resets: 0,
            }
        }
    }

    impl CycleCounter for MockCounter {
        fn cycles(&self) -> u32 {
            if self.enabled {
                self.value.set(self.value.get().wrapping_add(self.step));
            }
            self.value.get()
        }
    }

    impl CycleCounterControl for MockCounter {
        fn enable(&mut self) {
            self.enabled = true;
        }

        fn reset(&mut self) {
            self.value.set(0);
            self.resets += 1;
        }
    }

    #[test]
    fn test_cycle_counter_running() {
        let mut counter = MockCounter::new(0, 5);
        assert_eq!(init_cycle_counter(&mut counter), Ok(()));
        assert!(counter.enabled);
        assert_eq!(counter.resets, 1);
    }

    #[test]
    fn test_cycle_counter_stuck() {
        // Step 0 models a counter that is enabled but never clocked
        let mut counter = MockCounter::new(1234, 0);
        assert_eq!(
            init_cycle_counter(&mut counter),
            Err(TimingError::HardwareNotResponding)
        );
    }

    #[test]
    fn test_timing_routes_waits() {
        let ticks = TickCounter::new();
        let counter = MockCounter {
            value: Cell::new(0),
            step: 72,
            enabled: true,
            resets: 0,
        };
        let mut timing = Timing::new(&ticks, BusyWait::new(counter, 72));

        // Zero-length sleep must not need a tick to return
        Delay::delay_ms(&mut timing, 0);
        Delay::delay_us(&mut timing, 10);
        assert_eq!(ticks.remaining(), 0);

        // No tick source attached: the bounded sleep gives up
        assert_eq!(timing.try_sleep_ms(3, 100), Err(TimingError::Timeout));
    }

    #[test]
    fn test_tick_fallback_skips_cycle_counter() {
        use portable_atomic::AtomicBool;
        use portable_atomic::Ordering;
        use std::thread;
        use std::time::Duration;

        let ticks = TickCounter::new();
        let done = AtomicBool::new(false);
        // Stuck counter: a cycle-based wait on it would never finish
        let counter = MockCounter::new(0, 0);
        let mut timing = Timing::new(&ticks, BusyWait::new(counter, 72)).tick_fallback();
        assert!(timing.is_coarse());

        thread::scope(|s| {
            s.spawn(|| {
                while !done.load(Ordering::Relaxed) {
                    ticks.tick();
                    thread::sleep(Duration::from_micros(50));
                }
            });

            Delay::delay_us(&mut timing, 150);
            timing.busy_wait_us(1);
            done.store(true, Ordering::Relaxed);
        });

        assert_eq!(ticks.remaining(), 0);
    }
}
