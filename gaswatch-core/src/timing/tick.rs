//! Tick-driven millisecond sleep

use core::hint::spin_loop;

use portable_atomic::{AtomicU32, Ordering};

use super::TimingError;

/// Shared countdown decremented by the periodic tick
///
/// One instance lives in a `static` owned by the chip HAL. The foreground
/// loads it at the start of a sleep and spins until the tick handler has
/// counted it down to zero.
///
/// The sleep starts at an arbitrary phase of the tick period, so the first
/// tick may arrive almost immediately. A sleep of `n > 0` ms therefore loads
/// `n + 1` and lasts between `n` and `n + 1` tick periods.
pub struct TickCounter {
    remaining: AtomicU32,
}

impl Default for TickCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl TickCounter {
    /// Create an idle counter
    pub const fn new() -> Self {
        Self {
            remaining: AtomicU32::new(0),
        }
    }

    /// Tick handler body: decrement if non-zero
    ///
    /// Load and store are separate on purpose: the handler cannot be
    /// preempted by the foreground, which only ever stores at sleep start.
    pub fn tick(&self) {
        let remaining = self.remaining.load(Ordering::Relaxed);
        if remaining > 0 {
            self.remaining.store(remaining - 1, Ordering::Relaxed);
        }
    }

    /// Ticks left in the current sleep
    pub fn remaining(&self) -> u32 {
        self.remaining.load(Ordering::Relaxed)
    }

    /// Block for at least `ms` tick periods
    ///
    /// Spins forever if the tick interrupt is not running.
    pub fn sleep_ms(&self, ms: u32) {
        self.sleep_ms_with(ms, spin_loop);
    }

    /// [`sleep_ms`](Self::sleep_ms) with a caller-supplied idle step
    ///
    /// `idle` runs once per unsatisfied check. Hosts use it to inject ticks.
    pub fn sleep_ms_with<F: FnMut()>(&self, ms: u32, mut idle: F) {
        self.remaining.store(countdown(ms), Ordering::Relaxed);
        while self.remaining.load(Ordering::Relaxed) != 0 {
            idle();
        }
    }

    /// Bounded sleep: give up after `max_polls` unsatisfied checks
    pub fn try_sleep_ms(&self, ms: u32, max_polls: u32) -> Result<(), TimingError> {
        self.try_sleep_ms_with(ms, max_polls, spin_loop)
    }

    /// [`try_sleep_ms`](Self::try_sleep_ms) with a caller-supplied idle step
    pub fn try_sleep_ms_with<F: FnMut()>(
        &self,
        ms: u32,
        max_polls: u32,
        mut idle: F,
    ) -> Result<(), TimingError> {
        self.remaining.store(countdown(ms), Ordering::Relaxed);
        let mut polls = 0u32;
        while self.remaining.load(Ordering::Relaxed) != 0 {
            if polls >= max_polls {
                self.remaining.store(0, Ordering::Relaxed);
                return Err(TimingError::Timeout);
            }
            polls += 1;
            idle();
        }
        Ok(())
    }
}

/// Ticks to count for a sleep of `ms` periods
///
/// One extra tick absorbs the partial period before the first tick.
const fn countdown(ms: u32) -> u32 {
    if ms == 0 {
        0
    } else {
        ms.saturating_add(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_tick_saturates_at_zero() {
        let ticks = TickCounter::new();
        ticks.tick();
        ticks.tick();
        assert_eq!(ticks.remaining(), 0);
    }

    #[test]
    fn test_zero_sleep_returns_without_ticks() {
        let ticks = TickCounter::new();
        let mut idles = 0;
        ticks.sleep_ms_with(0, || idles += 1);
        assert_eq!(idles, 0);
    }

    #[test]
    fn test_sleep_reloads_counter() {
        let ticks = TickCounter::new();
        ticks.sleep_ms_with(3, || ticks.tick());
        assert_eq!(ticks.remaining(), 0);

        // A second sleep starts from its own duration, not from leftovers
        let mut count = 0;
        ticks.sleep_ms_with(7, || {
            count += 1;
            ticks.tick();
        });
        assert_eq!(count, 8);
    }

    /// Simulated time in µs: first tick `phase_us` after the load, then one
    /// every `PERIOD_US`. Returns how long the sleep took.
    fn timed_sleep(ms: u32, phase_us: u64) -> u64 {
        const PERIOD_US: u64 = 1_000;
        let ticks = TickCounter::new();
        let mut now = 0u64;
        let mut next_tick = phase_us;
        ticks.sleep_ms_with(ms, || {
            now = next_tick;
            ticks.tick();
            next_tick += PERIOD_US;
        });
        now
    }

    #[test]
    fn test_early_tick_still_covers_clear_wait() {
        // Clear needs 1.52 ms; the first tick comes 50 µs after the load
        let elapsed = timed_sleep(2, 50);
        assert!(elapsed >= 1_520, "sleep_ms(2) returned after {elapsed} us");
        assert_eq!(elapsed, 2_050);
    }

    #[test]
    fn test_bounded_sleep_times_out_without_ticks() {
        let ticks = TickCounter::new();
        let mut idles = 0;
        let result = ticks.try_sleep_ms_with(10, 25, || idles += 1);
        assert_eq!(result, Err(TimingError::Timeout));
        assert_eq!(idles, 25);
        assert_eq!(ticks.remaining(), 0);
    }

    #[test]
    fn test_bounded_sleep_completes_with_ticks() {
        let ticks = TickCounter::new();
        let result = ticks.try_sleep_ms_with(10, 25, || ticks.tick());
        assert_eq!(result, Ok(()));
    }

    proptest! {
        /// A non-zero sleep consumes one tick more than its duration
        #[test]
        fn sleep_counts_one_extra_tick(ms in 0u32..5_000) {
            let ticks = TickCounter::new();
            let mut delivered = 0u32;
            ticks.sleep_ms_with(ms, || {
                delivered += 1;
                ticks.tick();
            });
            let expected = if ms == 0 { 0 } else { ms + 1 };
            prop_assert_eq!(delivered, expected);
        }

        /// Whatever the tick phase, the sleep lasts at least `ms` periods
        /// and at most one period more
        #[test]
        fn sleep_never_returns_early(ms in 1u32..5_000, phase_us in 1u64..=1_000) {
            let elapsed = timed_sleep(ms, phase_us);
            prop_assert!(elapsed >= u64::from(ms) * 1_000);
            prop_assert!(elapsed <= (u64::from(ms) + 1) * 1_000);
        }
    }
}
