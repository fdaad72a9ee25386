//! Cycle-counter busy-wait

use core::hint::spin_loop;

use gaswatch_hal::CycleCounter;

/// Cycles elapsed between two counter samples
///
/// Modular subtraction keeps the result correct when the counter wrapped
/// once between `start` and `now`.
#[inline]
pub const fn elapsed_cycles(start: u32, now: u32) -> u32 {
    now.wrapping_sub(start)
}

/// Microsecond spin on a free-running cycle counter
#[derive(Debug, Clone, Copy)]
pub struct BusyWait<C> {
    counter: C,
    cycles_per_us: u32,
}

impl<C: CycleCounter> BusyWait<C> {
    /// Create a busy-wait with a fixed cycles-per-microsecond rate
    pub const fn new(counter: C, cycles_per_us: u32) -> Self {
        Self {
            counter,
            cycles_per_us,
        }
    }

    /// Cycle count a wait of `us` microseconds must cover
    ///
    /// Saturates; at 72 MHz the longest representable wait is ~59 s.
    pub const fn threshold(&self, us: u32) -> u32 {
        us.saturating_mul(self.cycles_per_us)
    }

    /// Spin until at least `us` microseconds of cycles have elapsed
    pub fn delay_us(&self, us: u32) {
        let start = self.counter.cycles();
        let threshold = self.threshold(us);
        while elapsed_cycles(start, self.counter.cycles()) < threshold {
            spin_loop();
        }
    }

    /// Access the underlying counter
    pub fn counter(&self) -> &C {
        &self.counter
    }
}
