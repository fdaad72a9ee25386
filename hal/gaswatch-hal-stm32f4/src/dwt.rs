//! DWT cycle counter
//!
//! `CYCCNT` counts core clocks and wraps at 2^32 (~59.6 s at 72 MHz).

use cortex_m::peripheral::{DCB, DWT};
use gaswatch_hal::{CycleCounter, CycleCounterControl};

/// Read-only handle to the cycle counter
///
/// Zero-sized and `Copy`: every delay user gets its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct DwtCounter;

impl CycleCounter for DwtCounter {
    fn cycles(&self) -> u32 {
        DWT::cycle_count()
    }
}

/// Owner of the trace and DWT blocks, used once at boot
pub struct DwtControl {
    dcb: DCB,
    dwt: DWT,
}

impl DwtControl {
    pub fn new(dcb: DCB, dwt: DWT) -> Self {
        Self { dcb, dwt }
    }

    /// Counter handle for delay users
    pub fn counter(&self) -> DwtCounter {
        DwtCounter
    }
}

impl CycleCounter for DwtControl {
    fn cycles(&self) -> u32 {
        DWT::cycle_count()
    }
}

impl CycleCounterControl for DwtControl {
    fn enable(&mut self) {
        // TRCENA gates the whole DWT block
        self.dcb.enable_trace();
        self.dwt.enable_cycle_counter();
    }

    fn reset(&mut self) {
        self.dwt.set_cycle_count(0);
    }
}
