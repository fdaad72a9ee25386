//! Free-running cycle counter abstractions

/// Read side of a free-running 32-bit cycle counter
///
/// The counter wraps on overflow. Consumers must only ever look at the
/// difference of two samples taken with `wrapping_sub`.
pub trait CycleCounter {
    /// Current counter value
    fn cycles(&self) -> u32;
}

/// Control side of a cycle counter, used once during bring-up
pub trait CycleCounterControl: CycleCounter {
    /// Enable the counter (and whatever debug/trace block gates it)
    fn enable(&mut self);

    /// Reset the counter to zero
    fn reset(&mut self);
}
