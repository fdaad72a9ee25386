//! Blocking delay provider

/// Blocking delay source
///
/// Both calls busy-wait the caller. They may be preempted by interrupts but
/// never return early.
pub trait Delay {
    /// Wait at least `us` microseconds
    fn delay_us(&mut self, us: u32);

    /// Wait at least `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);
}

impl<T: Delay + ?Sized> Delay for &mut T {
    fn delay_us(&mut self, us: u32) {
        (**self).delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms);
    }
}
