//! SysTick millisecond tick
//!
//! The exception handler is the only writer that decrements the shared
//! [`TickCounter`]; `sleep_ms` on the main thread loads it and spins.

use cortex_m::peripheral::syst::SystClkSource;
use cortex_m::peripheral::SYST;
use cortex_m_rt::exception;
use gaswatch_core::config::{ClockConfig, MAX_TICK_RELOAD};
use gaswatch_core::timing::TickCounter;

static TICKS: TickCounter = TickCounter::new();

/// Counter decremented by the SysTick exception
pub fn tick_counter() -> &'static TickCounter {
    &TICKS
}

/// Start the periodic tick from the core clock
///
/// The reload must fit the 24-bit register; the firmware build checks
/// this for the configured clock, so an oversized value is clamped here.
pub fn init_tick(syst: &mut SYST, clock: &ClockConfig) {
    let reload = clock.tick_reload().min(MAX_TICK_RELOAD);

    syst.set_clock_source(SystClkSource::Core);
    syst.set_reload(reload);
    syst.clear_current();
    syst.enable_interrupt();
    syst.enable_counter();

    #[cfg(feature = "defmt")]
    defmt::debug!("SysTick: reload {} at {} Hz", reload, clock.tick_hz);
}

#[exception]
fn SysTick() {
    TICKS.tick();
}
