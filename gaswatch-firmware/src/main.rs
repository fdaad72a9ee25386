//! Gaswatch - Gas Sensor Monitor Firmware
//!
//! Main firmware binary for STM32F407-based gas monitors. Samples an MQ-2
//! sensor, shows the raw reading and an iteration counter on a 16x2 LCD
//! and pulls in a relay while the reading is above the threshold.
//!
//! Single-threaded: the main loop blocks in delays; the only concurrency
//! is the SysTick exception decrementing the millisecond counter.

#![no_std]
#![no_main]

use cortex_m_rt::entry;
use defmt::*;
use embassy_stm32::gpio::Level;
use {defmt_rtt as _, panic_probe as _};

use gaswatch_core::config::SamplerConfig;
use gaswatch_core::monitor::Monitor;
use gaswatch_core::timing::{init_cycle_counter, BusyWait, Timing};
use gaswatch_drivers::display::Hd44780;
use gaswatch_drivers::relay::GpioRelay;
use gaswatch_drivers::sensor::Mq2Sensor;
use gaswatch_hal_stm32f4::{
    init_tick, rcc_config, sample_time_for_cycles, tick_counter, Adc1, DwtControl, SYSCLK_HZ,
};

use crate::board::Board;

mod board;

/// Values validated and generated from gaswatch.toml by build.rs
mod config {
    use gaswatch_core::config::{
        ClockConfig, CommandTiming, DisplayConfig, MonitorConfig, SamplerConfig,
    };

    include!(concat!(env!("OUT_DIR"), "/config.rs"));
}

// Delays are calibrated from the configured clock, so it must be the real one
const _: () = core::assert!(config::CLOCK.validate(SYSCLK_HZ).is_ok());

#[entry]
fn main() -> ! {
    info!("Gaswatch firmware starting...");

    // Clock tree first: every delay below is calibrated against it
    let p = embassy_stm32::init(rcc_config());
    let Some(mut core) = cortex_m::Peripherals::take() else {
        defmt::panic!("Core peripherals already taken");
    };
    info!("Clocks up: {} Hz core", config::CLOCK.core_clock_hz);

    init_tick(&mut core.SYST, &config::CLOCK);

    let mut dwt = DwtControl::new(core.DCB, core.DWT);
    let timing = Timing::new(
        tick_counter(),
        BusyWait::new(dwt.counter(), config::CLOCK.cycles_per_us()),
    );
    let timing = match init_cycle_counter(&mut dwt) {
        Ok(()) => {
            debug!("Cycle counter running");
            timing
        }
        Err(e) => {
            warn!(
                "Cycle counter not running ({}), microsecond delays rounded up to ticks",
                e
            );
            timing.tick_fallback()
        }
    };

    let Some(sample_time) = sample_time_for_cycles(config::SAMPLE_TIME_CYCLES) else {
        defmt::panic!("Unsupported sample time {}", config::SAMPLE_TIME_CYCLES);
    };
    // Released level: high for an active-low relay
    let relay_idle = if config::RELAY_ACTIVE_LOW {
        Level::High
    } else {
        Level::Low
    };
    let board = Board::new(p, sample_time, relay_idle);

    let mut lcd = Hd44780::new(board.lcd_bus, timing, config::DISPLAY);
    lcd.init();
    info!("LCD ready ({})", config::DISPLAY.command_timing);

    let sampler = SamplerConfig {
        channel: Adc1::CHANNEL,
        ..config::SAMPLER
    };
    let mut sensor = Mq2Sensor::new(board.adc, sampler);
    let mut relay = GpioRelay::new(board.relay, config::RELAY_ACTIVE_LOW);
    let mut monitor = Monitor::new(config::MONITOR);
    let mut delay = timing;

    if let Err(e) = monitor.splash(&mut lcd, &mut delay) {
        error!("Splash failed: {}", e);
    }

    info!(
        "Monitoring: threshold {}, period {} ms",
        monitor.config().threshold,
        monitor.config().loop_period_ms
    );

    loop {
        match monitor.step(&mut lcd, &mut sensor, &mut relay, &mut delay) {
            Ok(report) => match report.reading {
                Ok(reading) => debug!(
                    "#{}: reading {} relay {}",
                    report.iteration, reading, report.actuator
                ),
                Err(e) => error!("#{}: sensor read failed: {}", report.iteration, e),
            },
            Err(e) => {
                error!("#{}: display error: {}", monitor.iteration(), e);
                timing.sleep_ms(monitor.config().loop_period_ms);
            }
        }
    }
}
