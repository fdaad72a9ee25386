//! STM32F4-specific HAL for the Gaswatch firmware
//!
//! Implements the `gaswatch-hal` traits on top of embassy-stm32 and the
//! Cortex-M core peripherals:
//!
//! - `clock` - HSE + PLL bring-up to 72 MHz
//! - `systick` - 1 kHz tick interrupt feeding the millisecond sleep
//! - `dwt` - cycle counter for microsecond busy-waits
//! - `gpio` - push-pull outputs for the LCD bus and relay
//! - `adc` - polled single conversions on ADC1
//!
//! Pin assignment for the reference board lives in the firmware crate;
//! this crate only knows about peripherals.

#![no_std]

pub mod adc;
pub mod clock;
pub mod dwt;
pub mod gpio;
pub mod systick;

pub use adc::{init_converter, init_pin, sample_time_for_cycles, Adc1};
pub use clock::{rcc_config, SYSCLK_HZ};
pub use dwt::{DwtControl, DwtCounter};
pub use gpio::Pin;
pub use systick::{init_tick, tick_counter};
