//! Gaswatch Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction traits that can be implemented
//! by chip-specific HALs (STM32F4 today). The display protocol, the timing
//! service and the sampling loop are written against these traits so they
//! can be exercised on the host with recording mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (gaswatch-firmware)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  gaswatch-core / gaswatch-drivers       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  gaswatch-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ gaswatch-hal- │
//!             │    stm32f4    │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital output
//! - [`delay::Delay`] - Blocking microsecond / millisecond delays
//! - [`counter::CycleCounter`] - Free-running wrapping cycle counter
//! - [`adc::ConversionUnit`] - Software-triggered, polled ADC
//! - [`bus::DisplayBus`] - 4-bit parallel character display bus

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod bus;
pub mod counter;
pub mod delay;
pub mod gpio;

// Re-export key traits at crate root for convenience
pub use adc::ConversionUnit;
pub use bus::{DisplayBus, RegisterSelect};
pub use counter::{CycleCounter, CycleCounterControl};
pub use delay::Delay;
pub use gpio::OutputPin;
