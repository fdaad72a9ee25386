//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in gaswatch-core:
//!
//! - Character display (HD44780 over a 4-bit parallel bus)
//! - Gas sensor (MQ-2 on a polled ADC channel)
//! - Relay output (GPIO, active-high or active-low)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod display;
pub mod relay;
pub mod sensor;
