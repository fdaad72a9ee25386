//! Board-agnostic core logic for the gas monitor firmware
//!
//! This crate contains all logic that does not depend on a specific chip:
//!
//! - Device traits (character display, gas sensor, relay output)
//! - Timing service (tick-driven sleep, cycle-counter busy-wait)
//! - Configuration type definitions
//! - Monitor loop (sample, render, switch the relay)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod monitor;
pub mod timing;
pub mod traits;
