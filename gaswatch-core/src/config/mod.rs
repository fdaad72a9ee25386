//! Configuration types
//!
//! Board-agnostic configuration structures. The firmware bakes concrete
//! values in at build time from `gaswatch.toml`; the `Default` impls hold
//! the values the board was designed around.

pub mod types;

pub use types::*;
