//! Screen layout for the 16x2 panel
//!
//! ```text
//!  col 0         13  15
//! ┌────────────────────┐
//! │2301            7   │ row 0: reading, iteration counter
//! │             ON     │ row 1: relay state
//! └────────────────────┘
//! ```
//!
//! The counter starts at column 15 and runs past the visible area once it
//! has more than one digit; the panel keeps the extra characters in hidden
//! DDRAM.

use core::fmt::Write;

use heapless::String;

/// Longest decimal rendering of a `u32`
pub const MAX_NUMBER_LEN: usize = 10;

/// Where the raw reading goes
pub const READING_POS: (u8, u8) = (0, 0);

/// Where the iteration counter goes
pub const COUNTER_POS: (u8, u8) = (0, 15);

/// Where the relay state label goes
pub const STATE_POS: (u8, u8) = (1, 13);

/// Decimal text for `value`
pub fn render_number(value: u32) -> String<MAX_NUMBER_LEN> {
    let mut text = String::new();
    // Ten digits always fit
    write!(text, "{}", value).ok();
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_number() {
        assert_eq!(render_number(0).as_str(), "0");
        assert_eq!(render_number(2301).as_str(), "2301");
        assert_eq!(render_number(u32::MAX).as_str(), "4294967295");
    }
}
