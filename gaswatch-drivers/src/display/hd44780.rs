//! HD44780 character LCD driver (4-bit bus)
//!
//! Drives a 16x2 HD44780-compatible panel over RS, E and D4..D7 with RW
//! tied low. The panel cannot be read back, so every transfer is followed by
//! a fixed settle delay instead of a busy-flag poll.
//!
//! # Bring-up
//!
//! After power-on the controller may be in 8-bit mode or halfway through a
//! 4-bit byte. Three single-nibble `0x3` writes force it into a known 8-bit
//! state from any starting point, then a single `0x2` switches it to the
//! 4-bit bus. Only after that are full two-nibble commands valid.
//!
//! ```text
//! Uninitialized ─▶ BusWidth8Assumed ─▶ BusWidth4Selected ─▶ FunctionSet
//!                                                               │
//!                          Ready ◀── DisplayConfigured ◀────────┘
//! ```

use core::fmt;

use gaswatch_core::config::{CommandTiming, DisplayConfig};
use gaswatch_core::traits::{CharacterDisplay, DisplayError};
use gaswatch_hal::{Delay, DisplayBus, RegisterSelect};

/// HD44780 instruction set (subset used here)
mod cmd {
    pub const CLEAR_DISPLAY: u8 = 0x01;
    pub const RETURN_HOME: u8 = 0x02;
    /// Increment address, no display shift
    pub const ENTRY_MODE_INCREMENT: u8 = 0x06;
    /// Display on, cursor off, blink off
    pub const DISPLAY_ON: u8 = 0x0C;
    /// 4-bit bus, 2 lines, 5x8 font
    pub const FUNCTION_SET_4BIT_2LINE: u8 = 0x28;
    pub const SET_DDRAM_ADDR: u8 = 0x80;
    /// DDRAM offset of the second row
    pub const ROW1_OFFSET: u8 = 0x40;

    /// Single-nibble wake-up while the bus width is unknown
    pub const WAKE_8BIT: u8 = 0x3;
    /// Single-nibble switch to the 4-bit bus
    pub const SELECT_4BIT: u8 = 0x2;
}

/// Protocol delays
mod timing {
    /// Power-on stabilisation
    pub const POWER_ON_MS: u32 = 20;
    /// Line settle around each strobe edge
    pub const NIBBLE_SETTLE_US: u32 = 100;
    /// After the first wake-up nibble
    pub const WAKE_FIRST_MS: u32 = 5;
    /// After the second and third wake-up nibbles
    pub const WAKE_REPEAT_US: u32 = 150;
    /// After the 4-bit select nibble
    pub const BUS_SELECT_US: u32 = 100;
    /// Clear / home execution time (datasheet 1.52 ms)
    pub const LONG_COMMAND_MS: u32 = 2;
    /// Any other command (datasheet 37 µs)
    pub const SHORT_COMMAND_US: u32 = 50;
    /// After a data byte
    pub const DATA_SETTLE_US: u32 = 100;
}

/// Bring-up progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitPhase {
    /// Power-on state unknown
    Uninitialized,
    /// Wake-up nibbles sent, controller assumed in 8-bit mode
    BusWidth8Assumed,
    /// 4-bit bus selected
    BusWidth4Selected,
    /// Lines and font configured
    FunctionSet,
    /// Display on, entry mode set
    DisplayConfigured,
    /// Cleared and accepting commands and data
    Ready,
}

impl InitPhase {
    /// Whether commands and data are accepted
    pub const fn is_ready(self) -> bool {
        matches!(self, InitPhase::Ready)
    }
}

/// DDRAM address command for a cursor position
///
/// Row 0 starts at 0x00, every other row at 0x40. Nothing is range
/// checked: out-of-range positions go to the panel as-is.
pub const fn ddram_address(row: u8, col: u8) -> u8 {
    let base = if row == 0 {
        cmd::SET_DDRAM_ADDR
    } else {
        cmd::SET_DDRAM_ADDR | cmd::ROW1_OFFSET
    };
    base.wrapping_add(col)
}

/// HD44780 driver
pub struct Hd44780<B, D> {
    bus: B,
    delay: D,
    command_timing: CommandTiming,
    phase: InitPhase,
}

impl<B: DisplayBus, D: Delay> Hd44780<B, D> {
    /// Create a driver; the panel is untouched until [`init`](Self::init)
    pub fn new(bus: B, delay: D, config: DisplayConfig) -> Self {
        Self {
            bus,
            delay,
            command_timing: config.command_timing,
            phase: InitPhase::Uninitialized,
        }
    }

    /// Current bring-up phase
    pub fn phase(&self) -> InitPhase {
        self.phase
    }

    /// Give the bus and delay back
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }

    /// Run the bring-up sequence
    ///
    /// Order and delays are mandatory. Calling it again on a ready panel
    /// re-runs the full sequence.
    pub fn init(&mut self) {
        self.phase = InitPhase::Uninitialized;

        self.bus.configure_outputs();
        self.delay.delay_ms(timing::POWER_ON_MS);

        self.send_command_nibble_only(cmd::WAKE_8BIT);
        self.delay.delay_ms(timing::WAKE_FIRST_MS);
        self.send_command_nibble_only(cmd::WAKE_8BIT);
        self.delay.delay_us(timing::WAKE_REPEAT_US);
        self.send_command_nibble_only(cmd::WAKE_8BIT);
        self.delay.delay_us(timing::WAKE_REPEAT_US);
        self.phase = InitPhase::BusWidth8Assumed;

        self.send_command_nibble_only(cmd::SELECT_4BIT);
        self.delay.delay_us(timing::BUS_SELECT_US);
        self.phase = InitPhase::BusWidth4Selected;

        self.write_command(cmd::FUNCTION_SET_4BIT_2LINE);
        self.phase = InitPhase::FunctionSet;

        self.write_command(cmd::DISPLAY_ON);
        self.write_command(cmd::ENTRY_MODE_INCREMENT);
        self.phase = InitPhase::DisplayConfigured;

        self.write_command(cmd::CLEAR_DISPLAY);
        self.delay.delay_ms(timing::LONG_COMMAND_MS);
        self.phase = InitPhase::Ready;
    }

    /// Send an instruction byte
    pub fn send_command(&mut self, command: u8) -> Result<(), DisplayError> {
        self.ensure_ready()?;
        self.write_command(command);
        Ok(())
    }

    /// Send a character byte
    pub fn send_data(&mut self, data: u8) -> Result<(), DisplayError> {
        self.ensure_ready()?;
        self.write_data(data);
        Ok(())
    }

    /// Send a single instruction nibble
    ///
    /// Only meaningful during bring-up, before the bus width is settled.
    pub fn send_command_nibble_only(&mut self, nibble: u8) {
        self.bus.set_mode(RegisterSelect::Command);
        self.write_nibble(nibble);
    }

    /// Write every byte of `text` at the cursor
    ///
    /// Stops at the end of the string or at the first NUL. No wrapping.
    pub fn print_string(&mut self, text: &str) -> Result<(), DisplayError> {
        self.ensure_ready()?;
        for byte in text.bytes().take_while(|&b| b != 0) {
            self.write_data(byte);
        }
        Ok(())
    }

    /// Move the cursor to `row`, `col`
    pub fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError> {
        self.send_command(ddram_address(row, col))
    }

    /// Blank the panel and home the cursor
    pub fn clear(&mut self) -> Result<(), DisplayError> {
        self.send_command(cmd::CLEAR_DISPLAY)?;
        self.delay.delay_ms(timing::LONG_COMMAND_MS);
        Ok(())
    }

    fn ensure_ready(&self) -> Result<(), DisplayError> {
        if self.phase.is_ready() {
            Ok(())
        } else {
            Err(DisplayError::NotReady)
        }
    }

    fn write_command(&mut self, command: u8) {
        self.write_byte(RegisterSelect::Command, command);
        match self.command_timing {
            CommandTiming::Conservative => self.delay.delay_ms(timing::LONG_COMMAND_MS),
            CommandTiming::Fast if is_long_command(command) => {
                self.delay.delay_ms(timing::LONG_COMMAND_MS)
            }
            CommandTiming::Fast => self.delay.delay_us(timing::SHORT_COMMAND_US),
        }
    }

    fn write_data(&mut self, data: u8) {
        self.write_byte(RegisterSelect::Data, data);
        self.delay.delay_us(timing::DATA_SETTLE_US);
    }

    fn write_byte(&mut self, mode: RegisterSelect, byte: u8) {
        self.bus.set_mode(mode);
        self.write_nibble(byte >> 4);
        self.write_nibble(byte & 0x0F);
    }

    /// Present a nibble and latch it on the falling edge of E
    fn write_nibble(&mut self, nibble: u8) {
        self.bus.set_enable(false);
        self.bus.write_nibble(nibble & 0x0F);
        self.delay.delay_us(timing::NIBBLE_SETTLE_US);
        self.bus.set_enable(true);
        self.delay.delay_us(timing::NIBBLE_SETTLE_US);
        self.bus.set_enable(false);
        self.delay.delay_us(timing::NIBBLE_SETTLE_US);
    }
}

/// Clear display and return home take ~1.52 ms, everything else ~37 µs
const fn is_long_command(command: u8) -> bool {
    command == cmd::CLEAR_DISPLAY || command & 0xFE == cmd::RETURN_HOME
}

impl<B: DisplayBus, D: Delay> CharacterDisplay for Hd44780<B, D> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        Hd44780::clear(self)
    }

    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError> {
        Hd44780::set_cursor(self, row, col)
    }

    fn print(&mut self, text: &str) -> Result<(), DisplayError> {
        self.print_string(text)
    }
}

impl<B: DisplayBus, D: Delay> fmt::Write for Hd44780<B, D> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.print_string(s).map_err(|_| fmt::Error)
    }
}
