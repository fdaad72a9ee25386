//! Character display trait

/// Errors that can occur when talking to the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Command or data issued before the bring-up sequence completed
    NotReady,
}

/// Trait for a row/column addressed character display
///
/// The display keeps its own content; callers position the cursor and
/// write text. Nothing is wrapped or clipped in software.
pub trait CharacterDisplay {
    /// Blank every cell and move the cursor home
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Move the cursor
    ///
    /// - `row`: Row number (0-1)
    /// - `col`: Column number (0-15 visible, larger values reach hidden DDRAM)
    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError>;

    /// Write text at the cursor
    fn print(&mut self, text: &str) -> Result<(), DisplayError>;

    /// Move the cursor then write text
    fn print_at(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        self.set_cursor(row, col)?;
        self.print(text)
    }
}

impl<T: CharacterDisplay + ?Sized> CharacterDisplay for &mut T {
    fn clear(&mut self) -> Result<(), DisplayError> {
        (**self).clear()
    }

    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError> {
        (**self).set_cursor(row, col)
    }

    fn print(&mut self, text: &str) -> Result<(), DisplayError> {
        (**self).print(text)
    }
}
