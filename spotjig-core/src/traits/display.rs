//! Character display trait for the 20x4 operator panel

use heapless::String;

/// Number of character columns on the panel
pub const DISPLAY_COLS: usize = 20;

/// Number of character rows on the panel
pub const DISPLAY_ROWS: usize = 4;

/// Errors that can occur with display communication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transaction failed (I2C NACK, arbitration loss, ...)
    Bus,
    /// Row or column outside the panel
    InvalidPosition,
}

/// Trait for character-grid displays
///
/// The display is a dumb terminal: all layout decisions are made by the
/// caller. `write_row` expects text already padded or truncated to
/// [`DISPLAY_COLS`]; use [`DisplayExt::print_row`] for that.
pub trait DisplayDriver {
    /// Clear the entire screen and home the caret
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Write text starting at column 0 of a row
    ///
    /// - `row`: Row number (0-3)
    /// - `text`: ASCII text, at most [`DISPLAY_COLS`] characters
    fn write_row(&mut self, row: u8, text: &str) -> Result<(), DisplayError>;

    /// Move the caret
    fn set_caret(&mut self, row: u8, col: u8) -> Result<(), DisplayError>;

    /// Show the (blinking) caret
    fn show_caret(&mut self) -> Result<(), DisplayError>;

    /// Hide the caret
    fn hide_caret(&mut self) -> Result<(), DisplayError>;
}

/// Helper trait for drawing whole rows and screens
pub trait DisplayExt: DisplayDriver {
    /// Write a row, padding with spaces (or truncating) to the panel width
    ///
    /// The padding overwrites whatever was left on the row before.
    fn print_row(&mut self, row: u8, text: &str) -> Result<(), DisplayError> {
        let mut line: String<DISPLAY_COLS> = String::new();
        for c in text.chars() {
            if line.push(c).is_err() {
                break;
            }
        }
        while line.push(' ').is_ok() {}
        self.write_row(row, line.as_str())
    }

    /// Clear the screen and print `lines` from row 0 down
    fn show_lines(&mut self, lines: &[&str]) -> Result<(), DisplayError> {
        self.clear()?;
        for (row, text) in lines.iter().take(DISPLAY_ROWS).enumerate() {
            self.print_row(row as u8, text)?;
        }
        Ok(())
    }
}

// Blanket implementation for all DisplayDriver types
impl<T: DisplayDriver + ?Sized> DisplayExt for T {}

/// Log a failed display write and carry on
pub(crate) fn report(result: Result<(), DisplayError>) {
    if let Err(e) = result {
        warn!("display write failed: {:?}", e);
    }
}
