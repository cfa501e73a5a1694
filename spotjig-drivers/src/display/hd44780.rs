//! HD44780 character LCD behind a PCF8574 I2C backpack
//!
//! The backpack exposes the LCD in 4-bit mode. Each PCF8574 byte carries:
//!
//! | Bit | Signal            |
//! |-----|-------------------|
//! | 0   | RS (1 = data)     |
//! | 1   | RW (always write) |
//! | 2   | EN                |
//! | 3   | Backlight         |
//! | 4-7 | D4-D7             |
//!
//! A nibble is latched by writing it with EN high and then with EN low.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use spotjig_core::traits::{DisplayDriver, DisplayError, DISPLAY_COLS, DISPLAY_ROWS};

/// Usual address of a PCF8574 backpack with all jumpers open
pub const DEFAULT_ADDRESS: u8 = 0x27;

const RS: u8 = 0x01;
const EN: u8 = 0x04;
const BACKLIGHT: u8 = 0x08;

const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE: u8 = 0x06; // increment, no shift
const CMD_DISPLAY: u8 = 0x08;
const DISPLAY_ON: u8 = 0x04;
const BLINK_ON: u8 = 0x01;
const CMD_FUNCTION_SET: u8 = 0x28; // 4-bit, 2 lines, 5x8
const CMD_SET_DDRAM: u8 = 0x80;

/// DDRAM address of column 0 for each row of a 20x4 panel
const ROW_OFFSETS: [u8; DISPLAY_ROWS] = [0x00, 0x40, 0x14, 0x54];

/// HD44780 LCD driver
pub struct Hd44780<I, D> {
    i2c: I,
    delay: D,
    address: u8,
}

impl<I: I2c, D: DelayNs> Hd44780<I, D> {
    /// Create a driver; call [`Self::init`] before use
    pub fn new(i2c: I, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
        }
    }

    /// Run the 4-bit initialisation sequence and clear the screen
    pub fn init(&mut self) -> Result<(), DisplayError> {
        // Power-on wait
        self.delay.delay_ms(50);

        // Force 8-bit mode three times, then switch to 4-bit
        self.write_nibble(0x30, false)?;
        self.delay.delay_us(4500);
        self.write_nibble(0x30, false)?;
        self.delay.delay_us(4500);
        self.write_nibble(0x30, false)?;
        self.delay.delay_us(150);
        self.write_nibble(0x20, false)?;

        self.command(CMD_FUNCTION_SET)?;
        self.command(CMD_DISPLAY | DISPLAY_ON)?;
        self.clear()?;
        self.command(CMD_ENTRY_MODE)
    }

    /// Release the bus and delay
    pub fn release(self) -> (I, D) {
        (self.i2c, self.delay)
    }

    fn write_nibble(&mut self, nibble: u8, data: bool) -> Result<(), DisplayError> {
        let mut byte = (nibble & 0xF0) | BACKLIGHT;
        if data {
            byte |= RS;
        }
        self.i2c
            .write(self.address, &[byte | EN, byte])
            .map_err(|_| DisplayError::Bus)?;
        self.delay.delay_us(50);
        Ok(())
    }

    fn send(&mut self, byte: u8, data: bool) -> Result<(), DisplayError> {
        self.write_nibble(byte & 0xF0, data)?;
        self.write_nibble(byte << 4, data)
    }

    fn command(&mut self, cmd: u8) -> Result<(), DisplayError> {
        self.send(cmd, false)
    }
}

impl<I: I2c, D: DelayNs> DisplayDriver for Hd44780<I, D> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.command(CMD_CLEAR)?;
        self.delay.delay_ms(2);
        Ok(())
    }

    fn write_row(&mut self, row: u8, text: &str) -> Result<(), DisplayError> {
        if text.len() > DISPLAY_COLS {
            return Err(DisplayError::InvalidPosition);
        }
        self.set_caret(row, 0)?;
        for byte in text.bytes() {
            let byte = if byte.is_ascii() { byte } else { b'?' };
            self.send(byte, true)?;
        }
        Ok(())
    }

    fn set_caret(&mut self, row: u8, col: u8) -> Result<(), DisplayError> {
        if row as usize >= DISPLAY_ROWS || col as usize >= DISPLAY_COLS {
            return Err(DisplayError::InvalidPosition);
        }
        self.command(CMD_SET_DDRAM | (ROW_OFFSETS[row as usize] + col))
    }

    fn show_caret(&mut self) -> Result<(), DisplayError> {
        self.command(CMD_DISPLAY | DISPLAY_ON | BLINK_ON)
    }

    fn hide_caret(&mut self) -> Result<(), DisplayError> {
        self.command(CMD_DISPLAY | DISPLAY_ON)
    }
}
