//! Host-side stand-ins for the board peripherals

use core::convert::Infallible;

use embedded_hal::digital::{self, ErrorKind, ErrorType, OutputPin};

use crate::{
    display::{DisplaySink, Glyph, COLUMNS, ROWS},
    sensor::{Channel, SensorSource},
};

/// Output pin recording its level and the number of writes
#[derive(Debug, Default)]
pub struct MockPin {
    high: bool,
    writes: usize,
}

impl MockPin {
    pub const fn high() -> Self {
        Self {
            high: true,
            writes: 0,
        }
    }

    pub const fn is_high(&self) -> bool {
        self.high
    }

    pub const fn writes(&self) -> usize {
        self.writes
    }
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        self.writes += 1;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        self.writes += 1;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinFault;

impl digital::Error for PinFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Output pin that refuses every write
#[derive(Debug)]
pub struct FaultyPin;

impl ErrorType for FaultyPin {
    type Error = PinFault;
}

impl OutputPin for FaultyPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Err(PinFault)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Err(PinFault)
    }
}

/// Fixed readings for both sensor channels
#[derive(Debug, Clone, Copy)]
pub struct MockSensors {
    pub moisture: u16,
    pub pot: u16,
}

impl SensorSource for MockSensors {
    fn read(&mut self, channel: Channel) -> u16 {
        match channel {
            Channel::Moisture => self.moisture,
            Channel::Potentiometer => self.pot,
        }
    }
}

/// 16x2 character grid behaving like the HD44780 character RAM
#[derive(Debug, Clone)]
pub struct MockLcd {
    cells: [[u8; COLUMNS as usize]; ROWS as usize],
    col: u8,
    row: u8,
    pub glyphs: [Option<[u8; 8]>; 8],
    pub commands: usize,
}

impl Default for MockLcd {
    fn default() -> Self {
        Self {
            cells: [[b' '; COLUMNS as usize]; ROWS as usize],
            col: 0,
            row: 0,
            glyphs: [None; 8],
            commands: 0,
        }
    }
}

impl MockLcd {
    /// Contents of a row with glyph slots 0 and 1 shown as a heart and a smile
    pub fn line(&self, row: u8) -> String {
        self.cells[row as usize]
            .iter()
            .map(|&cell| match cell {
                0 => '♥',
                1 => '☺',
                other => other as char,
            })
            .collect::<String>()
            .trim_end()
            .to_owned()
    }

    fn put(&mut self, byte: u8) {
        if self.col < COLUMNS && self.row < ROWS {
            self.cells[self.row as usize][self.col as usize] = byte;
        }
        self.col = self.col.saturating_add(1);
    }
}

impl DisplaySink for MockLcd {
    fn set_cursor(&mut self, col: u8, row: u8) {
        self.commands += 1;
        self.col = col;
        self.row = row;
    }

    fn write_text(&mut self, text: &str) {
        self.commands += 1;
        for byte in text.bytes() {
            self.put(byte);
        }
    }

    fn write_glyph(&mut self, glyph: Glyph) {
        self.commands += 1;
        self.put(glyph.slot());
    }

    fn define_glyph(&mut self, glyph: Glyph, bitmap: [u8; 8]) {
        self.commands += 1;
        self.glyphs[glyph.slot() as usize] = Some(bitmap);
    }

    fn clear_region(&mut self, col: u8, row: u8, width: u8) {
        self.commands += 1;
        self.set_cursor(col, row);
        for _ in 0..width {
            self.put(b' ');
        }
    }
}
