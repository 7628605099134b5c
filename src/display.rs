//! Display composition for a 16x2 character LCD
//!
//! Layout:
//!
//! ```text
//! |Moisture: 42%   |
//! |Happy plant :)  |
//! ```
//!
//! Row 0 always carries the moisture reading. Row 1 carries exactly one of the settings preview,
//! the watering animation, or the plant's mood, in that order of precedence.

use core::convert::Infallible;

use heapless::Vec;
use ufmt::uWrite;

use crate::{duration::PumpUnit, irrigation::IrrigationState, moisture::Percent};

/// Characters per row
pub const COLUMNS: u8 = 16;
/// Rows on the display
pub const ROWS: u8 = 2;

const MOISTURE_LABEL: &str = "Moisture: ";
const WATERING_LABEL: &str = "Watering ";

/// Custom characters stored in the display's glyph RAM
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Glyph {
    /// Drop-of-love used by the watering animation
    Heart = 0,

    /// Shown next to a happy plant
    Smile = 1,
}

impl Glyph {
    /// Every custom glyph, in slot order
    pub const ALL: [Self; 2] = [Self::Heart, Self::Smile];

    /// Glyph RAM slot holding this glyph
    #[must_use]
    pub const fn slot(self) -> u8 {
        self as u8
    }

    /// 5x8 pixel pattern, one row per byte
    #[must_use]
    pub const fn bitmap(self) -> [u8; 8] {
        match self {
            Self::Heart => [
                0b00000, 0b01010, 0b11111, 0b11111, 0b01110, 0b00100, 0b00000, 0b00000,
            ],
            Self::Smile => [
                0b00000, 0b00000, 0b01010, 0b00000, 0b10001, 0b01110, 0b00000, 0b00000,
            ],
        }
    }
}

/// Character display the controller draws on
pub trait DisplaySink {
    /// Move the cursor; following writes start here
    fn set_cursor(&mut self, col: u8, row: u8);

    /// Write text at the cursor
    fn write_text(&mut self, text: &str);

    /// Write a custom glyph at the cursor
    fn write_glyph(&mut self, glyph: Glyph);

    /// Store a glyph's bitmap in the display's glyph RAM
    fn define_glyph(&mut self, glyph: Glyph, bitmap: [u8; 8]);

    /// Blank `width` characters starting at the given position; leaves the cursor unspecified
    fn clear_region(&mut self, col: u8, row: u8, width: u8);
}

/// Load every custom glyph; call once after the display is initialized
pub fn define_glyphs<D: DisplaySink>(sink: &mut D) {
    for glyph in Glyph::ALL {
        sink.define_glyph(glyph, glyph.bitmap());
    }
}

/// One primitive display operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOp {
    /// Blank a run of characters
    Clear {
        /// First column
        col: u8,
        /// Row
        row: u8,
        /// Number of characters
        width: u8,
    },

    /// Position the cursor
    Cursor {
        /// Column
        col: u8,
        /// Row
        row: u8,
    },

    /// Literal text
    Text(&'static str),

    /// Unsigned decimal number
    Number(u32),

    /// Custom glyph
    Glyph(Glyph),
}

/// Ordered draw operations for a complete screen update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    ops: Vec<DrawOp, 16>,
}

impl Frame {
    fn push(&mut self, op: DrawOp) {
        // capacity covers the longest row 1 layout, three hearts
        let pushed = self.ops.push(op).is_ok();
        debug_assert!(pushed, "frame overflow");
    }

    /// Replay the frame onto a display
    pub fn draw<D: DisplaySink>(&self, sink: &mut D) {
        for op in &self.ops {
            match *op {
                DrawOp::Clear { col, row, width } => sink.clear_region(col, row, width),
                DrawOp::Cursor { col, row } => sink.set_cursor(col, row),
                DrawOp::Text(text) => sink.write_text(text),
                DrawOp::Number(value) => {
                    let mut writer = SinkWriter(&mut *sink);
                    let _ = ufmt::uwrite!(writer, "{}", value);
                }
                DrawOp::Glyph(glyph) => sink.write_glyph(glyph),
            }
        }
    }
}

/// Formats numbers straight onto a display
struct SinkWriter<'a, D>(&'a mut D);

impl<D: DisplaySink> uWrite for SinkWriter<'_, D> {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.0.write_text(s);
        Ok(())
    }
}

/// A selected pump duration awaiting the user's glance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preview {
    /// Duration expressed in `unit`
    pub amount: u32,
    /// Unit of `amount`
    pub unit: PumpUnit,
}

/// Everything visible on the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct View {
    /// Irrigation state
    pub state: IrrigationState,
    /// Latest moisture reading
    pub percent: Percent,
    /// Settings overlay, when open
    pub preview: Option<Preview>,
    /// Animation frame counter; only its value modulo 4 matters
    pub frame: u8,
}

/// Hearts shown for each of the four animation frames
const HEARTS: [u8; 4] = [1, 2, 3, 0];

/// Lay out a complete screen for `view`
#[must_use]
pub fn compose(view: &View) -> Frame {
    let mut frame = Frame::default();
    let digits_col = MOISTURE_LABEL.len() as u8;

    frame.push(DrawOp::Cursor { col: 0, row: 0 });
    frame.push(DrawOp::Text(MOISTURE_LABEL));
    frame.push(DrawOp::Clear {
        col: digits_col,
        row: 0,
        width: COLUMNS - digits_col,
    });
    frame.push(DrawOp::Cursor {
        col: digits_col,
        row: 0,
    });
    frame.push(DrawOp::Number(view.percent as u32));
    frame.push(DrawOp::Text("%"));

    frame.push(DrawOp::Clear {
        col: 0,
        row: 1,
        width: COLUMNS,
    });
    frame.push(DrawOp::Cursor { col: 0, row: 1 });

    if let Some(preview) = view.preview {
        frame.push(DrawOp::Text(preview.unit.label()));
        frame.push(DrawOp::Number(preview.amount));
        frame.push(DrawOp::Text(preview.unit.suffix()));
        return frame;
    }

    match view.state {
        IrrigationState::Watering => {
            frame.push(DrawOp::Text(WATERING_LABEL));
            for _ in 0..HEARTS[(view.frame % 4) as usize] {
                frame.push(DrawOp::Glyph(Glyph::Heart));
                frame.push(DrawOp::Text(" "));
            }
        }
        IrrigationState::IdleHappy => {
            frame.push(DrawOp::Text("Happy plant "));
            frame.push(DrawOp::Glyph(Glyph::Smile));
        }
        IrrigationState::IdleSad => frame.push(DrawOp::Text("Thirsty plant")),
    }

    frame
}
