//! HD44780 character LCD driven over a 4-bit parallel bus

use arduino_hal::{
    hal::port::{PB0, PB1, PB2, PB3, PB4, PD7},
    port::{
        mode::{Floating, Input, Output},
        Pin,
    },
};
use irrigator::display::{DisplaySink, Glyph};

/// 16x2 character display
///
/// Note: optimized for binary size at the cost of generic utility
#[must_use]
pub struct Lcd {
    rs: Pin<Output, PB4>,
    en: Pin<Output, PB3>,
    d4: Pin<Output, PD7>,
    d5: Pin<Output, PB0>,
    d6: Pin<Output, PB1>,
    d7: Pin<Output, PB2>,
}

impl Lcd {
    /// Construct the display
    pub fn new(
        d12: Pin<Input<Floating>, PB4>,
        d11: Pin<Input<Floating>, PB3>,
        d7: Pin<Input<Floating>, PD7>,
        d8: Pin<Input<Floating>, PB0>,
        d9: Pin<Input<Floating>, PB1>,
        d10: Pin<Input<Floating>, PB2>,
    ) -> Self {
        Self {
            rs: d12.into_output(),
            en: d11.into_output(),
            d4: d7.into_output(),
            d5: d8.into_output(),
            d6: d9.into_output(),
            d7: d10.into_output(),
        }
    }

    /// Initialize the display
    pub fn init(&mut self) {
        // Power-on reset may leave the controller in 8-bit mode; walk it into 4-bit mode
        arduino_hal::delay_ms(50);
        self.rs.set_low();
        self.send4(0x03);
        arduino_hal::delay_us(4500);
        self.send4(0x03);
        arduino_hal::delay_us(150);
        self.send4(0x03);
        arduino_hal::delay_us(150);
        self.send4(0x02);
        arduino_hal::delay_us(150);

        self.set_func(0x08); // 4-bit bus; two lines; 5x8 char size
        self.set_ctrl(0x04); // Display on; cursor/blink off
        self.set_mode(0x02); // Left-to-right layout; no display shift
        self.clear();
    }

    fn clear(&mut self) {
        self.command(0x01);
        arduino_hal::delay_us(3000);
    }

    fn set_mode(&mut self, mode: u8) {
        self.command(0x04 | mode);
        arduino_hal::delay_us(100);
    }

    fn set_ctrl(&mut self, ctrl: u8) {
        self.command(0x08 | ctrl);
        arduino_hal::delay_us(100);
    }

    fn set_func(&mut self, func: u8) {
        self.command(0x20 | func);
        arduino_hal::delay_us(100);
    }

    fn set_pos(&mut self, col: u8, row: u8) {
        const OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];
        let pos = col + OFFSETS[(row & 0x3) as usize];
        self.command(0x80 | pos);
        arduino_hal::delay_us(100);
    }

    fn command(&mut self, cmd: u8) {
        self.send8(cmd, false);
    }

    fn print(&mut self, text: &str) {
        for byte in text.bytes() {
            self.write(byte);
        }
    }

    fn write(&mut self, value: u8) {
        self.send8(value, true);
        arduino_hal::delay_us(100);
    }

    fn send8(&mut self, byte: u8, mode: bool) {
        if mode {
            self.rs.set_high();
        } else {
            self.rs.set_low();
        }

        self.send4(byte >> 4);
        self.send4(byte & 0xf);
    }

    fn send4(&mut self, half_byte: u8) {
        if half_byte & 0b1000 != 0 {
            self.d7.set_high();
        } else {
            self.d7.set_low();
        }
        if half_byte & 0b0100 != 0 {
            self.d6.set_high();
        } else {
            self.d6.set_low();
        }
        if half_byte & 0b0010 != 0 {
            self.d5.set_high();
        } else {
            self.d5.set_low();
        }
        if half_byte & 0b0001 != 0 {
            self.d4.set_high();
        } else {
            self.d4.set_low();
        }
        self.pulse();
    }

    fn pulse(&mut self) {
        self.en.set_high();
        self.en.set_low();
    }
}

impl DisplaySink for Lcd {
    fn set_cursor(&mut self, col: u8, row: u8) {
        self.set_pos(col, row);
    }

    fn write_text(&mut self, text: &str) {
        self.print(text);
    }

    fn write_glyph(&mut self, glyph: Glyph) {
        self.write(glyph.slot());
    }

    fn define_glyph(&mut self, glyph: Glyph, bitmap: [u8; 8]) {
        // CGRAM address; the following data writes fill the glyph row by row
        self.command(0x40 | ((glyph.slot() & 0x7) << 3));
        arduino_hal::delay_us(100);
        for row in bitmap {
            self.write(row & 0x1f);
        }

        // Leave CGRAM so that text lands on screen again
        self.set_pos(0, 0);
    }

    fn clear_region(&mut self, col: u8, row: u8, width: u8) {
        self.set_pos(col, row);
        for _ in 0..width {
            self.write(b' ');
        }
    }
}
