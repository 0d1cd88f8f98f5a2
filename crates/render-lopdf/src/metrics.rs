//! Advance widths of the Helvetica base font, in 1/1000 em.
//!
//! The values come from the Adobe Core 14 AFM and are indexed by the
//! WinAnsi byte the text is drawn with, so a measured string is exactly the
//! string the renderer emits.

use crate::text::encode_win_ansi;

/// Widths for 0x20 (space) through 0x7E (`~`).
const ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // digits
    278, 278, 584, 584, 584, 556, 1015, // 0x3A
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A-M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N-Z
    278, 278, 278, 469, 556, 333, // 0x5B
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a-m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n-z
    334, 260, 334, 584, // 0x7B
];

/// Widths for 0xA0 (no-break space) through 0xFF (`ÿ`).
const LATIN1: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333, // 0xA0
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611, // 0xB0
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // 0xC0
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // 0xD0
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278, // 0xE0
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500, // 0xF0
];

fn glyph_width(byte: u8) -> u16 {
    match byte {
        0x20..=0x7E => ASCII[usize::from(byte - 0x20)],
        0xA0..=0xFF => LATIN1[usize::from(byte - 0xA0)],
        0x80 | 0x96 => 556,
        0x91 | 0x92 => 222,
        0x93 | 0x94 => 333,
        0x95 => 350,
        0x85 | 0x97 => 1000,
        // Control bytes from C1 code points; nothing wider exists in the font.
        _ => 1015,
    }
}

/// Width in points of `text` set in Helvetica at `font_size`.
pub fn text_width(text: &str, font_size: f32) -> f32 {
    let units: u32 = encode_win_ansi(text)
        .into_iter()
        .map(|b| u32::from(glyph_width(b)))
        .sum();
    units as f32 * font_size / 1000.0
}
