use image::{Rgba, RgbaImage};

use crate::render::text::{TextBounds, blend_pixel};

const GLYPH_WIDTH: i32 = 5;
const GLYPH_HEIGHT: i32 = 7;
const SCALE: i32 = 2;
const ADVANCE: i32 = (GLYPH_WIDTH + 1) * SCALE;
const FIRST_GLYPH: char = ' ';
const UNKNOWN_GLYPH: char = '?';

/// Printable ASCII, 5x7 cells. One byte per column, least significant bit on top.
#[rustfmt::skip]
static GLYPHS: [[u8; 5]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x5F, 0x00, 0x00], // !
    [0x00, 0x07, 0x00, 0x07, 0x00], // "
    [0x14, 0x7F, 0x14, 0x7F, 0x14], // #
    [0x24, 0x2A, 0x7F, 0x2A, 0x12], // $
    [0x23, 0x13, 0x08, 0x64, 0x62], // %
    [0x36, 0x49, 0x55, 0x22, 0x50], // &
    [0x00, 0x05, 0x03, 0x00, 0x00], // '
    [0x00, 0x1C, 0x22, 0x41, 0x00], // (
    [0x00, 0x41, 0x22, 0x1C, 0x00], // )
    [0x08, 0x2A, 0x1C, 0x2A, 0x08], // *
    [0x08, 0x08, 0x3E, 0x08, 0x08], // +
    [0x00, 0x50, 0x30, 0x00, 0x00], // ,
    [0x08, 0x08, 0x08, 0x08, 0x08], // -
    [0x00, 0x60, 0x60, 0x00, 0x00], // .
    [0x20, 0x10, 0x08, 0x04, 0x02], // /
    [0x3E, 0x51, 0x49, 0x45, 0x3E], // 0
    [0x00, 0x42, 0x7F, 0x40, 0x00], // 1
    [0x42, 0x61, 0x51, 0x49, 0x46], // 2
    [0x21, 0x41, 0x45, 0x4B, 0x31], // 3
    [0x18, 0x14, 0x12, 0x7F, 0x10], // 4
    [0x27, 0x45, 0x45, 0x45, 0x39], // 5
    [0x3C, 0x4A, 0x49, 0x49, 0x30], // 6
    [0x01, 0x71, 0x09, 0x05, 0x03], // 7
    [0x36, 0x49, 0x49, 0x49, 0x36], // 8
    [0x06, 0x49, 0x49, 0x29, 0x1E], // 9
    [0x00, 0x36, 0x36, 0x00, 0x00], // :
    [0x00, 0x56, 0x36, 0x00, 0x00], // ;
    [0x08, 0x14, 0x22, 0x41, 0x00], // <
    [0x14, 0x14, 0x14, 0x14, 0x14], // =
    [0x00, 0x41, 0x22, 0x14, 0x08], // >
    [0x02, 0x01, 0x51, 0x09, 0x06], // ?
    [0x32, 0x49, 0x79, 0x41, 0x3E], // @
    [0x7E, 0x11, 0x11, 0x11, 0x7E], // A
    [0x7F, 0x49, 0x49, 0x49, 0x36], // B
    [0x3E, 0x41, 0x41, 0x41, 0x22], // C
    [0x7F, 0x41, 0x41, 0x22, 0x1C], // D
    [0x7F, 0x49, 0x49, 0x49, 0x41], // E
    [0x7F, 0x09, 0x09, 0x01, 0x01], // F
    [0x3E, 0x41, 0x41, 0x51, 0x32], // G
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // H
    [0x00, 0x41, 0x7F, 0x41, 0x00], // I
    [0x20, 0x40, 0x41, 0x3F, 0x01], // J
    [0x7F, 0x08, 0x14, 0x22, 0x41], // K
    [0x7F, 0x40, 0x40, 0x40, 0x40], // L
    [0x7F, 0x02, 0x04, 0x02, 0x7F], // M
    [0x7F, 0x04, 0x08, 0x10, 0x7F], // N
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // O
    [0x7F, 0x09, 0x09, 0x09, 0x06], // P
    [0x3E, 0x41, 0x51, 0x21, 0x5E], // Q
    [0x7F, 0x09, 0x19, 0x29, 0x46], // R
    [0x46, 0x49, 0x49, 0x49, 0x31], // S
    [0x01, 0x01, 0x7F, 0x01, 0x01], // T
    [0x3F, 0x40, 0x40, 0x40, 0x3F], // U
    [0x1F, 0x20, 0x40, 0x20, 0x1F], // V
    [0x7F, 0x20, 0x18, 0x20, 0x7F], // W
    [0x63, 0x14, 0x08, 0x14, 0x63], // X
    [0x03, 0x04, 0x78, 0x04, 0x03], // Y
    [0x61, 0x51, 0x49, 0x45, 0x43], // Z
    [0x00, 0x00, 0x7F, 0x41, 0x41], // [
    [0x02, 0x04, 0x08, 0x10, 0x20], // \
    [0x41, 0x41, 0x7F, 0x00, 0x00], // ]
    [0x04, 0x02, 0x01, 0x02, 0x04], // ^
    [0x40, 0x40, 0x40, 0x40, 0x40], // _
    [0x00, 0x01, 0x02, 0x04, 0x00], // `
    [0x20, 0x54, 0x54, 0x54, 0x78], // a
    [0x7F, 0x48, 0x44, 0x44, 0x38], // b
    [0x38, 0x44, 0x44, 0x44, 0x20], // c
    [0x38, 0x44, 0x44, 0x48, 0x7F], // d
    [0x38, 0x54, 0x54, 0x54, 0x18], // e
    [0x08, 0x7E, 0x09, 0x01, 0x02], // f
    [0x08, 0x14, 0x54, 0x54, 0x3C], // g
    [0x7F, 0x08, 0x04, 0x04, 0x78], // h
    [0x00, 0x44, 0x7D, 0x40, 0x00], // i
    [0x20, 0x40, 0x44, 0x3D, 0x00], // j
    [0x00, 0x7F, 0x10, 0x28, 0x44], // k
    [0x00, 0x41, 0x7F, 0x40, 0x00], // l
    [0x7C, 0x04, 0x18, 0x04, 0x78], // m
    [0x7C, 0x08, 0x04, 0x04, 0x78], // n
    [0x38, 0x44, 0x44, 0x44, 0x38], // o
    [0x7C, 0x14, 0x14, 0x14, 0x08], // p
    [0x08, 0x14, 0x14, 0x18, 0x7C], // q
    [0x7C, 0x08, 0x04, 0x04, 0x08], // r
    [0x48, 0x54, 0x54, 0x54, 0x20], // s
    [0x04, 0x3F, 0x44, 0x40, 0x20], // t
    [0x3C, 0x40, 0x40, 0x20, 0x7C], // u
    [0x1C, 0x20, 0x40, 0x20, 0x1C], // v
    [0x3C, 0x40, 0x30, 0x40, 0x3C], // w
    [0x44, 0x28, 0x10, 0x28, 0x44], // x
    [0x0C, 0x50, 0x50, 0x50, 0x3C], // y
    [0x44, 0x64, 0x54, 0x4C, 0x44], // z
    [0x00, 0x08, 0x36, 0x41, 0x00], // {
    [0x00, 0x00, 0x7F, 0x00, 0x00], // |
    [0x00, 0x41, 0x36, 0x08, 0x00], // }
    [0x08, 0x04, 0x08, 0x10, 0x08], // ~
];

/// Bitmap face used when no TrueType font can be loaded.
/// It only comes in one size, whatever size the template asks for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuiltinFont;

impl BuiltinFont {
    pub const PIXEL_HEIGHT: i32 = GLYPH_HEIGHT * SCALE;

    pub fn measure(&self, text: &str) -> Option<TextBounds> {
        let mut bounds: Option<TextBounds> = None;
        self.for_each_dot(text, 0, 0, |dot| {
            bounds = Some(bounds.map_or(dot, |bounds| bounds.union(dot)));
        });
        bounds
    }

    pub fn draw(&self, canvas: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>, text: &str) {
        self.for_each_dot(text, x, y, |dot| {
            for py in dot.min_y..dot.max_y {
                for px in dot.min_x..dot.max_x {
                    blend_pixel(canvas, px, py, color, 1.0);
                }
            }
        });
    }

    /// Call `on_dot` with the area covered by every lit dot of the text, scaled up.
    fn for_each_dot<F>(&self, text: &str, x: i32, y: i32, mut on_dot: F)
    where
        F: FnMut(TextBounds),
    {
        let mut caret_x = x;
        for character in text.chars() {
            let columns = glyph(character);
            for (column_index, column) in (0..).zip(columns.iter()) {
                for row in 0..GLYPH_HEIGHT {
                    if column & (1 << row) == 0 {
                        continue;
                    }
                    let min_x = caret_x.saturating_add(column_index * SCALE);
                    let min_y = y.saturating_add(row * SCALE);
                    on_dot(TextBounds {
                        min_x,
                        min_y,
                        max_x: min_x.saturating_add(SCALE),
                        max_y: min_y.saturating_add(SCALE),
                    });
                }
            }
            caret_x = caret_x.saturating_add(ADVANCE);
        }
    }
}

fn glyph(character: char) -> &'static [u8; 5] {
    let index = |character: char| (character as usize).checked_sub(FIRST_GLYPH as usize);
    index(character)
        .and_then(|index| GLYPHS.get(index))
        .or_else(|| index(UNKNOWN_GLYPH).and_then(|index| GLYPHS.get(index)))
        .unwrap_or(&GLYPHS[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use parameterized::{ide, parameterized};

    ide!();

    #[test]
    fn should_measure_text() {
        let bounds = BuiltinFont.measure("HI").unwrap();

        assert_eq!(
            TextBounds {
                min_x: 0,
                min_y: 0,
                max_x: 20,
                max_y: 14
            },
            bounds
        );
        assert_eq!(20, bounds.width());
    }

    #[test]
    fn should_not_measure_blank_text() {
        assert_eq!(None, BuiltinFont.measure("   "));
        assert_eq!(None, BuiltinFont.measure(""));
    }

    #[parameterized(
        character = {"é", "名", "\u{7f}", "\t"}
    )]
    fn should_draw_unknown_characters_as_question_mark(character: &str) {
        assert_eq!(BuiltinFont.measure("?"), BuiltinFont.measure(character));
    }

    #[test]
    fn should_grow_with_text_length() {
        let short = BuiltinFont.measure("Al").unwrap();
        let long = BuiltinFont.measure("Alice").unwrap();

        assert!(long.width() > short.width());
    }

    #[test]
    fn should_draw_within_measured_bounds() {
        let mut canvas = RgbaImage::from_pixel(80, 30, Rgba([255, 255, 255, 255]));
        let bounds = BuiltinFont.measure("Ab").unwrap();

        BuiltinFont.draw(&mut canvas, 10, 5, Rgba([0, 0, 0, 255]), "Ab");

        for (x, y, pixel) in canvas.enumerate_pixels() {
            let (x, y) = (x as i32, y as i32);
            let inside = x >= 10 + bounds.min_x
                && x < 10 + bounds.max_x
                && y >= 5 + bounds.min_y
                && y < 5 + bounds.max_y;
            if !inside {
                assert_eq!(&Rgba([255, 255, 255, 255]), pixel);
            }
        }
        assert_eq!(&Rgba([0, 0, 0, 255]), canvas.get_pixel(10, 5 + 2 * SCALE as u32));
    }
}
