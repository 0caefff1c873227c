//! 3x5 bitmap font
//!
//! Each glyph is five rows of three bits, most significant bit leftmost.
//! Lowercase input is drawn with the uppercase glyphs.

/// Glyph width in pixels
pub const GLYPH_WIDTH: i32 = 3;
/// Glyph height in pixels
pub const GLYPH_HEIGHT: i32 = 5;
/// Horizontal distance between consecutive characters
pub const ADVANCE: i32 = GLYPH_WIDTH + 1;

pub type Glyph = [u8; GLYPH_HEIGHT as usize];

/// Look up the glyph for `c`, if the font has one
pub fn glyph(c: char) -> Option<Glyph> {
    let rows = match c.to_ascii_uppercase() {
        ' ' => [0, 0, 0, 0, 0],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '"' => [0b101, 0b101, 0b000, 0b000, 0b000],
        '#' => [0b101, 0b111, 0b101, 0b111, 0b101],
        '$' => [0b111, 0b110, 0b011, 0b111, 0b010],
        '%' => [0b101, 0b001, 0b010, 0b100, 0b101],
        '&' => [0b110, 0b110, 0b011, 0b101, 0b111],
        '\'' => [0b010, 0b100, 0b000, 0b000, 0b000],
        '(' => [0b010, 0b100, 0b100, 0b100, 0b010],
        ')' => [0b010, 0b001, 0b001, 0b001, 0b010],
        '*' => [0b101, 0b010, 0b111, 0b010, 0b101],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        '/' => [0b001, 0b010, 0b010, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        ';' => [0b000, 0b010, 0b000, 0b010, 0b100],
        '<' => [0b001, 0b010, 0b100, 0b010, 0b001],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '>' => [0b100, 0b010, 0b001, 0b010, 0b100],
        '?' => [0b111, 0b001, 0b011, 0b000, 0b010],
        '@' => [0b010, 0b101, 0b101, 0b100, 0b011],
        '{' => [0b011, 0b010, 0b110, 0b010, 0b011],
        '|' => [0b010, 0b010, 0b010, 0b010, 0b010],
        '}' => [0b110, 0b010, 0b011, 0b010, 0b110],
        '[' => [0b110, 0b100, 0b100, 0b100, 0b110],
        '\\' => [0b100, 0b010, 0b010, 0b010, 0b001],
        ']' => [0b011, 0b001, 0b001, 0b001, 0b011],
        '~' => [0b100, 0b110, 0b111, 0b110, 0b100],
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b110, 0b010, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b011, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b100, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b001],
        'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b111, 0b101, 0b110, 0b101, 0b111],
        'C' => [0b011, 0b100, 0b100, 0b100, 0b011],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b111],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        'G' => [0b011, 0b100, 0b100, 0b101, 0b111],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b111, 0b010, 0b010, 0b010, 0b110],
        'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b111, 0b111, 0b101, 0b101, 0b101],
        'N' => [0b110, 0b101, 0b101, 0b101, 0b101],
        'O' => [0b011, 0b101, 0b101, 0b101, 0b110],
        'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'Q' => [0b010, 0b101, 0b101, 0b110, 0b011],
        'R' => [0b111, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b011, 0b100, 0b111, 0b001, 0b110],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b011],
        'V' => [0b101, 0b101, 0b101, 0b111, 0b010],
        'W' => [0b101, 0b101, 0b101, 0b111, 0b111],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b111, 0b001, 0b111],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        _ => return None,
    };
    Some(rows)
}

/// Whether the pixel at column `x` of a glyph row is lit
pub fn row_pixel(row: u8, x: i32) -> bool {
    (0..GLYPH_WIDTH).contains(&x) && row & (1 << (GLYPH_WIDTH - 1 - x)) != 0
}

/// Width in pixels of `s` when drawn, counting only characters with glyphs
pub fn text_width(s: &str) -> i32 {
    let count = s.chars().filter(|c| glyph(*c).is_some()).count() as i32;
    if count == 0 {
        0
    } else {
        count * ADVANCE - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_maps_to_uppercase() {
        assert_eq!(glyph('a'), glyph('A'));
        assert_eq!(glyph('z'), Some([0b111, 0b001, 0b010, 0b100, 0b111]));
    }

    #[test]
    fn test_space_is_blank() {
        assert_eq!(glyph(' '), Some([0; 5]));
    }

    #[test]
    fn test_unknown_characters() {
        assert_eq!(glyph('é'), None);
        assert_eq!(glyph('\n'), None);
    }

    #[test]
    fn test_every_glyph_fits_three_columns() {
        for c in (' '..='~').chain('a'..='z') {
            if let Some(rows) = glyph(c) {
                assert!(rows.iter().all(|r| *r < 8), "glyph {:?} too wide", c);
            }
        }
    }

    #[test]
    fn test_row_pixel() {
        assert!(row_pixel(0b100, 0));
        assert!(!row_pixel(0b100, 1));
        assert!(row_pixel(0b001, 2));
        assert!(!row_pixel(0b111, 3));
        assert!(!row_pixel(0b111, -1));
    }

    #[test]
    fn test_text_width() {
        assert_eq!(text_width(""), 0);
        assert_eq!(text_width("A"), 3);
        assert_eq!(text_width("FPS: 60"), 27);
        assert_eq!(text_width("é"), 0);
    }
}
