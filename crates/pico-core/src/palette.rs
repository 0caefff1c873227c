//! Fixed 16-colour palette

use serde::{Deserialize, Serialize};

/// Number of entries in the palette
pub const PALETTE_SIZE: usize = 16;

/// Index into the palette. Values >= `PALETTE_SIZE` are invalid.
pub type ColorIndex = u8;

/// An 8-bit RGB colour
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    pub fn to_rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, 0xFF]
    }

    /// Normalised `[0, 1]` sRGB components
    pub fn to_unit(&self) -> [f64; 3] {
        [
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        ]
    }
}

/// The PICO-8 style palette every drawing call indexes into
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: [Rgb; PALETTE_SIZE],
}

impl Default for Palette {
    fn default() -> Self {
        Self::pico()
    }
}

impl Palette {
    pub const fn pico() -> Self {
        Self {
            colors: [
                Rgb::from_hex(0x000000),
                Rgb::from_hex(0x1D2B53),
                Rgb::from_hex(0x7E2553),
                Rgb::from_hex(0x008751),
                Rgb::from_hex(0xAB5236),
                Rgb::from_hex(0x5F574F),
                Rgb::from_hex(0xC2C3C7),
                Rgb::from_hex(0xFFF1E8),
                Rgb::from_hex(0xFF004D),
                Rgb::from_hex(0xFFA300),
                Rgb::from_hex(0xFFEC27),
                Rgb::from_hex(0x00E436),
                Rgb::from_hex(0x29ADFF),
                Rgb::from_hex(0x83769C),
                Rgb::from_hex(0xFF77A8),
                Rgb::from_hex(0xFFCCAA),
            ],
        }
    }

    /// Look up a colour. Returns `None` for indices outside the palette.
    pub fn get(&self, index: ColorIndex) -> Option<Rgb> {
        self.colors.get(index as usize).copied()
    }

    pub fn is_valid(index: ColorIndex) -> bool {
        (index as usize) < PALETTE_SIZE
    }

    pub fn colors(&self) -> &[Rgb; PALETTE_SIZE] {
        &self.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_hex_splits_channels() {
        let c = Rgb::from_hex(0xFF8844);
        assert_eq!(c, Rgb::new(0xFF, 0x88, 0x44));
        assert_eq!(c.to_rgba(), [0xFF, 0x88, 0x44, 0xFF]);
    }

    #[test]
    fn pico_palette_entries() {
        let palette = Palette::pico();
        assert_eq!(palette.get(0), Some(Rgb::BLACK));
        assert_eq!(palette.get(7), Some(Rgb::from_hex(0xFFF1E8)));
        assert_eq!(palette.get(15), Some(Rgb::from_hex(0xFFCCAA)));
        assert_eq!(palette.get(16), None);
    }

    #[test]
    fn validity() {
        assert!(Palette::is_valid(0));
        assert!(Palette::is_valid(15));
        assert!(!Palette::is_valid(16));
    }
}
