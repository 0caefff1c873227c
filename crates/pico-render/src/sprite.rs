//! Baked sprite sheet
//!
//! 256 sprites of 8x8 pixels arranged as a 16x16 grid, giving a 128x128
//! sheet. Sprite `n` sits at tile column `n % 16`, row `n / 16`.

use pico_core::{ColorIndex, Palette, PicoError, Result, TILE_SIZE};

/// Sprites along each side of the sheet
pub const SHEET_TILES: i32 = 16;
/// Total number of sprite slots
pub const SPRITE_COUNT: usize = (SHEET_TILES * SHEET_TILES) as usize;
/// Sheet side length in pixels
pub const SHEET_SIZE: i32 = SHEET_TILES * TILE_SIZE;

/// One sprite as up to eight rows of up to eight optional palette indices.
/// `None` cells and missing trailing cells are transparent.
pub type SpriteRows = Vec<Vec<Option<ColorIndex>>>;

/// Parse pixel-art rows where each character is one cell: a hex digit is a
/// palette index and `.` is transparent.
///
/// ```
/// let rows = pico_render::parse_rows(0, &["..3", "f"]).unwrap();
/// assert_eq!(rows[0], vec![None, None, Some(3)]);
/// ```
pub fn parse_rows(index: usize, lines: &[&str]) -> Result<SpriteRows> {
    lines
        .iter()
        .enumerate()
        .map(|(y, line)| {
            line.chars()
                .map(|c| match c {
                    '.' => Ok(None),
                    _ => c
                        .to_digit(16)
                        .map(|d| Some(d as ColorIndex))
                        .ok_or_else(|| PicoError::InvalidSprite {
                            index,
                            reason: format!("unexpected '{}' in row {}", c, y),
                        }),
                })
                .collect::<Result<Vec<_>>>()
        })
        .collect()
}

pub struct SpriteSheet {
    pixels: Vec<Option<ColorIndex>>,
}

impl Default for SpriteSheet {
    fn default() -> Self {
        Self::new()
    }
}

impl SpriteSheet {
    /// A fully transparent sheet
    pub fn new() -> Self {
        Self {
            pixels: vec![None; (SHEET_SIZE * SHEET_SIZE) as usize],
        }
    }

    /// Bake a sheet from `(index, rows)` definitions
    pub fn bake<I>(definitions: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, SpriteRows)>,
    {
        let mut sheet = Self::new();
        for (index, rows) in definitions {
            sheet.set_sprite(index, &rows)?;
        }
        Ok(sheet)
    }

    /// Top-left pixel of sprite `index` on the sheet
    pub fn tile_origin(index: usize) -> (i32, i32) {
        let n = index as i32;
        ((n % SHEET_TILES) * TILE_SIZE, (n / SHEET_TILES) * TILE_SIZE)
    }

    /// Replace one sprite. The whole tile is cleared first.
    pub fn set_sprite(&mut self, index: usize, rows: &[Vec<Option<ColorIndex>>]) -> Result<()> {
        if index >= SPRITE_COUNT {
            return Err(PicoError::InvalidSprite {
                index,
                reason: format!("index out of range 0..{}", SPRITE_COUNT),
            });
        }
        if rows.len() > TILE_SIZE as usize {
            return Err(PicoError::InvalidSprite {
                index,
                reason: format!("{} rows, at most {} allowed", rows.len(), TILE_SIZE),
            });
        }
        for (y, row) in rows.iter().enumerate() {
            if row.len() > TILE_SIZE as usize {
                return Err(PicoError::InvalidSprite {
                    index,
                    reason: format!("row {} has {} cells, at most {} allowed", y, row.len(), TILE_SIZE),
                });
            }
            if let Some(bad) = row.iter().flatten().find(|c| !Palette::is_valid(**c)) {
                return Err(PicoError::InvalidSprite {
                    index,
                    reason: format!("colour {} in row {} is not a palette index", bad, y),
                });
            }
        }

        let (ox, oy) = Self::tile_origin(index);
        for y in 0..TILE_SIZE {
            for x in 0..TILE_SIZE {
                let cell = rows
                    .get(y as usize)
                    .and_then(|row| row.get(x as usize))
                    .copied()
                    .flatten();
                self.pixels[Self::offset(ox + x, oy + y)] = cell;
            }
        }
        Ok(())
    }

    /// Sheet pixel, `None` when transparent or off the sheet
    pub fn pixel(&self, x: i32, y: i32) -> Option<ColorIndex> {
        if !(0..SHEET_SIZE).contains(&x) || !(0..SHEET_SIZE).contains(&y) {
            return None;
        }
        self.pixels[Self::offset(x, y)]
    }

    fn offset(x: i32, y: i32) -> usize {
        (y * SHEET_SIZE + x) as usize
    }
}
