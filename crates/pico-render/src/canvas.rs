//! Palette-indexed software canvas
//!
//! Every [`Renderer`] operation rasterises into a 128x128 buffer of palette
//! indices. Drawing is clipped to the canvas; invalid colours and sprite
//! indices are logged and skipped.

use std::path::Path;

use pico_core::{
    ColorIndex, Palette, PicoError, Renderer, Result, NATIVE_HEIGHT, NATIVE_WIDTH, TILE_SIZE,
};

use crate::font;
use crate::sprite::{SpriteSheet, SPRITE_COUNT};

pub struct Canvas {
    width: i32,
    height: i32,
    pixels: Vec<ColorIndex>,
    /// Colour of the last `clear_screen`, also used for the window border
    background: ColorIndex,
    palette: Palette,
    sprites: SpriteSheet,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(SpriteSheet::new())
    }
}

impl Canvas {
    pub fn new(sprites: SpriteSheet) -> Self {
        let width = NATIVE_WIDTH as i32;
        let height = NATIVE_HEIGHT as i32;
        Self {
            width,
            height,
            pixels: vec![0; (width * height) as usize],
            background: 0,
            palette: Palette::default(),
            sprites,
        }
    }

    pub fn width(&self) -> u32 {
        self.width as u32
    }

    pub fn height(&self) -> u32 {
        self.height as u32
    }

    pub fn background(&self) -> ColorIndex {
        self.background
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn sprites(&self) -> &SpriteSheet {
        &self.sprites
    }

    pub fn set_sprites(&mut self, sprites: SpriteSheet) {
        self.sprites = sprites;
    }

    /// Palette index at (x, y), `None` off-canvas
    pub fn pixel(&self, x: i32, y: i32) -> Option<ColorIndex> {
        self.in_bounds(x, y).then(|| self.pixels[self.offset(x, y)])
    }

    pub fn pixels(&self) -> &[ColorIndex] {
        &self.pixels
    }

    /// Byte length of an RGBA8 copy of the canvas
    pub fn rgba_len(&self) -> usize {
        self.pixels.len() * 4
    }

    /// Convert the canvas to RGBA8 through the palette into `out`
    pub fn write_rgba(&self, out: &mut [u8]) -> Result<()> {
        if out.len() != self.rgba_len() {
            return Err(PicoError::RenderError(format!(
                "RGBA buffer is {} bytes, expected {}",
                out.len(),
                self.rgba_len()
            )));
        }
        for (dst, index) in out.chunks_exact_mut(4).zip(&self.pixels) {
            let rgb = self.palette.get(*index).unwrap_or_default();
            dst.copy_from_slice(&rgb.to_rgba());
        }
        Ok(())
    }

    pub fn to_rgba(&self) -> Vec<u8> {
        let mut out = vec![0; self.rgba_len()];
        // Length always matches
        let _ = self.write_rgba(&mut out);
        out
    }

    /// Save the canvas as a PNG, upscaled `scale` times with nearest-neighbour
    pub fn save_png(&self, path: &Path, scale: u32) -> Result<()> {
        if scale == 0 {
            return Err(PicoError::RenderError("screenshot scale must be at least 1".into()));
        }
        let rgba = self.to_rgba();
        let width = self.width() * scale;
        let height = self.height() * scale;
        let image = image::RgbaImage::from_fn(width, height, |x, y| {
            let i = (((y / scale) * self.width() + x / scale) * 4) as usize;
            image::Rgba([rgba[i], rgba[i + 1], rgba[i + 2], rgba[i + 3]])
        });
        image
            .save(path)
            .map_err(|e| PicoError::RenderError(format!("Failed to save {}: {}", path.display(), e)))?;
        log::info!("Saved screenshot to {}", path.display());
        Ok(())
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    fn offset(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    fn valid_color(color: ColorIndex) -> bool {
        if Palette::is_valid(color) {
            true
        } else {
            log::warn!("Colour {} is not in the palette", color);
            false
        }
    }

    fn plot(&mut self, x: i32, y: i32, color: ColorIndex) {
        if self.in_bounds(x, y) {
            let i = self.offset(x, y);
            self.pixels[i] = color;
        }
    }

    /// Inclusive horizontal span, clipped
    fn hspan(&mut self, x0: i32, x1: i32, y: i32, color: ColorIndex) {
        if y < 0 || y >= self.height {
            return;
        }
        let start = x0.min(x1).max(0);
        let end = x0.max(x1).min(self.width - 1);
        for x in start..=end {
            let i = self.offset(x, y);
            self.pixels[i] = color;
        }
    }

    fn vspan(&mut self, x: i32, y0: i32, y1: i32, color: ColorIndex) {
        for y in y0.min(y1)..=y0.max(y1) {
            self.plot(x, y, color);
        }
    }

    fn plot_octants(&mut self, cx: i32, cy: i32, x: i32, y: i32, color: ColorIndex) {
        self.plot(cx + x, cy + y, color);
        self.plot(cx - x, cy + y, color);
        self.plot(cx + x, cy - y, color);
        self.plot(cx - x, cy - y, color);
        self.plot(cx + y, cy + x, color);
        self.plot(cx - y, cy + x, color);
        self.plot(cx + y, cy - x, color);
        self.plot(cx - y, cy - x, color);
    }
}

impl Renderer for Canvas {
    fn clear_screen(&mut self, color: ColorIndex) {
        if !Self::valid_color(color) {
            return;
        }
        self.background = color;
        self.pixels.fill(color);
    }

    fn rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: ColorIndex) {
        if w <= 0 || h <= 0 || !Self::valid_color(color) {
            return;
        }
        let (x1, y1) = (x + w - 1, y + h - 1);
        self.hspan(x, x1, y, color);
        self.hspan(x, x1, y1, color);
        self.vspan(x, y, y1, color);
        self.vspan(x1, y, y1, color);
    }

    fn rect_fill(&mut self, x: i32, y: i32, w: i32, h: i32, color: ColorIndex) {
        if w <= 0 || h <= 0 || !Self::valid_color(color) {
            return;
        }
        for row in y.max(0)..(y + h).min(self.height) {
            self.hspan(x, x + w - 1, row, color);
        }
    }

    /// Midpoint circle; filled circles are drawn as horizontal spans
    fn circle(&mut self, cx: i32, cy: i32, r: i32, color: ColorIndex, filled: bool) {
        if r < 0 || !Self::valid_color(color) {
            return;
        }
        let mut x = 0;
        let mut y = r;
        let mut decision = 1 - r;

        if filled {
            self.hspan(cx - r, cx + r, cy, color);
        } else {
            self.plot_octants(cx, cy, x, y, color);
        }

        while x < y {
            x += 1;
            if decision < 0 {
                decision += 2 * x + 1;
            } else {
                y -= 1;
                decision += 2 * (x - y) + 1;
            }

            if filled {
                self.hspan(cx - x, cx + x, cy + y, color);
                self.hspan(cx - x, cx + x, cy - y, color);
                self.hspan(cx - y, cx + y, cy + x, color);
                self.hspan(cx - y, cx + y, cy - x, color);
            } else {
                self.plot_octants(cx, cy, x, y, color);
            }
        }
    }

    /// Bresenham; the error term is kept doubled to stay in integers
    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: ColorIndex) {
        if !Self::valid_color(color) {
            return;
        }
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = if dx > dy { dx } else { -dy };
        let (mut x, mut y) = (x0, y0);

        loop {
            self.plot(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = err;
            if e2 > -2 * dx {
                err -= 2 * dy;
                x += sx;
            }
            if e2 < 2 * dy {
                err += 2 * dx;
                y += sy;
            }
        }
    }

    fn text(&mut self, s: &str, x: i32, y: i32, color: ColorIndex) {
        if !Self::valid_color(color) {
            return;
        }
        let mut pen = x;
        for rows in s.chars().filter_map(font::glyph) {
            for (dy, row) in rows.iter().enumerate() {
                for dx in 0..font::GLYPH_WIDTH {
                    if font::row_pixel(*row, dx) {
                        self.plot(pen + dx, y + dy as i32, color);
                    }
                }
            }
            pen += font::ADVANCE;
        }
    }

    fn sprite(&mut self, index: usize, x: i32, y: i32, w_tiles: u32, h_tiles: u32) {
        if index >= SPRITE_COUNT {
            log::warn!("Sprite {} is out of range", index);
            return;
        }
        let (sx, sy) = SpriteSheet::tile_origin(index);
        let w = w_tiles as i32 * TILE_SIZE;
        let h = h_tiles as i32 * TILE_SIZE;
        for dy in 0..h {
            for dx in 0..w {
                if let Some(color) = self.sprites.pixel(sx + dx, sy + dy) {
                    self.plot(x + dx, y + dy, color);
                }
            }
        }
    }
}
