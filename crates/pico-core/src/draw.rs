//! Drawing contract shared by games, the pause menu, and the canvas

use crate::palette::ColorIndex;

/// Size of one sprite tile in pixels
pub const TILE_SIZE: i32 = 8;

/// Native canvas width in pixels (16 tiles)
pub const NATIVE_WIDTH: u32 = (TILE_SIZE * 16) as u32;

/// Native canvas height in pixels (16 tiles)
pub const NATIVE_HEIGHT: u32 = (TILE_SIZE * 16) as u32;

/// Colour used when a game has no preference (light grey)
pub const DEFAULT_COLOR: ColorIndex = 6;

/// Primitive drawing operations in native canvas space.
///
/// Coordinates are native pixels, independent of how large the window is.
/// Implementations clip anything outside the canvas and treat invalid colour
/// or sprite indices as logged no-ops.
pub trait Renderer {
    /// Fill the whole canvas with `color` and make it the background colour
    fn clear_screen(&mut self, color: ColorIndex);

    /// One-pixel outline of a `w`×`h` rectangle with top-left corner at (x, y)
    fn rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: ColorIndex);

    /// Filled `w`×`h` rectangle with top-left corner at (x, y)
    fn rect_fill(&mut self, x: i32, y: i32, w: i32, h: i32, color: ColorIndex);

    /// Circle centred on (cx, cy)
    fn circle(&mut self, cx: i32, cy: i32, r: i32, color: ColorIndex, filled: bool);

    /// Line from (x0, y0) to (x1, y1), both endpoints included
    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: ColorIndex);

    /// Bitmap text with its top-left corner at (x, y)
    fn text(&mut self, s: &str, x: i32, y: i32, color: ColorIndex);

    /// Blit a block of `w_tiles`×`h_tiles` sprite tiles starting at `index`
    fn sprite(&mut self, index: usize, x: i32, y: i32, w_tiles: u32, h_tiles: u32);
}
