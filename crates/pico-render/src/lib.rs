//! Pico Render - Software canvas and window presentation
//!
//! Games draw into a 128x128 palette-indexed [`Canvas`]. The [`Presenter`]
//! uploads it as a texture each frame and scales it, pixel-exact, into a
//! letterboxed region of the window.

mod canvas;
mod context;
pub mod font;
mod present;
mod sprite;
mod viewport;

pub use canvas::Canvas;
pub use context::{RenderContext, RenderError};
pub use present::Presenter;
pub use sprite::{parse_rows, SpriteRows, SpriteSheet, SHEET_SIZE, SHEET_TILES, SPRITE_COUNT};
pub use viewport::{fit_viewport, Viewport};
