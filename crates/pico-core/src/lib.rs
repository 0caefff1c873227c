//! Pico Core - Foundational types for the Pico engine
//!
//! This crate provides the types that all other Pico crates depend on:
//! - `Renderer` - the primitive drawing contract games and the menu draw through
//! - `Palette`, `ColorIndex` - the fixed 16-colour palette
//! - Native canvas dimensions
//! - Error types and Result alias

mod draw;
mod error;
mod palette;

pub use draw::{Renderer, DEFAULT_COLOR, NATIVE_HEIGHT, NATIVE_WIDTH, TILE_SIZE};
pub use error::{PicoError, Result};
pub use palette::{ColorIndex, Palette, Rgb, PALETTE_SIZE};
