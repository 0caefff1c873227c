//! Pico Player — windowed host for Pico games
//!
//! Wires a [`Game`] to a winit window: keyboard, focus and gamepad events
//! become engine host events, and the canvas is presented through wgpu.

pub mod demo;
pub mod gamepad;
pub mod keymap;
mod player_app;

pub use player_app::PlayerApp;

use anyhow::Context;
use pico_render::{Canvas, SpriteSheet};
use pico_runtime::{Engine, EngineConfig, Game};
use winit::event_loop::{ControlFlow, EventLoop};

/// Open a window and run `game` until it closes or a game callback fails
pub fn run<G: Game>(game: G, sprites: SpriteSheet, config: EngineConfig) -> anyhow::Result<()> {
    let engine = Engine::from_config(&config).context("Invalid engine configuration")?;
    let canvas = Canvas::new(sprites);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = PlayerApp::new(engine, game, canvas, config);
    event_loop.run_app(&mut app)?;

    match app.take_error() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
