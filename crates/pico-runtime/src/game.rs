//! The trait a game implements to be driven by the loop

use pico_core::{Renderer, Result};

use crate::input::GameInput;

/// User game code driven by [`Engine`](crate::Engine).
///
/// `update` runs once per logical step at the fixed rate, `draw` once per
/// host invocation after all due steps. Errors are returned straight to the
/// host; the loop does not catch them.
pub trait Game {
    /// Advance the simulation by one logical step
    fn update(&mut self, input: &GameInput<'_>) -> Result<()>;

    /// Render the current state
    fn draw(&mut self, renderer: &mut dyn Renderer) -> Result<()>;

    /// Return to the initial state. Called when "reset game" is chosen.
    fn reset(&mut self) -> Result<()> {
        Ok(())
    }

    /// Human-readable name, used for the window title and logs
    fn name(&self) -> &str {
        "pico"
    }
}
