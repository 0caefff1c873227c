//! Pico Runtime - Fixed-timestep game loop
//!
//! Provides the engine building blocks, independent of any window system:
//! - `LoopClock` — fixed-timestep accumulator with jitter smoothing
//! - `InputTracker` / `KeyBindings` — six-button edge/level tracking
//! - `MenuController` — the pause/options menu state machine
//! - `Engine` — the context object tying them together around a `Game`
//! - `EngineConfig` — layered TOML configuration

mod bindings;
mod clock;
mod config;
mod engine;
mod event;
mod event_bus;
mod game;
mod input;
mod menu;

#[cfg(test)]
mod testing;

pub use bindings::{KeyAction, KeyBindings};
pub use clock::{LoopClock, DEFAULT_RATE_HZ};
pub use config::{
    EngineConfig, InputConfig, LoopConfig, WindowConfig, MAX_LOGICAL_RATE_HZ, PROJECT_CONFIG_FILE,
};
pub use engine::{Engine, FrameStats};
pub use event::{EngineEvent, HostEvent};
pub use event_bus::EventBus;
pub use game::Game;
pub use input::{Button, GameInput, InputReader, InputTracker};
pub use menu::{items_for, volume_bar, MenuController, MenuState, DEFAULT_VOLUME, MAX_VOLUME};
