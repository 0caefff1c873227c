//! Pause menu state machine.
//!
//! The menu opens on confirm and owns the paused flag: the engine is paused
//! exactly when the menu is not [`MenuState::Disabled`]. Navigation reads the
//! raw button state, since game-facing input is gated while paused.

use pico_core::Renderer;

use crate::event::EngineEvent;
use crate::input::{Button, InputReader};

pub const MAX_VOLUME: u8 = 8;
pub const DEFAULT_VOLUME: u8 = 4;

/// Panel geometry in canvas pixels
const PANEL_X: i32 = 23;
const PANEL_Y: i32 = 43;
const PANEL_W: i32 = 80;
const PANEL_H: i32 = 36;
const CURSOR_X: i32 = 27;
const ITEM_X: i32 = 32;
const FIRST_ROW_Y: i32 = 50;
const ROW_HEIGHT: i32 = 8;
const PANEL_BG: u8 = 0;
const PANEL_FG: u8 = 7;

const MAIN_CONTINUE: usize = 0;
const MAIN_OPTIONS: usize = 1;
const MAIN_RESET: usize = 2;
const OPTIONS_SOUND: usize = 0;
const OPTIONS_VOLUME: usize = 1;
const OPTIONS_BACK: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Disabled,
    Main,
    Options,
}

/// `"0"` per volume level followed by `"-"` up to [`MAX_VOLUME`]
pub fn volume_bar(volume: u8) -> String {
    let filled = volume.min(MAX_VOLUME) as usize;
    let mut bar = "0".repeat(filled);
    bar.push_str(&"-".repeat(MAX_VOLUME as usize - filled));
    bar
}

/// Labels shown for a menu state
pub fn items_for(state: MenuState, sound_enabled: bool, volume: u8) -> Vec<String> {
    match state {
        MenuState::Disabled => Vec::new(),
        MenuState::Main => vec!["continue".into(), "options".into(), "reset game".into()],
        MenuState::Options => vec![
            if sound_enabled { "sound: on" } else { "sound: off" }.into(),
            format!("volume: {}", volume_bar(volume)),
            "back".into(),
        ],
    }
}

/// Owns menu state, the selection cursor and the sound settings
pub struct MenuController {
    state: MenuState,
    selected: usize,
    sound_enabled: bool,
    volume: u8,
}

impl Default for MenuController {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuController {
    pub fn new() -> Self {
        Self {
            state: MenuState::Disabled,
            selected: 0,
            sound_enabled: true,
            volume: DEFAULT_VOLUME,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.state != MenuState::Disabled
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn items(&self) -> Vec<String> {
        items_for(self.state, self.sound_enabled, self.volume)
    }

    fn item_count(&self) -> usize {
        match self.state {
            MenuState::Disabled => 0,
            MenuState::Main | MenuState::Options => 3,
        }
    }

    fn enter(&mut self, state: MenuState) {
        log::debug!("Menu {:?} -> {:?}", self.state, state);
        self.state = state;
        self.selected = 0;
    }

    /// Activate the current selection, or open the menu when closed.
    ///
    /// Returns the setting or request that resulted, if any. Pausing and
    /// resuming are observable through [`is_paused`](Self::is_paused).
    pub fn handle_confirm(&mut self) -> Option<EngineEvent> {
        debug_assert!(self.state == MenuState::Disabled || self.selected < self.item_count());

        match (self.state, self.selected) {
            (MenuState::Disabled, _) => {
                self.enter(MenuState::Main);
                None
            }
            (MenuState::Main, MAIN_CONTINUE) => {
                self.enter(MenuState::Disabled);
                None
            }
            (MenuState::Main, MAIN_OPTIONS) => {
                self.enter(MenuState::Options);
                None
            }
            (MenuState::Main, MAIN_RESET) => {
                self.enter(MenuState::Disabled);
                Some(EngineEvent::ResetRequested)
            }
            (MenuState::Options, OPTIONS_SOUND) => {
                self.sound_enabled = !self.sound_enabled;
                Some(EngineEvent::SoundToggled(self.sound_enabled))
            }
            (MenuState::Options, OPTIONS_BACK) => {
                self.enter(MenuState::Main);
                None
            }
            // Volume is adjusted with left/right, confirm does nothing there
            _ => None,
        }
    }

    /// One paused step of navigation. Returns a volume change, if any.
    pub fn update(&mut self, input: &dyn InputReader) -> Option<EngineEvent> {
        let count = self.item_count();
        if count == 0 {
            return None;
        }

        if input.was_pressed(Button::Up) {
            self.selected = if self.selected == 0 { count - 1 } else { self.selected - 1 };
        }
        if input.was_pressed(Button::Down) {
            self.selected = (self.selected + 1) % count;
        }

        if self.state == MenuState::Options && self.selected == OPTIONS_VOLUME {
            let before = self.volume;
            if input.was_pressed(Button::Left) {
                self.volume = self.volume.saturating_sub(1);
            }
            if input.was_pressed(Button::Right) {
                self.volume = (self.volume + 1).min(MAX_VOLUME);
            }
            if self.volume != before {
                return Some(EngineEvent::VolumeChanged(self.volume));
            }
        }
        None
    }

    /// Draw the panel, cursor and items
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        renderer.rect_fill(PANEL_X, PANEL_Y, PANEL_W, PANEL_H, PANEL_BG);
        renderer.rect(PANEL_X, PANEL_Y, PANEL_W, PANEL_H, PANEL_FG);

        renderer.text("~", CURSOR_X, FIRST_ROW_Y + self.selected as i32 * ROW_HEIGHT, PANEL_FG);

        for (row, item) in self.items().iter().enumerate() {
            let nudge = if row == self.selected { 1 } else { 0 };
            renderer.text(
                item,
                ITEM_X + nudge,
                FIRST_ROW_Y + row as i32 * ROW_HEIGHT,
                PANEL_FG,
            );
        }
    }
}
