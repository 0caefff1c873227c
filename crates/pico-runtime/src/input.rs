//! Input state management
//!
//! Six logical buttons, each stored as a small bit set so a press and a
//! release landing between two logical steps are both still observable.

use std::fmt;
use std::str::FromStr;

use pico_core::{PicoError, Result};

use crate::bindings::{KeyAction, KeyBindings};

/// Held
const DOWN: u8 = 1;
/// Went down since the last logical step
const PRESSED: u8 = 2;
/// Went up since the last logical step
const RELEASED: u8 = 4;

/// The six logical buttons, indexed 0..=5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Button {
    Left,
    Right,
    Up,
    Down,
    Primary,
    Secondary,
}

impl Button {
    pub const COUNT: usize = 6;

    pub const ALL: [Button; Button::COUNT] = [
        Button::Left,
        Button::Right,
        Button::Up,
        Button::Down,
        Button::Primary,
        Button::Secondary,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Button::Left => "left",
            Button::Right => "right",
            Button::Up => "up",
            Button::Down => "down",
            Button::Primary => "primary",
            Button::Secondary => "secondary",
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Button {
    type Err = PicoError;

    fn from_str(s: &str) -> Result<Self> {
        Button::ALL
            .iter()
            .copied()
            .find(|b| b.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| PicoError::ConfigError(format!("Unknown button '{}'", s)))
    }
}

/// Read access to button state
pub trait InputReader {
    /// True while the button is held
    fn is_down(&self, button: Button) -> bool;
    /// True during the first logical step after the button went down
    fn was_pressed(&self, button: Button) -> bool;
}

/// Tracks the six button slots across host events and logical steps
pub struct InputTracker {
    slots: [u8; Button::COUNT],
    bindings: KeyBindings,
    focused: bool,
}

impl Default for InputTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl InputTracker {
    pub fn new() -> Self {
        Self::with_bindings(KeyBindings::default())
    }

    pub fn with_bindings(bindings: KeyBindings) -> Self {
        Self {
            slots: [0; Button::COUNT],
            bindings,
            focused: true,
        }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut KeyBindings {
        &mut self.bindings
    }

    /// Handle a host key-down. Auto-repeats and unbound codes are ignored.
    ///
    /// Returns the action the key triggered. A [`KeyAction::Confirm`] result
    /// is the caller's cue to drive the pause menu.
    pub fn on_key_down(&mut self, code: &str, repeat: bool) -> Option<KeyAction> {
        if repeat {
            return None;
        }
        let action = self.bindings.lookup(code)?;
        if let KeyAction::Button(button) = action {
            self.press(button);
        }
        Some(action)
    }

    /// Handle a host key-up. Returns the button that was released, if bound.
    pub fn on_key_up(&mut self, code: &str) -> Option<Button> {
        match self.bindings.lookup(code)? {
            KeyAction::Button(button) => {
                self.release(button);
                Some(button)
            }
            KeyAction::Confirm => None,
        }
    }

    /// Set a button held and record the press edge
    pub fn press(&mut self, button: Button) {
        self.slots[button.index()] = DOWN | PRESSED;
    }

    /// Clear the held bit and record the release edge. The press edge is kept
    /// until `end_step`, so a tap within one frame is still seen by `btnp`.
    pub fn release(&mut self, button: Button) {
        let slot = &mut self.slots[button.index()];
        *slot = (*slot & !DOWN) | RELEASED;
    }

    /// Track focus changes. Every focus loss drops every button, even when
    /// focus was already gone.
    pub fn set_focused(&mut self, focused: bool) {
        if !focused {
            log::debug!("Focus lost, clearing input");
            self.reset();
        }
        self.focused = focused;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Clear all slots
    pub fn reset(&mut self) {
        self.slots = [0; Button::COUNT];
    }

    /// Called before each logical step. Drops all input while unfocused.
    pub fn begin_step(&mut self) {
        if !self.focused {
            self.reset();
        }
    }

    /// Drop the press/release edges, keeping only the held bit
    pub fn end_step(&mut self) {
        for slot in &mut self.slots {
            *slot &= DOWN;
        }
    }

    pub fn was_released(&self, button: Button) -> bool {
        self.slots[button.index()] & RELEASED != 0
    }

    /// Raw slot bits for a button
    pub fn slot(&self, button: Button) -> u8 {
        self.slots[button.index()]
    }
}

impl InputReader for InputTracker {
    fn is_down(&self, button: Button) -> bool {
        self.slots[button.index()] & DOWN != 0
    }

    fn was_pressed(&self, button: Button) -> bool {
        self.slots[button.index()] & PRESSED != 0
    }
}

/// The input view handed to game code.
///
/// Every query answers false while the engine is paused, so game logic
/// never reacts to keys meant for the menu.
#[derive(Clone, Copy)]
pub struct GameInput<'a> {
    tracker: &'a InputTracker,
    paused: bool,
}

impl<'a> GameInput<'a> {
    pub fn new(tracker: &'a InputTracker, paused: bool) -> Self {
        Self { tracker, paused }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Held check by raw button id (0..=5)
    pub fn btn(&self, id: usize) -> bool {
        match Button::from_index(id) {
            Some(button) => self.is_down(button),
            None => {
                log::warn!("btn({}) is out of range, expected 0..{}", id, Button::COUNT);
                false
            }
        }
    }

    /// Press-edge check by raw button id (0..=5)
    pub fn btnp(&self, id: usize) -> bool {
        match Button::from_index(id) {
            Some(button) => self.was_pressed(button),
            None => {
                log::warn!("btnp({}) is out of range, expected 0..{}", id, Button::COUNT);
                false
            }
        }
    }

    pub fn was_released(&self, button: Button) -> bool {
        !self.paused && self.tracker.was_released(button)
    }
}

impl InputReader for GameInput<'_> {
    fn is_down(&self, button: Button) -> bool {
        !self.paused && self.tracker.is_down(button)
    }

    fn was_pressed(&self, button: Button) -> bool {
        !self.paused && self.tracker.was_pressed(button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_indices() {
        for (i, b) in Button::ALL.iter().enumerate() {
            assert_eq!(b.index(), i);
            assert_eq!(Button::from_index(i), Some(*b));
        }
        assert_eq!(Button::from_index(6), None);
    }

    #[test]
    fn test_button_parse() {
        assert_eq!("Primary".parse::<Button>().unwrap(), Button::Primary);
        assert!("fire".parse::<Button>().is_err());
    }

    #[test]
    fn test_press_sets_down_and_pressed() {
        let mut input = InputTracker::new();
        assert_eq!(input.on_key_down("KeyZ", false), Some(KeyAction::Button(Button::Primary)));

        assert!(input.is_down(Button::Primary));
        assert!(input.was_pressed(Button::Primary));
        assert_eq!(input.slot(Button::Primary), DOWN | PRESSED);
    }

    #[test]
    fn test_end_step_keeps_only_down() {
        let mut input = InputTracker::new();
        input.press(Button::Left);
        input.begin_step();
        input.end_step();

        assert!(input.is_down(Button::Left));
        assert!(!input.was_pressed(Button::Left));
        assert_eq!(input.slot(Button::Left), DOWN);
    }

    #[test]
    fn test_tap_between_steps_is_observed() {
        let mut input = InputTracker::new();
        input.on_key_down("ArrowUp", false);
        input.on_key_up("ArrowUp");

        // One step still sees the press, and the button is no longer held
        assert!(input.was_pressed(Button::Up));
        assert!(input.was_released(Button::Up));
        assert!(!input.is_down(Button::Up));

        input.end_step();
        assert_eq!(input.slot(Button::Up), 0);
    }

    #[test]
    fn test_repeat_is_ignored() {
        let mut input = InputTracker::new();
        input.on_key_down("ArrowDown", false);
        input.end_step();

        assert_eq!(input.on_key_down("ArrowDown", true), None);
        assert!(!input.was_pressed(Button::Down));
        assert!(input.is_down(Button::Down));
    }

    #[test]
    fn test_unbound_keys_ignored() {
        let mut input = InputTracker::new();
        assert_eq!(input.on_key_down("KeyQ", false), None);
        assert_eq!(input.on_key_up("KeyQ"), None);
        assert!(Button::ALL.iter().all(|b| input.slot(*b) == 0));
    }

    #[test]
    fn test_confirm_does_not_touch_slots() {
        let mut input = InputTracker::new();
        assert_eq!(input.on_key_down("Enter", false), Some(KeyAction::Confirm));
        assert_eq!(input.on_key_down("Enter", true), None);
        assert_eq!(input.on_key_up("Enter"), None);
        assert!(Button::ALL.iter().all(|b| input.slot(*b) == 0));
    }

    #[test]
    fn test_focus_loss_clears_everything() {
        let mut input = InputTracker::new();
        input.press(Button::Left);
        input.press(Button::Secondary);
        input.set_focused(false);

        assert!(!input.is_focused());
        assert!(Button::ALL.iter().all(|b| input.slot(*b) == 0));

        input.set_focused(true);
        assert!(input.is_focused());
    }

    #[test]
    fn test_repeated_focus_loss_clears_stray_press() {
        let mut input = InputTracker::new();
        input.set_focused(false);
        input.on_key_down("KeyZ", false);
        input.set_focused(false);

        assert!(!input.is_down(Button::Primary));
        assert!(!input.was_pressed(Button::Primary));
        assert_eq!(input.slot(Button::Primary), 0);
    }

    #[test]
    fn test_rebinding_through_bindings_mut() {
        let mut input = InputTracker::new();
        input.bindings_mut().bind("KeyW", KeyAction::Button(Button::Up));
        input.bindings_mut().unbind("ArrowUp");

        assert_eq!(input.on_key_down("ArrowUp", false), None);
        assert_eq!(
            input.on_key_down("KeyW", false),
            Some(KeyAction::Button(Button::Up))
        );
        assert!(input.is_down(Button::Up));
    }

    #[test]
    fn test_begin_step_clears_while_unfocused() {
        let mut input = InputTracker::new();
        input.set_focused(false);
        // A stray event delivered after focus loss is dropped at step start
        input.press(Button::Right);
        input.begin_step();
        assert_eq!(input.slot(Button::Right), 0);
    }

    #[test]
    fn test_game_input_gated_while_paused() {
        let mut input = InputTracker::new();
        input.press(Button::Primary);

        let live = GameInput::new(&input, false);
        assert!(live.is_down(Button::Primary));
        assert!(live.btnp(4));

        let gated = GameInput::new(&input, true);
        assert!(!gated.is_down(Button::Primary));
        assert!(!gated.was_pressed(Button::Primary));
        assert!(!gated.btn(4));
        // The tracker itself still reports the press for the menu
        assert!(input.was_pressed(Button::Primary));
    }

    #[test]
    fn test_raw_ids_out_of_range() {
        let mut input = InputTracker::new();
        input.press(Button::Left);
        let view = GameInput::new(&input, false);
        assert!(view.btn(0));
        assert!(!view.btn(6));
        assert!(!view.btnp(99));
    }
}
