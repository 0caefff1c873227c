//! Host key code to logical action bindings

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use pico_core::{PicoError, Result};

use crate::input::Button;

/// What a bound key does when pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Drives one of the six logical button slots
    Button(Button),
    /// Activates the pause menu / selected menu item
    Confirm,
}

impl KeyAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyAction::Button(b) => b.as_str(),
            KeyAction::Confirm => "confirm",
        }
    }
}

impl fmt::Display for KeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyAction {
    type Err = PicoError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("confirm") {
            return Ok(KeyAction::Confirm);
        }
        s.parse::<Button>().map(KeyAction::Button)
    }
}

/// Maps host key codes (`"ArrowLeft"`, `"KeyZ"`, `"Enter"`, ...) to actions.
///
/// Codes follow the DOM `KeyboardEvent.code` naming so that every host
/// can translate its native key identifiers into the same vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBindings {
    map: HashMap<String, KeyAction>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut map = HashMap::new();
        map.insert("ArrowLeft".into(), KeyAction::Button(Button::Left));
        map.insert("ArrowRight".into(), KeyAction::Button(Button::Right));
        map.insert("ArrowUp".into(), KeyAction::Button(Button::Up));
        map.insert("ArrowDown".into(), KeyAction::Button(Button::Down));
        map.insert("KeyZ".into(), KeyAction::Button(Button::Primary));
        map.insert("KeyX".into(), KeyAction::Button(Button::Secondary));
        map.insert("Enter".into(), KeyAction::Confirm);
        Self { map }
    }
}

impl KeyBindings {
    /// Bindings with nothing mapped
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Default bindings overlaid with `code -> action name` entries
    pub fn with_overrides<'a, I>(overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut bindings = Self::default();
        for (code, action) in overrides {
            let action = action.parse::<KeyAction>().map_err(|_| {
                PicoError::ConfigError(format!(
                    "Unknown action '{}' bound to key '{}'",
                    action, code
                ))
            })?;
            bindings.bind(code.clone(), action);
        }
        Ok(bindings)
    }

    /// Bind a key code, replacing any previous binding for that code
    pub fn bind(&mut self, code: impl Into<String>, action: KeyAction) {
        self.map.insert(code.into(), action);
    }

    pub fn unbind(&mut self, code: &str) {
        self.map.remove(code);
    }

    pub fn lookup(&self, code: &str) -> Option<KeyAction> {
        self.map.get(code).copied()
    }

    /// All codes bound to `action`, sorted
    pub fn codes_for(&self, action: KeyAction) -> Vec<&str> {
        let mut codes: Vec<&str> = self
            .map
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(code, _)| code.as_str())
            .collect();
        codes.sort_unstable();
        codes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let b = KeyBindings::default();
        assert_eq!(b.lookup("ArrowLeft"), Some(KeyAction::Button(Button::Left)));
        assert_eq!(b.lookup("ArrowRight"), Some(KeyAction::Button(Button::Right)));
        assert_eq!(b.lookup("ArrowUp"), Some(KeyAction::Button(Button::Up)));
        assert_eq!(b.lookup("ArrowDown"), Some(KeyAction::Button(Button::Down)));
        assert_eq!(b.lookup("KeyZ"), Some(KeyAction::Button(Button::Primary)));
        assert_eq!(b.lookup("KeyX"), Some(KeyAction::Button(Button::Secondary)));
        assert_eq!(b.lookup("Enter"), Some(KeyAction::Confirm));
        assert_eq!(b.lookup("KeyQ"), None);
    }

    #[test]
    fn test_overrides_extend_defaults() {
        let mut overrides = std::collections::BTreeMap::new();
        overrides.insert("KeyA".to_string(), "left".to_string());
        overrides.insert("Space".to_string(), "confirm".to_string());

        let b = KeyBindings::with_overrides(&overrides).unwrap();
        assert_eq!(b.lookup("KeyA"), Some(KeyAction::Button(Button::Left)));
        assert_eq!(b.lookup("Space"), Some(KeyAction::Confirm));
        assert_eq!(b.codes_for(KeyAction::Button(Button::Left)), vec!["ArrowLeft", "KeyA"]);
    }

    #[test]
    fn test_unknown_action_rejected() {
        let mut overrides = std::collections::BTreeMap::new();
        overrides.insert("KeyA".to_string(), "jump".to_string());

        let err = KeyBindings::with_overrides(&overrides).unwrap_err();
        assert!(err.to_string().contains("jump"));
    }

    #[test]
    fn test_unbind() {
        let mut b = KeyBindings::default();
        b.unbind("Enter");
        assert_eq!(b.lookup("Enter"), None);
        assert!(KeyBindings::empty().lookup("ArrowLeft").is_none());
    }
}
