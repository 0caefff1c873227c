//! winit physical keys to host key code names
//!
//! winit's `KeyCode` variants follow the W3C `KeyboardEvent.code` names, so
//! each bindable key maps to the identically named string.

use winit::keyboard::KeyCode;

macro_rules! code_names {
    ($($variant:ident),* $(,)?) => {
        /// Key code name for a physical key, `None` for keys that cannot be bound
        pub fn code_name(key: KeyCode) -> Option<&'static str> {
            match key {
                $(KeyCode::$variant => Some(stringify!($variant)),)*
                _ => None,
            }
        }
    };
}

code_names!(
    ArrowLeft, ArrowRight, ArrowUp, ArrowDown,
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI, KeyJ, KeyK, KeyL, KeyM,
    KeyN, KeyO, KeyP, KeyQ, KeyR, KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,
    Digit0, Digit1, Digit2, Digit3, Digit4, Digit5, Digit6, Digit7, Digit8, Digit9,
    Enter, NumpadEnter, Space, Tab, Backspace,
    ShiftLeft, ShiftRight, ControlLeft, ControlRight, AltLeft, AltRight,
    Comma, Period, Slash, Semicolon, Quote, BracketLeft, BracketRight, Minus, Equal,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_binding_keys_have_names() {
        assert_eq!(code_name(KeyCode::ArrowLeft), Some("ArrowLeft"));
        assert_eq!(code_name(KeyCode::KeyZ), Some("KeyZ"));
        assert_eq!(code_name(KeyCode::KeyX), Some("KeyX"));
        assert_eq!(code_name(KeyCode::Enter), Some("Enter"));
    }

    #[test]
    fn test_player_shortcuts_are_not_bindable() {
        assert_eq!(code_name(KeyCode::Escape), None);
        assert_eq!(code_name(KeyCode::F11), None);
        assert_eq!(code_name(KeyCode::F12), None);
    }
}
