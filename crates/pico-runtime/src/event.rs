//! Events flowing into and out of the game loop

/// Raw notifications delivered by the host window system.
///
/// Key codes use DOM `KeyboardEvent.code` names (`"ArrowLeft"`, `"KeyZ"`).
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    KeyDown { code: String, repeat: bool },
    KeyUp { code: String },
    FocusLost,
    FocusGained,
}

impl HostEvent {
    pub fn key_down(code: impl Into<String>) -> Self {
        HostEvent::KeyDown {
            code: code.into(),
            repeat: false,
        }
    }

    pub fn key_repeat(code: impl Into<String>) -> Self {
        HostEvent::KeyDown {
            code: code.into(),
            repeat: true,
        }
    }

    pub fn key_up(code: impl Into<String>) -> Self {
        HostEvent::KeyUp { code: code.into() }
    }
}

/// State changes published by the engine for the host to observe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    /// The pause menu opened
    Paused,
    /// The pause menu closed
    Resumed,
    SoundToggled(bool),
    /// Volume level in `0..=8`
    VolumeChanged(u8),
    /// "reset game" was chosen from the menu
    ResetRequested,
}
