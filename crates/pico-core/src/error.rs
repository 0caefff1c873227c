//! Error types for Pico

use thiserror::Error;

/// The main error type for Pico operations
#[derive(Debug, Error)]
pub enum PicoError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Invalid sprite {index}: {reason}")]
    InvalidSprite { index: usize, reason: String },

    #[error("Render error: {0}")]
    RenderError(String),
}

/// Result type alias for Pico operations
pub type Result<T> = std::result::Result<T, PicoError>;

impl From<toml::de::Error> for PicoError {
    fn from(err: toml::de::Error) -> Self {
        PicoError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for PicoError {
    fn from(err: toml::ser::Error) -> Self {
        PicoError::TomlSerError(err.to_string())
    }
}
