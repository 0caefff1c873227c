//! Layered engine configuration
//!
//! Config is loaded with four layers of precedence (highest wins):
//! 1. Environment variables: `PICO_LOGICAL_RATE_HZ`, `PICO_SHOW_FPS`, `PICO_FULLSCREEN`
//! 2. An explicit path, or project-local `pico.toml`
//! 3. Global: `~/.pico/config.toml`
//! 4. Built-in defaults

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use pico_core::{PicoError, Result};
use serde::{Deserialize, Serialize};

use crate::bindings::KeyBindings;

/// Project-local config file name
pub const PROJECT_CONFIG_FILE: &str = "pico.toml";

/// Highest accepted logical rate. Faster rates turn one clamped frame delta
/// into an unbounded number of updates.
pub const MAX_LOGICAL_RATE_HZ: f64 = 1000.0;

/// Timing parameters for the game loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoopConfig {
    #[serde(default = "default_logical_rate_hz")]
    pub logical_rate_hz: f64,
    #[serde(default = "default_smoothing_window_ms")]
    pub smoothing_window_ms: f64,
    #[serde(default = "default_fps_smoothing")]
    pub fps_smoothing: f64,
    #[serde(default = "default_max_frame_delta_ms")]
    pub max_frame_delta_ms: f64,
    #[serde(default = "default_true")]
    pub show_fps: bool,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            logical_rate_hz: default_logical_rate_hz(),
            smoothing_window_ms: default_smoothing_window_ms(),
            fps_smoothing: default_fps_smoothing(),
            max_frame_delta_ms: default_max_frame_delta_ms(),
            show_fps: true,
        }
    }
}

fn default_logical_rate_hz() -> f64 {
    60.0
}
fn default_smoothing_window_ms() -> f64 {
    9.0
}
fn default_fps_smoothing() -> f64 {
    0.05
}
fn default_max_frame_delta_ms() -> f64 {
    250.0
}
fn default_true() -> bool {
    true
}

/// Host window presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_title")]
    pub title: String,
    /// Share of the limiting window dimension the canvas may cover
    #[serde(default = "default_fill_fraction")]
    pub fill_fraction: f64,
    #[serde(default = "default_max_scale")]
    pub max_scale: u32,
    #[serde(default)]
    pub fullscreen: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            fill_fraction: default_fill_fraction(),
            max_scale: default_max_scale(),
            fullscreen: false,
        }
    }
}

fn default_title() -> String {
    "Pico".to_string()
}
fn default_fill_fraction() -> f64 {
    0.9
}
fn default_max_scale() -> u32 {
    10
}

/// Extra key bindings layered over the defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Key code name -> `left|right|up|down|primary|secondary|confirm`
    #[serde(default)]
    pub bindings: BTreeMap<String, String>,
}

/// Resolved engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default, rename = "loop")]
    pub game_loop: LoopConfig,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub input: InputConfig,
}

impl EngineConfig {
    /// Load config with layered precedence: defaults < global < project (or
    /// `explicit`) < env vars. An explicit path must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut merged = toml::Table::new();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                log::info!("Loading global config from {}", global_path.display());
                merge_tables(&mut merged, Self::read_table(&global_path)?);
            }
        }

        match explicit {
            Some(path) => {
                log::info!("Loading config from {}", path.display());
                merge_tables(&mut merged, Self::read_table(path)?);
            }
            None => {
                let local_path = PathBuf::from(PROJECT_CONFIG_FILE);
                if local_path.exists() {
                    log::info!("Loading project config from {}", local_path.display());
                    merge_tables(&mut merged, Self::read_table(&local_path)?);
                }
            }
        }

        let mut config: EngineConfig = toml::Value::Table(merged).try_into()?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load a single file over the defaults, without env overrides
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Apply `PICO_*` overrides read through `lookup`
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("PICO_LOGICAL_RATE_HZ") {
            self.game_loop.logical_rate_hz = raw.trim().parse().map_err(|_| {
                PicoError::ConfigError(format!("PICO_LOGICAL_RATE_HZ is not a number: '{}'", raw))
            })?;
        }
        if let Some(raw) = lookup("PICO_SHOW_FPS") {
            self.game_loop.show_fps = parse_flag("PICO_SHOW_FPS", &raw)?;
        }
        if let Some(raw) = lookup("PICO_FULLSCREEN") {
            self.window.fullscreen = parse_flag("PICO_FULLSCREEN", &raw)?;
        }
        Ok(())
    }

    /// Reject values the loop or presenter cannot work with
    pub fn validate(&self) -> Result<()> {
        let l = &self.game_loop;
        if !(l.logical_rate_hz.is_finite() && l.logical_rate_hz > 0.0) {
            return Err(PicoError::ConfigError(format!(
                "loop.logical_rate_hz must be positive, got {}",
                l.logical_rate_hz
            )));
        }
        if l.logical_rate_hz > MAX_LOGICAL_RATE_HZ {
            return Err(PicoError::ConfigError(format!(
                "loop.logical_rate_hz must be at most {}, got {}",
                MAX_LOGICAL_RATE_HZ, l.logical_rate_hz
            )));
        }
        if l.smoothing_window_ms.is_nan() || l.smoothing_window_ms < 0.0 {
            return Err(PicoError::ConfigError(format!(
                "loop.smoothing_window_ms must not be negative, got {}",
                l.smoothing_window_ms
            )));
        }
        if !(0.0..=1.0).contains(&l.fps_smoothing) {
            return Err(PicoError::ConfigError(format!(
                "loop.fps_smoothing must be within [0, 1], got {}",
                l.fps_smoothing
            )));
        }
        if l.max_frame_delta_ms.is_nan() || l.max_frame_delta_ms <= 0.0 {
            return Err(PicoError::ConfigError(format!(
                "loop.max_frame_delta_ms must be positive, got {}",
                l.max_frame_delta_ms
            )));
        }

        let w = &self.window;
        if w.fill_fraction.is_nan() || w.fill_fraction <= 0.0 || w.fill_fraction > 1.0 {
            return Err(PicoError::ConfigError(format!(
                "window.fill_fraction must be within (0, 1], got {}",
                w.fill_fraction
            )));
        }
        if w.max_scale == 0 {
            return Err(PicoError::ConfigError(
                "window.max_scale must be at least 1".to_string(),
            ));
        }

        self.key_bindings().map(|_| ())
    }

    /// Default bindings overlaid with the `[input]` table
    pub fn key_bindings(&self) -> Result<KeyBindings> {
        KeyBindings::with_overrides(&self.input.bindings)
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".pico").join("config.toml"))
    }

    fn read_table(path: &Path) -> Result<toml::Table> {
        let content = std::fs::read_to_string(path)?;
        content.parse::<toml::Table>().map_err(|e| {
            PicoError::TomlParseError(format!("Failed to parse config {}: {}", path.display(), e))
        })
    }
}

fn parse_flag(name: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(PicoError::ConfigError(format!(
            "{} must be a boolean, got '{}'",
            name, raw
        ))),
    }
}

/// Recursively overlay `overlay` onto `base`; nested tables merge key by key
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::KeyAction;
    use crate::input::Button;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.game_loop.logical_rate_hz, 60.0);
        assert_eq!(config.game_loop.smoothing_window_ms, 9.0);
        assert_eq!(config.game_loop.fps_smoothing, 0.05);
        assert!(config.game_loop.show_fps);
        assert_eq!(config.window.fill_fraction, 0.9);
        assert_eq!(config.window.max_scale, 10);
        assert!(!config.window.fullscreen);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
[loop]
show_fps = false

[input.bindings]
KeyA = "left"
"#,
        )
        .unwrap();

        assert!(!config.game_loop.show_fps);
        assert_eq!(config.game_loop.logical_rate_hz, 60.0);
        assert_eq!(config.window.title, "Pico");

        let bindings = config.key_bindings().unwrap();
        assert_eq!(bindings.lookup("KeyA"), Some(KeyAction::Button(Button::Left)));
        assert_eq!(bindings.lookup("ArrowLeft"), Some(KeyAction::Button(Button::Left)));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = EngineConfig::default();
        config.game_loop.logical_rate_hz = 0.0;
        assert!(matches!(config.validate(), Err(PicoError::ConfigError(_))));

        let mut config = EngineConfig::default();
        config.game_loop.logical_rate_hz = 1.0e6;
        assert!(matches!(config.validate(), Err(PicoError::ConfigError(_))));
        config.game_loop.logical_rate_hz = MAX_LOGICAL_RATE_HZ;
        assert!(config.validate().is_ok());

        let mut config = EngineConfig::default();
        config.window.fill_fraction = 1.5;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.window.max_scale = 0;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.input.bindings.insert("KeyA".into(), "jump".into());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unparseable_file() {
        assert!(matches!(
            EngineConfig::from_toml_str("[loop\nshow_fps = "),
            Err(PicoError::TomlParseError(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("PICO_LOGICAL_RATE_HZ", "30"),
            ("PICO_SHOW_FPS", "off"),
            ("PICO_FULLSCREEN", "1"),
        ]
        .into_iter()
        .collect();

        let mut config = EngineConfig::default();
        config
            .apply_env_overrides(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.game_loop.logical_rate_hz, 30.0);
        assert!(!config.game_loop.show_fps);
        assert!(config.window.fullscreen);
    }

    #[test]
    fn test_env_override_bad_value() {
        let mut config = EngineConfig::default();
        let err = config
            .apply_env_overrides(|k| (k == "PICO_SHOW_FPS").then(|| "maybe".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("PICO_SHOW_FPS"));
    }

    #[test]
    fn test_merge_tables_is_deep() {
        let mut base: toml::Table = "[loop]\nshow_fps = false\nlogical_rate_hz = 30.0\n"
            .parse()
            .unwrap();
        let overlay: toml::Table = "[loop]\nlogical_rate_hz = 120.0\n[window]\ntitle = \"x\"\n"
            .parse()
            .unwrap();
        merge_tables(&mut base, overlay);

        let config: EngineConfig = toml::Value::Table(base).try_into().unwrap();
        assert!(!config.game_loop.show_fps);
        assert_eq!(config.game_loop.logical_rate_hz, 120.0);
        assert_eq!(config.window.title, "x");
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = std::env::temp_dir().join("pico_config_test_explicit");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("custom.toml");
        std::fs::write(&path, "[window]\ntitle = \"Custom\"\nmax_scale = 4\n").unwrap();

        let config = EngineConfig::load_from_file(&path).unwrap();
        assert_eq!(config.window.title, "Custom");
        assert_eq!(config.window.max_scale, 4);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let path = std::env::temp_dir().join("pico_config_test_missing/none.toml");
        assert!(matches!(
            EngineConfig::load(Some(&path)),
            Err(PicoError::IoError(_))
        ));
    }

    #[test]
    fn test_round_trip_through_toml() {
        let mut config = EngineConfig::default();
        config.window.title = "Round".into();
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("[loop]"));
        assert_eq!(EngineConfig::from_toml_str(&text).unwrap(), config);
    }
}
