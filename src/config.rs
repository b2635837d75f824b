//! Runtime tunables and their TOML loading.

use crate::input::queue::DEFAULT_QUEUE_CAPACITY;
use crate::input::swipe::DEFAULT_DRAG_INTERVAL;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Error raised while loading a configuration file.
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Io(std::io::Error),
    /// The file is not valid TOML for the expected structure.
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Config I/O error: {}", e),
            ConfigError::Parse(msg) => write!(f, "Config parse error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

/// Gesture recognizer thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Half-width of the tap square in pixels.
    pub tap_square_size: f32,
    /// Seconds a finger must rest inside the tap square to long-press.
    pub long_press_seconds: f32,
    /// Max seconds between taps that still count as consecutive.
    pub tap_count_interval: f32,
    /// Max seconds between the last drag sample and release for a fling.
    pub max_fling_delay: f32,
    /// Displacement in pixels before a drag is classified as a swipe.
    pub swipe_drag_interval: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_square_size: 20.0,
            long_press_seconds: 1.1,
            tap_count_interval: 0.0,
            max_fling_delay: 0.0,
            swipe_drag_interval: DEFAULT_DRAG_INTERVAL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Capacity of the event queue before the oldest events are dropped.
    pub queue_capacity: usize,
    /// Queue raw touch/mouse/key events alongside recognized gestures.
    pub forward_raw: bool,
    /// How often the input thread polls the long-press timer, in ms.
    pub poll_interval_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            forward_raw: true,
            poll_interval_ms: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogicConfig {
    /// Target ticks per second for the logic thread.
    pub ticks_per_second: u32,
    /// Cap on catch-up ticks per loop iteration.
    pub max_catch_up_ticks: u32,
}

impl Default for LogicConfig {
    fn default() -> Self {
        Self {
            ticks_per_second: 60,
            max_catch_up_ticks: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub gesture: GestureConfig,
    pub input: InputConfig,
    pub logic: LogicConfig,
}

impl RuntimeConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        load_toml(path)
    }

    /// Loads `path`, falling back to defaults if it is missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::info!("CONFIG: {:?} not found, using defaults", path);
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("CONFIG: {}, using defaults", e);
            Self::default()
        })
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(data) => Ok(data),
        Err(e) => {
            log::error!("CONFIG: Failed to parse TOML file {:?}: {}", path, e);
            Err(ConfigError::Parse(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = RuntimeConfig::from_toml_str(
            r#"
            [gesture]
            tap_count_interval = 0.4
            max_fling_delay = 0.15

            [logic]
            ticks_per_second = 120
            "#,
        )
        .unwrap();
        assert_eq!(config.gesture.tap_count_interval, 0.4);
        assert_eq!(config.gesture.max_fling_delay, 0.15);
        assert_eq!(config.gesture.tap_square_size, 20.0);
        assert_eq!(config.gesture.long_press_seconds, 1.1);
        assert_eq!(config.gesture.swipe_drag_interval, 200.0);
        assert_eq!(config.logic.ticks_per_second, 120);
        assert_eq!(config.input, InputConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = RuntimeConfig::from_toml_str("[gesture\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_roundtrip_through_string() {
        let config = RuntimeConfig::default();
        let text = config.to_toml_string().unwrap();
        assert_eq!(RuntimeConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = RuntimeConfig::load_or_default(Path::new("does/not/exist.toml"));
        assert_eq!(config, RuntimeConfig::default());
    }
}
