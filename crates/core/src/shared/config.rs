use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::constants::{
    BLINK_THRESHOLD, BOX_STROKE_WIDTH, CENTER_TOLERANCE, CONFIG_DIR_NAME, CONFIG_FILE_NAME,
    DEFAULT_DEBOUNCE_MS, MAX_MESSAGE_REPEATS, SMILE_THRESHOLD,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: f32,
        max: f32,
        value: f32,
    },
    #[error("max_message_repeats must be at least 1")]
    ZeroRepeats,
}

/// Tunable thresholds for frame evaluation and notification pacing.
///
/// Every field falls back to its default when absent from the JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LivenessConfig {
    pub smile_threshold: f32,
    pub blink_threshold: f32,
    pub center_tolerance: f32,
    pub max_message_repeats: u32,
    pub debounce_ms: u64,
    pub stroke_width: f32,
}

impl Default for LivenessConfig {
    fn default() -> Self {
        Self {
            smile_threshold: SMILE_THRESHOLD,
            blink_threshold: BLINK_THRESHOLD,
            center_tolerance: CENTER_TOLERANCE,
            max_message_repeats: MAX_MESSAGE_REPEATS,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            stroke_width: BOX_STROKE_WIDTH,
        }
    }
}

impl LivenessConfig {
    /// `<config_dir>/livecheck/config.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the config from the default location, falling back to defaults
    /// when the file is missing or unusable.
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring config at {}: {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(write_err)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("smile_threshold", self.smile_threshold, 0.0, 1.0)?;
        check_range("blink_threshold", self.blink_threshold, 0.0, 1.0)?;
        check_range("center_tolerance", self.center_tolerance, 0.0, 0.5)?;
        check_range("stroke_width", self.stroke_width, 0.0, f32::MAX)?;
        if self.max_message_repeats == 0 {
            return Err(ConfigError::ZeroRepeats);
        }
        Ok(())
    }

    pub fn debounce_interval(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

fn check_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            min,
            max,
            value,
        })
    }
}
