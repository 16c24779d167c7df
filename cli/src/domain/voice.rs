//! Text-to-speech settings and voice descriptions.

use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

pub const DEFAULT_RATE: u32 = 150;
pub const MIN_RATE: u32 = 80;
pub const MAX_RATE: u32 = 400;

/// How lines are spoken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    /// Speech rate in words per minute.
    #[serde(default = "default_rate")]
    pub rate: u32,
    /// Volume between 0.0 and 1.0.
    #[serde(default = "default_volume")]
    pub volume: f32,
    /// Voice identifier as reported by the speech backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            rate: default_rate(),
            volume: default_volume(),
            name: None,
        }
    }
}

fn default_rate() -> u32 {
    DEFAULT_RATE
}

fn default_volume() -> f32 {
    1.0
}

impl VoiceSettings {
    /// Validate a speech rate.
    ///
    /// # Errors
    ///
    /// Returns an error if `rate` is outside `80..=400`.
    pub fn check_rate(rate: u32) -> Result<u32, ConfigError> {
        if (MIN_RATE..=MAX_RATE).contains(&rate) {
            Ok(rate)
        } else {
            Err(ConfigError::InvalidValue {
                key: "voice.rate".to_string(),
                value: rate.to_string(),
                valid: format!("{MIN_RATE}-{MAX_RATE} words per minute"),
            })
        }
    }

    /// Validate a volume.
    ///
    /// # Errors
    ///
    /// Returns an error if `volume` is outside `0.0..=1.0`.
    pub fn check_volume(volume: f32) -> Result<f32, ConfigError> {
        if (0.0..=1.0).contains(&volume) {
            Ok(volume)
        } else {
            Err(ConfigError::InvalidValue {
                key: "voice.volume".to_string(),
                value: volume.to_string(),
                valid: "0.0-1.0".to_string(),
            })
        }
    }
}

/// A voice offered by the speech backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Voice {
    /// Identifier passed back to the backend when selecting the voice.
    pub id: String,
    /// Display name.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}
