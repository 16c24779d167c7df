//! Domain types and validators for reachy-lab configuration.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::asset::AssetSpec;
use crate::domain::error::ConfigError;
use crate::domain::mode::SetupMode;
use crate::domain::voice::VoiceSettings;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "setup.mode",
    "setup.python",
    "setup.venv_dir",
    "setup.models_dir",
    "voice.rate",
    "voice.volume",
    "voice.name",
];

/// Keys whose value may be cleared with `none`.
const CLEARABLE_KEYS: &[&str] = &["setup.python", "voice.name"];

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.reachy-lab/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LabConfig {
    pub setup: SetupConfig,
    pub voice: VoiceSettings,
    /// Extra assets, or replacements for defaults with the same name.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub assets: Vec<AssetSpec>,
}

/// Environment setup settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupConfig {
    pub mode: SetupMode,
    /// Interpreter used to create the environment; platform default if unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub python: Option<String>,
    pub venv_dir: PathBuf,
    pub models_dir: PathBuf,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            mode: SetupMode::default(),
            python: None,
            venv_dir: PathBuf::from(".venv"),
            models_dir: PathBuf::from("models"),
        }
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    let mut scratch = LabConfig::default();
    apply_setting(&mut scratch, key, value)
}

/// Parse `value` and store it under `key`.
///
/// # Errors
///
/// Returns an error if the key is unknown or the value does not parse.
pub fn apply_setting(config: &mut LabConfig, key: &str, value: &str) -> Result<()> {
    validate_config_key(key)?;
    let invalid = |valid: &str| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        valid: valid.to_string(),
    };

    if value.trim().is_empty() {
        return Err(invalid("a non-empty value").into());
    }
    let cleared = CLEARABLE_KEYS.contains(&key) && value == "none";

    match key {
        "setup.mode" => config.setup.mode = value.parse()?,
        "setup.python" => config.setup.python = (!cleared).then(|| value.to_string()),
        "setup.venv_dir" => config.setup.venv_dir = PathBuf::from(value),
        "setup.models_dir" => config.setup.models_dir = PathBuf::from(value),
        "voice.rate" => {
            let rate: u32 = value.parse().map_err(|_| invalid("a whole number"))?;
            config.voice.rate = VoiceSettings::check_rate(rate)?;
        }
        "voice.volume" => {
            let volume: f32 = value.parse().map_err(|_| invalid("0.0-1.0"))?;
            config.voice.volume = VoiceSettings::check_volume(volume)?;
        }
        "voice.name" => config.voice.name = (!cleared).then(|| value.to_string()),
        _ => unreachable!("validated above"),
    }
    Ok(())
}

/// Flatten the settable keys into `(key, display value)` pairs.
#[must_use]
pub fn config_entries(config: &LabConfig) -> Vec<(&'static str, String)> {
    let or_default = |v: &Option<String>| v.clone().unwrap_or_else(|| "(default)".to_string());
    vec![
        ("setup.mode", config.setup.mode.to_string()),
        ("setup.python", or_default(&config.setup.python)),
        ("setup.venv_dir", config.setup.venv_dir.display().to_string()),
        ("setup.models_dir", config.setup.models_dir.display().to_string()),
        ("voice.rate", config.voice.rate.to_string()),
        ("voice.volume", config.voice.volume.to_string()),
        ("voice.name", or_default(&config.voice.name)),
    ]
}

// ── Unit tests ───────────────────────────────────────────────────────────────
