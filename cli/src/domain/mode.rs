//! Setup mode and the dependency tier each mode installs.
//!
//! Pure data: no I/O.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

/// Which robot backend the environment is prepared for.
///
/// The modes are mutually exclusive and each installs exactly its own
/// dependency tier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum SetupMode {
    /// Simulator with physics (MuJoCo).
    Simulation,
    /// Reachy Mini Lite over USB.
    #[default]
    Lite,
    /// Reachy Mini Lite with offline speech in and out.
    OfflineVoice,
}

/// Every mode, in the order shown to users.
pub const ALL_MODES: [SetupMode; 3] = [
    SetupMode::Simulation,
    SetupMode::Lite,
    SetupMode::OfflineVoice,
];

impl SetupMode {
    /// Stable identifier used on the command line and in config files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Simulation => "simulation",
            Self::Lite => "lite",
            Self::OfflineVoice => "offline-voice",
        }
    }

    /// Human name of the dependency tier, used in the completion summary.
    #[must_use]
    pub fn tier_name(self) -> &'static str {
        match self {
            Self::Simulation => "simulation (physics)",
            Self::Lite => "lite (USB)",
            Self::OfflineVoice => "offline voice (USB + TTS/STT)",
        }
    }

    /// Python packages installed for this mode.
    #[must_use]
    pub fn packages(self) -> &'static [&'static str] {
        match self {
            Self::Simulation => &["reachy-mini[mujoco]", "numpy"],
            Self::Lite => &["reachy-mini", "numpy", "pyttsx3"],
            Self::OfflineVoice => &["reachy-mini", "numpy", "pyttsx3", "vosk", "sounddevice"],
        }
    }
}

impl fmt::Display for SetupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SetupMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_MODES
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| ConfigError::InvalidValue {
                key: "setup.mode".to_string(),
                value: s.to_string(),
                valid: ALL_MODES.map(SetupMode::as_str).join(", "),
            })
    }
}
