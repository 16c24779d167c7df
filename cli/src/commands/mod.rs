//! Command implementations

pub mod config;
pub mod lesson;
pub mod models;
pub mod say;
pub mod setup;
pub mod status;
pub mod version;

use std::path::PathBuf;

use clap::Args;

use crate::domain::{LabConfig, SetupMode};

/// Location flags shared by `setup`, `models` and `status`.
///
/// Each flag overrides the configured value for one run.
#[derive(Args, Debug, Clone, Default)]
pub struct LayoutArgs {
    /// Installation mode
    #[arg(long, value_enum)]
    pub mode: Option<SetupMode>,

    /// Directory of the virtual environment
    #[arg(long = "venv", value_name = "DIR")]
    pub venv_dir: Option<PathBuf>,

    /// Directory that holds downloaded models
    #[arg(long = "models", value_name = "DIR")]
    pub models_dir: Option<PathBuf>,
}

/// Effective layout after applying flags over configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub mode: SetupMode,
    pub venv_dir: PathBuf,
    pub models_dir: PathBuf,
}

impl LayoutArgs {
    #[must_use]
    pub fn resolve(&self, config: &LabConfig) -> Layout {
        Layout {
            mode: self.mode.unwrap_or(config.setup.mode),
            venv_dir: self
                .venv_dir
                .clone()
                .unwrap_or_else(|| config.setup.venv_dir.clone()),
            models_dir: self
                .models_dir
                .clone()
                .unwrap_or_else(|| config.setup.models_dir.clone()),
        }
    }
}
