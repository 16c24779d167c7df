//! Application service: read-only environment report.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::application::ports::LocalFs;
use crate::application::services::bootstrap::venv_python;
use crate::application::services::provision::inspect;
use crate::domain::{AssetSpec, AssetState, ProvisioningConfig, SetupMode};

/// What `status` reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabStatus {
    pub mode: SetupMode,
    pub venv_dir: PathBuf,
    pub venv_python: PathBuf,
    /// The environment's interpreter exists.
    pub venv_ready: bool,
    pub assets: Vec<AssetState>,
}

impl LabStatus {
    /// Ready to run: interpreter present and every asset ready.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.venv_ready && self.assets.iter().all(AssetState::is_ready)
    }
}

/// Observe the environment for `mode` without touching anything.
///
/// # Errors
///
/// Returns an error if an asset's size cannot be read.
pub fn collect(
    fs: &impl LocalFs,
    mode: SetupMode,
    venv_dir: &Path,
    models_dir: &Path,
    overrides: &[AssetSpec],
) -> Result<LabStatus> {
    let config = ProvisioningConfig::for_mode(mode, models_dir).with_overrides(overrides);
    let venv_python = venv_python(venv_dir);
    Ok(LabStatus {
        mode,
        venv_dir: venv_dir.to_path_buf(),
        venv_ready: fs.exists(&venv_python),
        venv_python,
        assets: inspect(&config, fs)?,
    })
}
