//! Downloadable asset descriptions and per-run provisioning state.
//!
//! Pure data: the provisioner in `application::services::provision` owns
//! all filesystem and network work.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::mode::SetupMode;

/// Name of the offline speech-recognition model used in offline-voice mode.
pub const VOSK_MODEL_NAME: &str = "vosk-model-small-en-us-0.15";

/// Download location of the offline speech-recognition model.
pub const VOSK_MODEL_URL: &str =
    "https://alphacephei.com/vosk/models/vosk-model-small-en-us-0.15.zip";

/// Anything smaller than this is a truncated download, not a model.
pub const VOSK_MODEL_MIN_SIZE: u64 = 1_000_000;

/// Directories every Vosk model contains once unpacked.
pub const VOSK_MODEL_ENTRIES: &[&str] = &["am", "conf", "graph", "ivector"];

/// Archive formats the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    Zip,
    TarGz,
}

impl ArchiveKind {
    /// Detect the archive format from the file name.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_ascii_lowercase();
        if name.ends_with(".zip") {
            Some(Self::Zip)
        } else if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Some(Self::TarGz)
        } else {
            None
        }
    }
}

/// One downloadable asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSpec {
    /// Short name used in messages and config overrides.
    pub name: String,
    /// Source URL (plain HTTP(S), no authentication).
    pub url: String,
    /// Where the downloaded file is kept.
    pub archive: PathBuf,
    /// Files smaller than this are treated as truncated or corrupted.
    pub min_size: u64,
    /// Directory the archive unpacks to; `None` for plain files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extract_dir: Option<PathBuf>,
    /// Entries that must exist inside `extract_dir` for it to count.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_entries: Vec<String>,
    /// Optional SHA-256 of the archive (lowercase hex).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

impl AssetSpec {
    /// The offline speech-recognition model, stored under `models_dir`.
    #[must_use]
    pub fn vosk_model(models_dir: &Path) -> Self {
        Self {
            name: VOSK_MODEL_NAME.to_string(),
            url: VOSK_MODEL_URL.to_string(),
            archive: models_dir.join(format!("{VOSK_MODEL_NAME}.zip")),
            min_size: VOSK_MODEL_MIN_SIZE,
            extract_dir: Some(models_dir.join(VOSK_MODEL_NAME)),
            required_entries: VOSK_MODEL_ENTRIES.iter().map(|e| (*e).to_string()).collect(),
            sha256: None,
        }
    }
}

/// Immutable input of one provisioning run.
#[derive(Debug, Clone)]
pub struct ProvisioningConfig {
    pub mode: SetupMode,
    /// Assets in the order they are provisioned.
    pub assets: Vec<AssetSpec>,
}

impl ProvisioningConfig {
    /// Default assets for `mode`, stored under `models_dir`.
    #[must_use]
    pub fn for_mode(mode: SetupMode, models_dir: &Path) -> Self {
        let assets = match mode {
            SetupMode::OfflineVoice => vec![AssetSpec::vosk_model(models_dir)],
            SetupMode::Simulation | SetupMode::Lite => Vec::new(),
        };
        Self { mode, assets }
    }

    /// Add configured assets; an entry with an existing name replaces it.
    #[must_use]
    pub fn with_overrides(mut self, overrides: &[AssetSpec]) -> Self {
        for asset in overrides {
            match self.assets.iter_mut().find(|a| a.name == asset.name) {
                Some(existing) => *existing = asset.clone(),
                None => self.assets.push(asset.clone()),
            }
        }
        self
    }
}

/// Observed state of one asset during a provisioning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetState {
    pub name: String,
    pub path: PathBuf,
    pub expected_min_size: u64,
    /// Size on disk, if the file exists.
    pub size: Option<u64>,
    pub present: bool,
    pub extracted: bool,
}

impl AssetState {
    /// Start tracking `spec`; nothing is known to be on disk yet.
    #[must_use]
    pub fn new(spec: &AssetSpec) -> Self {
        Self {
            name: spec.name.clone(),
            path: spec.archive.clone(),
            expected_min_size: spec.min_size,
            size: None,
            present: false,
            extracted: false,
        }
    }

    /// Record the file size seen on disk (`None` = missing).
    pub fn observe_size(&mut self, size: Option<u64>) {
        self.size = size;
        self.present = size.is_some();
    }

    /// `true` when the file exists but is too small to be valid.
    #[must_use]
    pub fn is_undersized(&self) -> bool {
        self.size.is_some_and(|s| s < self.expected_min_size)
    }

    /// An asset is ready only when it is present, extracted and big enough.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.present && self.extracted && !self.is_undersized()
    }
}
