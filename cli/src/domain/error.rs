//! Typed domain error enums.
//!
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator. `main` downcasts to pick the process exit code.

use std::path::PathBuf;

use thiserror::Error;

// ── Provisioning errors ───────────────────────────────────────────────────────

/// Terminal failures of the asset provisioner.
///
/// Every variant is raised only after the partial artifact it concerns has
/// been removed, so a rerun starts from a clean state.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error(
        "Download of {name} failed: {reason}\n\n\
         Source:      {url}\n\
         Destination: {}\n\n\
         Download the file manually from the source URL, save it to the destination path,\n\
         then run: reachy-lab models",
        path.display()
    )]
    Transport {
        name: String,
        url: String,
        path: PathBuf,
        reason: String,
    },

    #[error(
        "{name} is corrupted or incomplete: {} is {size} bytes, expected at least {min_size}.\n\n\
         The file was removed. Retry with: reachy-lab models",
        path.display()
    )]
    Integrity {
        name: String,
        path: PathBuf,
        size: u64,
        min_size: u64,
    },

    #[error(
        "{name} checksum mismatch for {}\n\
         Expected: {expected}\n\
         Actual:   {actual}\n\n\
         The file was removed. Retry with: reachy-lab models",
        path.display()
    )]
    Checksum {
        name: String,
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error(
        "Cannot extract {name} from {}: {reason}\n\n\
         The archive was removed because it is presumed corrupt. Retry with: reachy-lab models",
        archive.display()
    )]
    Extraction {
        name: String,
        archive: PathBuf,
        reason: String,
    },
}

impl ProvisionError {
    /// Process exit code reported for this failure.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Transport { .. } => 3,
            Self::Integrity { .. } | Self::Checksum { .. } => 4,
            Self::Extraction { .. } => 5,
        }
    }

    /// Stable identifier used in JSON error objects.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "transport_failure",
            Self::Integrity { .. } => "integrity_failure",
            Self::Checksum { .. } => "checksum_mismatch",
            Self::Extraction { .. } => "extraction_failure",
        }
    }
}

// ── Bootstrap errors ──────────────────────────────────────────────────────────

/// Failures while creating the virtual environment or installing packages.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(
        "Python interpreter '{python}' could not be started: {reason}\n\n\
         Install Python 3.10+ or point to one with: reachy-lab setup --python <path>"
    )]
    InterpreterNotFound { python: String, reason: String },

    #[error("{step} failed (exit code {code}):\n{stderr}")]
    StepFailed {
        step: String,
        code: i32,
        stderr: String,
    },
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\nValid values: {valid}")]
    InvalidValue {
        key: String,
        value: String,
        valid: String,
    },
}

/// Map any error chain to the process exit code.
///
/// Provisioning failures get their own codes; everything else is 1.
#[must_use]
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<ProvisionError>())
        .map_or(1, ProvisionError::exit_code)
}

/// Map any error chain to the JSON `code` field.
#[must_use]
pub fn error_code_for(err: &anyhow::Error) -> &'static str {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<ProvisionError>() {
            return e.code();
        }
        if let Some(e) = cause.downcast_ref::<BootstrapError>() {
            return match e {
                BootstrapError::InterpreterNotFound { .. } => "interpreter_not_found",
                BootstrapError::StepFailed { .. } => "bootstrap_step_failed",
            };
        }
        if cause.downcast_ref::<ConfigError>().is_some() {
            return "invalid_config";
        }
    }
    "command_failed"
}
