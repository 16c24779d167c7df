//! Domain layer: pure types, validation, and error taxonomy.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod asset;
pub mod config;
pub mod error;
pub mod mode;
pub mod voice;

pub use asset::{ArchiveKind, AssetSpec, AssetState, ProvisioningConfig};
pub use config::{LabConfig, SetupConfig, apply_setting, validate_config_key, validate_config_value};
pub use error::{BootstrapError, ConfigError, ProvisionError, error_code_for, exit_code_for};
pub use mode::SetupMode;
pub use voice::{Voice, VoiceSettings};
