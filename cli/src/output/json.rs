//! JSON output helpers.
//!
//! Provides the error-object formatter used by every `--json` code path when
//! a command fails, and the JSON variant of each renderer.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::services::status::LabStatus;
use crate::domain::{LabConfig, Voice};

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "...",
///   "exit_code": 3
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str, exit_code: i32) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
        "exit_code": exit_code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Renders domain types as pretty-printed JSON on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    fn print(value: &impl serde::Serialize) -> Result<()> {
        let out = serde_json::to_string_pretty(value).context("JSON serialization failed")?;
        println!("{out}");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_status(&self, status: &LabStatus) -> Result<()> {
        let assets: Vec<_> = status
            .assets
            .iter()
            .map(|a| {
                serde_json::json!({
                    "name": a.name,
                    "path": a.path,
                    "present": a.present,
                    "size": a.size,
                    "expected_min_size": a.expected_min_size,
                    "extracted": a.extracted,
                    "ready": a.is_ready(),
                })
            })
            .collect();
        Self::print(&serde_json::json!({
            "mode": status.mode,
            "tier": status.mode.tier_name(),
            "venv": {
                "dir": status.venv_dir,
                "python": status.venv_python,
                "ready": status.venv_ready,
            },
            "assets": assets,
            "ready": status.is_ready(),
        }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config(&self, config: &LabConfig, path: &Path) -> Result<()> {
        Self::print(&serde_json::json!({
            "path": path,
            "config": config,
        }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_voices(&self, voices: &[Voice]) -> Result<()> {
        Self::print(&voices)
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(&self, version: &str) -> Result<()> {
        Self::print(&serde_json::json!({ "version": version }))
    }
}
