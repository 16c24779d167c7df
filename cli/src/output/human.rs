//! Human-readable terminal renderer.

use std::path::Path;

use owo_colors::OwoColorize as _;

use crate::application::services::status::LabStatus;
use crate::domain::config::config_entries;
use crate::domain::{AssetState, LabConfig, Voice};
use crate::infra::config::CONFIG_ENV;
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    pub fn render_version(&self, version: &str) {
        println!("reachy-lab {version}");
    }

    /// Render the environment and asset report.
    pub fn render_status(&self, status: &LabStatus) {
        self.ctx.header("Environment:");
        self.ctx.kv(
            "mode:",
            &format!("{} ({})", status.mode, status.mode.tier_name()),
        );
        self.ctx.kv("interpreter:", &status.venv_python.display().to_string());
        if status.venv_ready {
            self.ctx.success("virtual environment ready");
        } else {
            self.ctx.warn(&format!(
                "no virtual environment at {}. Run: reachy-lab setup --mode {}",
                status.venv_dir.display(),
                status.mode
            ));
        }

        if self.ctx.quiet {
            return;
        }
        println!();
        self.ctx.header("Assets:");
        if status.assets.is_empty() {
            self.ctx
                .info(&format!("no assets required in {} mode", status.mode));
            return;
        }
        for asset in &status.assets {
            if asset.is_ready() {
                self.ctx
                    .success(&format!("{} ready at {}", asset.name, asset.path.display()));
            } else {
                self.ctx.warn(&format!(
                    "{} {}. Run: reachy-lab models",
                    asset.name,
                    asset_problem(asset)
                ));
            }
        }
    }

    /// Render the current configuration.
    pub fn render_config(&self, config: &LabConfig, path: &Path) {
        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(self.ctx.styles.header)
        );
        println!();
        for (key, value) in config_entries(config) {
            println!("  {:<20} {value}", format!("{key}:"));
        }
        if !config.assets.is_empty() {
            println!();
            println!("  {}", "Assets:".style(self.ctx.styles.bold));
            for asset in &config.assets {
                println!("    {:<18} {}", format!("{}:", asset.name), asset.url);
            }
        }
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        for var in [CONFIG_ENV, "NO_COLOR"] {
            println!(
                "    {:<18} {}",
                format!("{var}:"),
                std::env::var(var).unwrap_or_else(|_| "(not set)".to_string())
            );
        }
        println!();
    }

    /// Render an indexed voice listing, the indices `say` interactive mode accepts.
    pub fn render_voices(&self, voices: &[Voice]) {
        if voices.is_empty() {
            self.ctx.warn("no voices reported by the speech backend");
            return;
        }
        for (i, voice) in voices.iter().enumerate() {
            let language = voice
                .language
                .as_deref()
                .map(|l| format!(" [{l}]"))
                .unwrap_or_default();
            println!(
                "  {:>3}  {}{language}  {}",
                i,
                voice.name,
                voice.id.style(self.ctx.styles.dim)
            );
        }
    }
}

/// Short description of why an asset is not ready.
#[must_use]
pub fn asset_problem(asset: &AssetState) -> String {
    match asset.size {
        None => format!("missing: {} not found", asset.path.display()),
        Some(size) if asset.is_undersized() => format!(
            "incomplete: {} is {size} bytes, expected at least {}",
            asset.path.display(),
            asset.expected_min_size
        ),
        Some(_) => "not extracted".to_string(),
    }
}
