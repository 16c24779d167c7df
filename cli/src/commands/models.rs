//! `reachy-lab models`: download and unpack the assets a mode needs.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::config_service;
use crate::application::services::provision::{ProvisionPorts, provision};
use crate::commands::LayoutArgs;
use crate::domain::{AssetSpec, AssetState, ProvisioningConfig, SetupMode};
use crate::infra::extract::ArchiveUnpacker;
use crate::infra::fetch::UreqFetcher;
use crate::infra::fs::StdFs;
use crate::output::TerminalReporter;

/// Arguments for the models command.
#[derive(Args, Debug, Default)]
pub struct ModelsArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,
}

/// Run `reachy-lab models`.
///
/// # Errors
///
/// Returns a `ProvisionError` when an asset cannot be downloaded, is too
/// small, or cannot be extracted.
pub fn run(app: &AppContext, args: &ModelsArgs) -> Result<ExitCode> {
    let config = config_service::load_config(&app.config_store)?;
    let layout = args.layout.resolve(&config);
    provision_assets(app, layout.mode, &layout.models_dir, &config.assets)?;
    Ok(ExitCode::SUCCESS)
}

/// Provision every asset `mode` needs under `models_dir`.
///
/// Shared with `setup`, which calls it after a successful bootstrap.
///
/// # Errors
///
/// See [`run`].
pub fn provision_assets(
    app: &AppContext,
    mode: SetupMode,
    models_dir: &Path,
    overrides: &[AssetSpec],
) -> Result<Vec<AssetState>> {
    let config = ProvisioningConfig::for_mode(mode, models_dir).with_overrides(overrides);
    if config.assets.is_empty() {
        app.output
            .info(&format!("no models required in {mode} mode"));
        return Ok(Vec::new());
    }

    let reporter = TerminalReporter::new(&app.output);
    let ports = ProvisionPorts {
        fs: &StdFs,
        fetcher: &UreqFetcher::new(!app.output.show_progress()),
        extractor: &ArchiveUnpacker,
        hasher: &StdFs,
        reporter: &reporter,
    };
    // Downloads and extraction are blocking I/O.
    let states = tokio::task::block_in_place(|| provision(&config, &ports))?;
    app.output.success(&format!(
        "{} model{} ready in {}",
        states.len(),
        if states.len() == 1 { "" } else { "s" },
        models_dir.display()
    ));
    Ok(states)
}
