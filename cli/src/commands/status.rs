//! `reachy-lab status`: report the environment without changing it.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::{config_service, status};
use crate::commands::LayoutArgs;
use crate::infra::fs::StdFs;

/// Arguments for the status command.
#[derive(Args, Debug, Default)]
pub struct StatusArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,
}

/// Run `reachy-lab status`.
///
/// # Errors
///
/// Returns an error if the configuration or an asset's size cannot be read.
pub fn run(app: &AppContext, args: &StatusArgs) -> Result<ExitCode> {
    let config = config_service::load_config(&app.config_store)?;
    let layout = args.layout.resolve(&config);
    let report = status::collect(
        &StdFs,
        layout.mode,
        &layout.venv_dir,
        &layout.models_dir,
        &config.assets,
    )?;
    app.renderer().render_status(&report)?;
    Ok(ExitCode::SUCCESS)
}
