//! `reachy-lab setup`: create the virtual environment, install the mode's
//! dependency tier, then fetch its models.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::LocalFs;
use crate::application::services::bootstrap::{BootstrapPlan, INSTALL_TIMEOUT, bootstrap};
use crate::application::services::config_service;
use crate::commands::{LayoutArgs, models};
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::fs::StdFs;
use crate::output::TerminalReporter;

/// Arguments for the setup command.
#[derive(Args, Debug, Default)]
pub struct SetupArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Python interpreter used to create the environment
    #[arg(long, value_name = "PATH")]
    pub python: Option<String>,

    /// Recreate the virtual environment from scratch
    #[arg(long)]
    pub clean: bool,

    /// Install packages only; do not download models
    #[arg(long)]
    pub skip_models: bool,
}

/// Run `reachy-lab setup`.
///
/// # Errors
///
/// Returns a `BootstrapError` if the environment cannot be created or a
/// package install fails, and a `ProvisionError` if a model cannot be
/// provisioned. Models are not attempted after a bootstrap failure.
pub async fn run(app: &AppContext, args: SetupArgs) -> Result<ExitCode> {
    let config = config_service::load_config(&app.config_store)?;
    let layout = args.layout.resolve(&config);

    let mut plan = BootstrapPlan::new(
        layout.mode,
        args.python.or_else(|| config.setup.python.clone()),
        layout.venv_dir.clone(),
    );
    if args.clean && StdFs.exists(&layout.venv_dir) {
        let prompt = format!(
            "Recreate the virtual environment at {}? Installed packages will be removed.",
            layout.venv_dir.display()
        );
        if !app.confirm(&prompt, true)? {
            app.output.info("Cancelled.");
            return Ok(ExitCode::SUCCESS);
        }
    }
    plan.clean = args.clean;

    app.output.header(&format!(
        "Setting up {} mode: {}",
        layout.mode,
        layout.mode.tier_name()
    ));

    let runner = TokioCommandRunner::new(INSTALL_TIMEOUT);
    let outcome = {
        let reporter = TerminalReporter::spinning(&app.output);
        bootstrap(&runner, &reporter, &plan).await?
    };

    if args.skip_models {
        app.output.info("Skipping models. Fetch them later with: reachy-lab models");
    } else {
        models::provision_assets(app, layout.mode, &layout.models_dir, &config.assets)?;
    }

    if !app.output.quiet {
        println!();
    }
    app.output.success("Setup complete");
    app.output
        .kv("interpreter:", &outcome.venv_python.display().to_string());
    app.output.info("Start a lesson: reachy-lab lesson");
    Ok(ExitCode::SUCCESS)
}
