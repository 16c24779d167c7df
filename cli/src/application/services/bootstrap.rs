//! Application service: environment bootstrap use-case.
//!
//! Creates the Python virtual environment and installs the dependency tier
//! of exactly one `SetupMode`. All process execution goes through the
//! `CommandRunner` port.

use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{CommandRunner, ProgressReporter};
use crate::domain::{BootstrapError, SetupMode};

/// Package installs can take a long time on slow links.
pub const INSTALL_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Lines of installer output kept in a `StepFailed` error.
const STDERR_TAIL_LINES: usize = 20;

/// Everything the bootstrapper needs for one run.
#[derive(Debug, Clone)]
pub struct BootstrapPlan {
    pub mode: SetupMode,
    /// Interpreter used to create the environment.
    pub python: String,
    pub venv_dir: PathBuf,
    /// Recreate the environment from scratch.
    pub clean: bool,
}

impl BootstrapPlan {
    /// Plan for `mode` using the configured interpreter or the platform default.
    #[must_use]
    pub fn new(mode: SetupMode, python: Option<String>, venv_dir: PathBuf) -> Self {
        Self {
            mode,
            python: python.unwrap_or_else(|| default_python().to_string()),
            venv_dir,
            clean: false,
        }
    }
}

/// What a successful bootstrap installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapOutcome {
    pub mode: SetupMode,
    pub venv_python: PathBuf,
    pub packages: Vec<String>,
}

/// Interpreter name used when none is configured.
#[must_use]
pub fn default_python() -> &'static str {
    if cfg!(windows) { "python" } else { "python3" }
}

/// Interpreter inside the virtual environment at `venv_dir`.
#[must_use]
pub fn venv_python(venv_dir: &Path) -> PathBuf {
    if cfg!(windows) {
        venv_dir.join("Scripts").join("python.exe")
    } else {
        venv_dir.join("bin").join("python")
    }
}

/// The process never started: spawn errors carry the OS error, timeouts do not.
fn is_spawn_failure(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| cause.is::<std::io::Error>())
}

/// Create the environment and install the tier for `plan.mode`.
///
/// Rerunning on an existing environment is safe: `venv` and `pip` leave
/// satisfied requirements alone.
///
/// # Errors
///
/// Returns `BootstrapError::InterpreterNotFound` if the interpreter cannot be
/// started, or `BootstrapError::StepFailed` if any step exits non-zero.
pub async fn bootstrap(
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
    plan: &BootstrapPlan,
) -> Result<BootstrapOutcome> {
    let venv = plan.venv_dir.to_string_lossy().into_owned();

    reporter.step(&format!("creating virtual environment in {venv}..."));
    let mut args = vec!["-m", "venv"];
    if plan.clean {
        args.push("--clear");
    }
    args.push(&venv);
    let output = runner
        .run_with_timeout(&plan.python, &args, INSTALL_TIMEOUT)
        .await
        .map_err(|e| {
            if is_spawn_failure(&e) {
                BootstrapError::InterpreterNotFound {
                    python: plan.python.clone(),
                    reason: format!("{e:#}"),
                }
                .into()
            } else {
                e
            }
        })?;
    check_step("creating the virtual environment", &output)?;
    reporter.success(&format!("virtual environment ready at {venv}"));

    let python = venv_python(&plan.venv_dir);
    let python_str = python.to_string_lossy().into_owned();

    reporter.step("upgrading pip...");
    let output = runner
        .run_with_timeout(
            &python_str,
            &["-m", "pip", "install", "--upgrade", "pip"],
            INSTALL_TIMEOUT,
        )
        .await?;
    check_step("upgrading pip", &output)?;

    let packages = plan.mode.packages();
    reporter.step(&format!(
        "installing {} dependencies...",
        plan.mode.tier_name()
    ));
    let mut args = vec!["-m", "pip", "install"];
    args.extend_from_slice(packages);
    let output = runner
        .run_with_timeout(&python_str, &args, INSTALL_TIMEOUT)
        .await?;
    check_step("installing dependencies", &output)?;

    reporter.success(&format!(
        "installed {} dependencies: {}",
        plan.mode.tier_name(),
        packages.join(", ")
    ));

    Ok(BootstrapOutcome {
        mode: plan.mode,
        venv_python: python,
        packages: packages.iter().map(|p| (*p).to_string()).collect(),
    })
}

fn check_step(step: &str, output: &Output) -> Result<(), BootstrapError> {
    if output.status.success() {
        return Ok(());
    }
    let stream = if output.stderr.iter().all(u8::is_ascii_whitespace) {
        &output.stdout
    } else {
        &output.stderr
    };
    Err(BootstrapError::StepFailed {
        step: step.to_string(),
        code: output.status.code().unwrap_or(-1),
        stderr: tail(&String::from_utf8_lossy(stream), STDERR_TAIL_LINES),
    })
}

fn tail(text: &str, lines: usize) -> String {
    let all: Vec<&str> = text.trim_end().lines().collect();
    all[all.len().saturating_sub(lines)..].join("\n")
}
