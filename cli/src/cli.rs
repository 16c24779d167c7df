//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags};
use crate::commands;

/// Set up and run the Reachy Mini solar-system lab
#[derive(Parser)]
#[command(
    name = "reachy-lab",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Answer yes to confirmation prompts
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create the Python environment and install the mode's dependencies
    Setup(commands::setup::SetupArgs),

    /// Download and unpack the models the mode needs
    Models(commands::models::ModelsArgs),

    /// Show environment and model status
    Status(commands::status::StatusArgs),

    /// Run the interactive solar-system lesson
    Lesson(commands::lesson::LessonArgs),

    /// Speak text with the system synthesizer
    Say(commands::say::SayArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            yes,
            command,
        } = self;
        let app = AppContext::new(&AppFlags {
            no_color,
            quiet,
            json,
            yes,
        });

        match command {
            Command::Setup(args) => commands::setup::run(&app, args).await,
            Command::Models(args) => commands::models::run(&app, &args),
            Command::Status(args) => commands::status::run(&app, &args),
            Command::Lesson(args) => commands::lesson::run(&app, args).await,
            Command::Say(args) => commands::say::run(&app, args).await,
            Command::Config(cmd) => commands::config::run(&app, cmd),
            Command::Version => commands::version::run(&app),
        }
    }
}
