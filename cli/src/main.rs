//! reachy-lab - environment setup and lessons for the Reachy Mini solar-system lab

use std::process::ExitCode;

use clap::Parser;

use reachy_lab_cli::cli::Cli;
use reachy_lab_cli::domain::{error_code_for, exit_code_for};
use reachy_lab_cli::output::json::format_error;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.json;
    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            let code = exit_code_for(&e);
            let rendered = json
                .then(|| format_error(&format!("{e:#}"), error_code_for(&e), code).ok())
                .flatten();
            match rendered {
                Some(obj) => println!("{obj}"),
                None => eprintln!("Error: {e:#}"),
            }
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
