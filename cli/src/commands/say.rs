//! `reachy-lab say`: speak text through the system synthesizer.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::config_service;
use crate::application::services::talk::Talker;
use crate::domain::VoiceSettings;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::input::{LineInput, interrupted};
use crate::infra::speech::{SpeechBackend, SystemSpeech};
use crate::output::TerminalReporter;

/// Arguments for the say command.
#[derive(Args, Debug, Default)]
pub struct SayArgs {
    /// Text to speak. Without text, starts interactive mode
    pub text: Vec<String>,

    /// Speech rate in words per minute (80-400)
    #[arg(long)]
    pub rate: Option<u32>,

    /// Volume from 0.0 to 1.0
    #[arg(long)]
    pub volume: Option<f32>,

    /// Voice name or id
    #[arg(long, value_name = "NAME")]
    pub voice: Option<String>,

    /// List the available voices
    #[arg(long, conflicts_with_all = ["text", "demo"])]
    pub list_voices: bool,

    /// Run the demo sequence
    #[arg(long, conflicts_with = "text")]
    pub demo: bool,
}

impl SayArgs {
    /// Configured voice settings with this run's flags applied.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a rate or volume is out of range.
    pub fn settings(&self, mut base: VoiceSettings) -> Result<VoiceSettings> {
        if let Some(rate) = self.rate {
            base.rate = VoiceSettings::check_rate(rate)?;
        }
        if let Some(volume) = self.volume {
            base.volume = VoiceSettings::check_volume(volume)?;
        }
        if let Some(voice) = &self.voice {
            base.name = Some(voice.clone());
        }
        Ok(base)
    }
}

/// Run `reachy-lab say`.
///
/// # Errors
///
/// Returns an error if the synthesizer is missing or fails. Interactive mode
/// reports per-line failures and keeps going.
pub async fn run(app: &AppContext, args: SayArgs) -> Result<ExitCode> {
    let settings = args.settings(config_service::load_config(&app.config_store)?.voice)?;
    let engine = SystemSpeech::new(TokioCommandRunner::default(), SpeechBackend::native());
    let reporter = TerminalReporter::new(&app.output);
    let mut talker = Talker::new(&engine, &reporter, settings);

    if args.list_voices {
        let voices = talker.voices().await?;
        app.renderer().render_voices(&voices)?;
    } else if args.demo {
        talker.demo().await?;
    } else if !args.text.is_empty() {
        talker.speak(&args.text.join(" ")).await?;
    } else {
        app.output.info(
            "Type text to speak. Commands: demo, voices, speed N, voice N, quit",
        );
        talker
            .interactive(&mut LineInput::stdin(), interrupted())
            .await?;
    }
    Ok(ExitCode::SUCCESS)
}
