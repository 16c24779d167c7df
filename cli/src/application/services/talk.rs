//! Application service: text-to-speech talker.
//!
//! Speaks single lines, the demo sequence, or an interactive loop where the
//! user types what the robot should say.

use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{InputSource, ProgressReporter, SpeechEngine};
use crate::domain::{Voice, VoiceSettings};

/// Demo lines with the pause that follows each one.
pub const DEMO_SCRIPT: [(&str, Duration); 5] = [
    ("Hello! I am Reachy Mini Lite.", Duration::from_millis(500)),
    ("I am connected via USB and ready to talk!", Duration::from_millis(500)),
    ("I can speak at different speeds.", Duration::from_millis(300)),
    ("I can help you with various tasks.", Duration::from_millis(300)),
    ("My compact design makes me very portable.", Duration::from_millis(300)),
];

pub const GOODBYE: &str = "Goodbye! See you next time!";

const SPEED_USAGE: &str = "Usage: speed [number] (e.g., speed 180)";
const VOICE_USAGE: &str = "Usage: voice [number] (e.g., voice 1)";

/// One line typed in interactive mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TalkCommand {
    Quit,
    Demo,
    Voices,
    Speed(u32),
    Voice(usize),
    /// A malformed command; carries the usage hint.
    Usage(&'static str),
    Say(String),
    Blank,
}

/// Interpret one interactive line.
#[must_use]
pub fn parse_command(line: &str) -> TalkCommand {
    let line = line.trim();
    let lower = line.to_lowercase();
    let argument = || lower.split_whitespace().nth(1);

    match lower.as_str() {
        "" => TalkCommand::Blank,
        "quit" | "exit" | "q" => TalkCommand::Quit,
        "demo" => TalkCommand::Demo,
        "voices" => TalkCommand::Voices,
        _ if lower.starts_with("speed ") => argument()
            .and_then(|n| n.parse().ok())
            .map_or(TalkCommand::Usage(SPEED_USAGE), TalkCommand::Speed),
        _ if lower.starts_with("voice ") => argument()
            .and_then(|n| n.parse().ok())
            .map_or(TalkCommand::Usage(VOICE_USAGE), TalkCommand::Voice),
        _ => TalkCommand::Say(line.to_string()),
    }
}

/// Speaks through a `SpeechEngine` with adjustable settings.
pub struct Talker<'a, E, R> {
    engine: &'a E,
    reporter: &'a R,
    settings: VoiceSettings,
    pauses: bool,
}

impl<'a, E: SpeechEngine, R: ProgressReporter> Talker<'a, E, R> {
    pub fn new(engine: &'a E, reporter: &'a R, settings: VoiceSettings) -> Self {
        Self {
            engine,
            reporter,
            settings,
            pauses: true,
        }
    }

    /// Skip the pauses between demo lines.
    #[must_use]
    pub fn without_pauses(mut self) -> Self {
        self.pauses = false;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &VoiceSettings {
        &self.settings
    }

    /// Speak one line and wait until it has been spoken.
    ///
    /// # Errors
    ///
    /// Returns an error if the speech backend fails.
    pub async fn speak(&self, text: &str) -> Result<()> {
        self.reporter.step(&format!("Reachy says: {text}"));
        self.engine.speak(text, &self.settings).await
    }

    /// Run the demo sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if the speech backend fails.
    pub async fn demo(&self) -> Result<()> {
        for (line, pause) in DEMO_SCRIPT {
            self.speak(line).await?;
            if self.pauses {
                tokio::time::sleep(pause).await;
            }
        }
        self.reporter.success("demo complete");
        Ok(())
    }

    /// Voices offered by the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot list its voices.
    pub async fn voices(&self) -> Result<Vec<Voice>> {
        self.engine.voices().await
    }

    /// Read lines from `input` until `quit`, end of input, or `interrupt`.
    ///
    /// Failures of individual commands are reported and the loop continues.
    /// An interrupt is reported and answered with the goodbye line.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input fails.
    pub async fn interactive(
        &mut self,
        input: &mut impl InputSource,
        interrupt: impl Future<Output = ()>,
    ) -> Result<()> {
        let interrupted = tokio::select! {
            biased;
            () = interrupt => true,
            result = self.command_loop(input) => {
                result?;
                false
            }
        };
        if interrupted {
            self.reporter.warn("Interrupted by user.");
            self.goodbye().await;
        }
        Ok(())
    }

    async fn goodbye(&self) {
        if let Err(e) = self.speak(GOODBYE).await {
            self.reporter.warn(&format!("{e:#}"));
        }
    }

    async fn command_loop(&mut self, input: &mut impl InputSource) -> Result<()> {
        while let Some(line) = input.read_line("What should Reachy say? ").await? {
            let outcome = match parse_command(&line) {
                TalkCommand::Blank => Ok(()),
                TalkCommand::Quit => {
                    self.goodbye().await;
                    break;
                }
                TalkCommand::Demo => self.demo().await,
                TalkCommand::Voices => self.list_voices().await,
                TalkCommand::Speed(rate) => self.set_rate(rate),
                TalkCommand::Voice(index) => self.select_voice(index).await,
                TalkCommand::Usage(usage) => {
                    self.reporter.warn(usage);
                    Ok(())
                }
                TalkCommand::Say(text) => self.speak(&text).await,
            };
            if let Err(e) = outcome {
                self.reporter.warn(&format!("{e:#}"));
            }
        }
        Ok(())
    }

    async fn list_voices(&self) -> Result<()> {
        let voices = self.voices().await?;
        if voices.is_empty() {
            self.reporter.warn("no voices reported by the speech backend");
        }
        for (i, voice) in voices.iter().enumerate() {
            self.reporter
                .step(&format!("{i}: {} ({})", voice.name, voice.id));
        }
        Ok(())
    }

    fn set_rate(&mut self, rate: u32) -> Result<()> {
        self.settings.rate = VoiceSettings::check_rate(rate)?;
        self.reporter
            .success(&format!("Speech rate set to {rate} words per minute"));
        Ok(())
    }

    async fn select_voice(&mut self, index: usize) -> Result<()> {
        let voices = self.voices().await?;
        let Some(voice) = voices.get(index) else {
            anyhow::bail!(
                "no voice {index}: {} voices available, type 'voices' to list them",
                voices.len()
            );
        };
        self.settings.name = Some(voice.id.clone());
        self.reporter.success(&format!("Voice set to: {}", voice.name));
        Ok(())
    }
}
