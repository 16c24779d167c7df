//! System text-to-speech: implements the `SpeechEngine` port by running the
//! platform synthesizer through a `CommandRunner`.
//!
//! | Platform | Program | Voices |
//! |---|---|---|
//! | Linux | `espeak-ng` | `espeak-ng --voices` |
//! | macOS | `say` | `say -v ?` |
//! | Windows | `powershell` + `System.Speech` | `GetInstalledVoices()` |
//!
//! Text never becomes part of a command line that a shell interprets: it is
//! an argument after `--` for `espeak-ng`, a plain argument for `say`, and
//! stdin for PowerShell.

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, SpeechEngine};
use crate::domain::{Voice, VoiceSettings};

/// Which synthesizer drives the speech.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechBackend {
    EspeakNg,
    MacSay,
    WindowsSpeech,
}

impl SpeechBackend {
    /// Backend for the platform this binary was built for.
    #[must_use]
    pub fn native() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacSay
        } else if cfg!(windows) {
            Self::WindowsSpeech
        } else {
            Self::EspeakNg
        }
    }

    fn install_hint(self) -> &'static str {
        match self {
            Self::EspeakNg => "install it with: sudo apt-get install espeak-ng",
            Self::MacSay => "the 'say' command ships with macOS",
            Self::WindowsSpeech => "Windows PowerShell with System.Speech is required",
        }
    }
}

/// One synthesizer invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechCommand {
    pub program: &'static str,
    pub args: Vec<String>,
    pub stdin: Option<String>,
}

const POWERSHELL_PRELUDE: &str = "Add-Type -AssemblyName System.Speech; \
    $s = New-Object System.Speech.Synthesis.SpeechSynthesizer;";

const POWERSHELL_SPEAK: &str = "$in = [Console]::In.ReadToEnd(); \
    $nl = $in.IndexOf([char]10); \
    $voice = $in.Substring(0, $nl).Trim(); \
    if ($voice) { $s.SelectVoice($voice) }; \
    $s.Speak($in.Substring($nl + 1))";

const POWERSHELL_VOICES: &str = "$s.GetInstalledVoices() | ForEach-Object { \
    $v = $_.VoiceInfo; \"$($v.Name)|$($v.Culture)\" }";

/// SAPI rate is -10..=10 with 0 close to 150 words per minute.
fn sapi_rate(wpm: u32) -> i64 {
    ((i64::from(wpm) - 150) / 15).clamp(-10, 10)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percent(volume: f32) -> u32 {
    (volume.clamp(0.0, 1.0) * 100.0).round() as u32
}

/// Build the command that speaks `text`.
#[must_use]
pub fn speak_command(backend: SpeechBackend, text: &str, settings: &VoiceSettings) -> SpeechCommand {
    match backend {
        SpeechBackend::EspeakNg => {
            let mut args = vec![
                "-s".to_string(),
                settings.rate.to_string(),
                "-a".to_string(),
                percent(settings.volume).to_string(),
            ];
            if let Some(voice) = &settings.name {
                args.extend(["-v".to_string(), voice.clone()]);
            }
            args.extend(["--".to_string(), text.to_string()]);
            SpeechCommand { program: "espeak-ng", args, stdin: None }
        }
        SpeechBackend::MacSay => {
            let mut args = vec!["-r".to_string(), settings.rate.to_string()];
            if let Some(voice) = &settings.name {
                args.extend(["-v".to_string(), voice.clone()]);
            }
            args.extend(["--".to_string(), text.to_string()]);
            SpeechCommand { program: "say", args, stdin: None }
        }
        SpeechBackend::WindowsSpeech => {
            let script = format!(
                "{POWERSHELL_PRELUDE} $s.Rate = {}; $s.Volume = {}; {POWERSHELL_SPEAK}",
                sapi_rate(settings.rate),
                percent(settings.volume)
            );
            let voice = settings.name.as_deref().unwrap_or_default();
            SpeechCommand {
                program: "powershell",
                args: vec!["-NoProfile".into(), "-NonInteractive".into(), "-Command".into(), script],
                stdin: Some(format!("{voice}\n{text}")),
            }
        }
    }
}

/// Build the command that lists voices.
#[must_use]
pub fn voices_command(backend: SpeechBackend) -> SpeechCommand {
    let (program, args): (&'static str, Vec<String>) = match backend {
        SpeechBackend::EspeakNg => ("espeak-ng", vec!["--voices".into()]),
        SpeechBackend::MacSay => ("say", vec!["-v".into(), "?".into()]),
        SpeechBackend::WindowsSpeech => (
            "powershell",
            vec![
                "-NoProfile".into(),
                "-NonInteractive".into(),
                "-Command".into(),
                format!("{POWERSHELL_PRELUDE} {POWERSHELL_VOICES}"),
            ],
        ),
    };
    SpeechCommand { program, args, stdin: None }
}

/// Parse the voice listing printed by `backend`.
#[must_use]
pub fn parse_voices(backend: SpeechBackend, stdout: &str) -> Vec<Voice> {
    match backend {
        // Pty Language Age/Gender VoiceName File Other Languages
        SpeechBackend::EspeakNg => stdout
            .lines()
            .skip(1)
            .filter_map(|line| {
                let cols: Vec<&str> = line.split_whitespace().collect();
                let (lang, name) = (cols.get(1)?, cols.get(3)?);
                Some(Voice {
                    id: (*lang).to_string(),
                    name: name.replace('_', " "),
                    language: Some((*lang).to_string()),
                })
            })
            .collect(),
        // Alex                en_US    # Most people recognize me by my voice.
        SpeechBackend::MacSay => stdout
            .lines()
            .filter_map(|line| {
                let left = line.split('#').next()?.trim_end();
                let (name, locale) = left.rsplit_once(char::is_whitespace)?;
                let name = name.trim();
                (!name.is_empty()).then(|| Voice {
                    id: name.to_string(),
                    name: name.to_string(),
                    language: Some(locale.to_string()),
                })
            })
            .collect(),
        // Microsoft Zira Desktop|en-US
        SpeechBackend::WindowsSpeech => stdout
            .lines()
            .filter_map(|line| {
                let (name, culture) = line.trim().split_once('|')?;
                Some(Voice {
                    id: name.to_string(),
                    name: name.to_string(),
                    language: (!culture.is_empty()).then(|| culture.to_string()),
                })
            })
            .collect(),
    }
}

/// Production `SpeechEngine` backed by the platform synthesizer.
pub struct SystemSpeech<R> {
    runner: R,
    backend: SpeechBackend,
}

impl<R: CommandRunner> SystemSpeech<R> {
    pub fn new(runner: R, backend: SpeechBackend) -> Self {
        Self { runner, backend }
    }

    async fn run(&self, cmd: &SpeechCommand) -> Result<String> {
        let args: Vec<&str> = cmd.args.iter().map(String::as_str).collect();
        let output = match &cmd.stdin {
            Some(input) => {
                self.runner
                    .run_with_stdin(cmd.program, &args, input.as_bytes())
                    .await
            }
            None => self.runner.run(cmd.program, &args).await,
        }
        .with_context(|| {
            format!(
                "cannot run {}: {}",
                cmd.program,
                self.backend.install_hint()
            )
        })?;

        if !output.status.success() {
            anyhow::bail!(
                "{} failed: {}",
                cmd.program,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl<R: CommandRunner> SpeechEngine for SystemSpeech<R> {
    async fn speak(&self, text: &str, settings: &VoiceSettings) -> Result<()> {
        self.run(&speak_command(self.backend, text, settings))
            .await
            .map(|_| ())
    }

    async fn voices(&self) -> Result<Vec<Voice>> {
        let stdout = self.run(&voices_command(self.backend)).await?;
        Ok(parse_voices(self.backend, &stdout))
    }
}
