//! Console robot: the simulation `RobotAdapter`.
//!
//! Prints what the robot says and which motion it would play, optionally
//! speaking each line through a `SpeechEngine`.

use std::io::Write;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use reachy_lesson::MotionId;

use crate::application::ports::{RobotAdapter, SpeechEngine};
use crate::domain::VoiceSettings;

/// Robot that lives in the terminal.
pub struct ConsoleRobot<S, W> {
    out: Mutex<W>,
    speech: Option<(S, VoiceSettings)>,
    fast: bool,
}

impl<S: SpeechEngine, W: Write> ConsoleRobot<S, W> {
    /// `fast` skips every pause and motion delay.
    pub fn new(out: W, fast: bool) -> Self {
        Self {
            out: Mutex::new(out),
            speech: None,
            fast,
        }
    }

    /// Also speak every line aloud.
    #[must_use]
    pub fn with_speech(mut self, engine: S, settings: VoiceSettings) -> Self {
        self.speech = Some((engine, settings));
        self
    }

    fn print(&self, line: &str) -> Result<()> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| anyhow::anyhow!("console output lock poisoned"))?;
        writeln!(out, "{line}")?;
        out.flush()?;
        Ok(())
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.out.into_inner().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl<S: SpeechEngine, W: Write> RobotAdapter for ConsoleRobot<S, W> {
    async fn say(&self, text: &str) -> Result<()> {
        self.print(&format!("\nReachy: {text}"))?;
        if let Some((engine, settings)) = &self.speech
            && let Err(e) = engine.speak(text, settings).await
        {
            self.print(&format!("  [speech warning] {e:#}"))?;
        }
        Ok(())
    }

    async fn motion(&self, id: &MotionId, cue: &str, duration: Duration) -> Result<()> {
        if !id.is_known() {
            return Ok(());
        }
        let secs = duration.as_secs_f64();
        if cue.is_empty() {
            self.print(&format!("[Motion] {id} ({secs:.1}s)"))?;
        } else {
            self.print(&format!("[Motion] {id} ({cue}, {secs:.1}s)"))?;
        }
        self.wait(duration).await;
        Ok(())
    }

    async fn wait(&self, duration: Duration) {
        if !self.fast {
            tokio::time::sleep(duration).await;
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::Voice;

    struct BrokenSpeech;

    impl SpeechEngine for BrokenSpeech {
        async fn speak(&self, _: &str, _: &VoiceSettings) -> Result<()> {
            anyhow::bail!("espeak-ng not found")
        }

        async fn voices(&self) -> Result<Vec<Voice>> {
            Ok(Vec::new())
        }
    }

    fn printed(robot: ConsoleRobot<BrokenSpeech, Vec<u8>>) -> String {
        String::from_utf8(robot.into_output()).unwrap()
    }

    #[tokio::test]
    async fn say_prints_with_speaker_prefix() {
        let robot: ConsoleRobot<BrokenSpeech, _> = ConsoleRobot::new(Vec::new(), true);
        robot.say("Hello!").await.unwrap();
        assert_eq!(printed(robot), "\nReachy: Hello!\n");
    }

    #[tokio::test]
    async fn motion_prints_cue_and_duration() {
        let robot: ConsoleRobot<BrokenSpeech, _> = ConsoleRobot::new(Vec::new(), true);
        robot
            .motion(&MotionId::GasSpin, "slow spin", Duration::from_secs(3))
            .await
            .unwrap();
        assert_eq!(printed(robot), "[Motion] gas_spin (slow spin, 3.0s)\n");
    }

    #[tokio::test]
    async fn unknown_motion_is_ignored() {
        let robot: ConsoleRobot<BrokenSpeech, _> = ConsoleRobot::new(Vec::new(), true);
        robot
            .motion(&MotionId::from("moonwalk".to_string()), "", Duration::from_secs(1))
            .await
            .unwrap();
        assert!(printed(robot).is_empty());
    }

    #[tokio::test]
    async fn speech_failure_is_a_warning_not_an_error() {
        let robot = ConsoleRobot::new(Vec::new(), true)
            .with_speech(BrokenSpeech, VoiceSettings::default());
        robot.say("Hi").await.expect("say still succeeds");
        let out = printed(robot);
        assert!(out.contains("Reachy: Hi"));
        assert!(out.contains("[speech warning] espeak-ng not found"));
    }
}
