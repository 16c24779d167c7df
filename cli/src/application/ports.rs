//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`: never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use anyhow::Result;
use reachy_lesson::MotionId;

use crate::domain::{LabConfig, Voice, VoiceSettings};

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
    /// Run a program with stdin piped from `stdin`.
    async fn run_with_stdin(&self, program: &str, args: &[&str], stdin: &[u8]) -> Result<Output>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait: no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Filesystem Ports ──────────────────────────────────────────────────────────

/// Raw filesystem operations used by the provisioner.
pub trait LocalFs {
    /// Size of the file at `path`, or `None` if nothing is there.
    fn file_size(&self, path: &Path) -> Result<Option<u64>>;
    fn exists(&self, path: &Path) -> bool;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    /// Remove a file; a missing file is not an error.
    fn remove_file(&self, path: &Path) -> Result<()>;
    /// Remove a directory tree; a missing directory is not an error.
    fn remove_dir_all(&self, path: &Path) -> Result<()>;
    fn rename(&self, from: &Path, to: &Path) -> Result<()>;
    /// Top-level entries of a directory, in no particular order.
    fn list_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;
    fn is_dir(&self, path: &Path) -> bool;
}

/// Abstracts file hashing operations.
pub trait FileHasher {
    /// Compute the SHA-256 hash of a file as lowercase hex.
    fn sha256_file(&self, path: &Path) -> Result<String>;
}

// ── Asset Ports ───────────────────────────────────────────────────────────────

/// Downloads one URL to a local file.
pub trait AssetFetcher {
    /// Fetch `url` into `dest` and return the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer does not complete. Implementations
    /// must not leave a file at `dest` when they fail.
    fn fetch(&self, url: &str, dest: &Path) -> Result<u64>;

    /// Path used for in-flight data while fetching into `dest`.
    fn partial_path(&self, dest: &Path) -> PathBuf {
        let mut s = dest.as_os_str().to_owned();
        s.push(".partial");
        PathBuf::from(s)
    }
}

/// Unpacks an archive.
pub trait ArchiveExtractor {
    /// Extract `archive` into the existing directory `into`.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive is unreadable, malformed, or contains
    /// entries that would escape `into`.
    fn extract(&self, archive: &Path, into: &Path) -> Result<()>;
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts configuration persistence.
pub trait ConfigStore {
    /// Load the configuration, or defaults when none is saved.
    fn load(&self) -> Result<LabConfig>;
    /// Persist the configuration.
    fn save(&self, config: &LabConfig) -> Result<()>;
    /// Location of the configuration file.
    fn path(&self) -> Result<PathBuf>;
}

// ── Lesson Ports ──────────────────────────────────────────────────────────────

/// The robot as seen by the lesson: it talks, moves, and waits.
#[allow(async_fn_in_trait)]
pub trait RobotAdapter {
    /// Say one line.
    async fn say(&self, text: &str) -> Result<()>;
    /// Play a named motion for roughly `duration`.
    ///
    /// `cue` describes the motion for adapters that cannot move. Unknown
    /// motions are ignored.
    async fn motion(&self, id: &MotionId, cue: &str, duration: Duration) -> Result<()>;
    /// Pause between lines.
    async fn wait(&self, duration: Duration);
}

/// Line-oriented user input (keyboard, or a transcript in tests).
#[allow(async_fn_in_trait)]
pub trait InputSource {
    /// Show `prompt` and read one line, trimmed. `None` means end of input.
    async fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

// ── Speech Port ───────────────────────────────────────────────────────────────

/// Text-to-speech backend.
#[allow(async_fn_in_trait)]
pub trait SpeechEngine {
    /// Speak `text` and return once it has been spoken.
    async fn speak(&self, text: &str, settings: &VoiceSettings) -> Result<()>;
    /// Voices the backend offers.
    async fn voices(&self) -> Result<Vec<Voice>>;
}
