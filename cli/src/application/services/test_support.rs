//! Shared test helpers for application service tests.
//!
//! Provides cross-platform `exit_status()`, canned `Output` values, and
//! recording doubles for the `CommandRunner` and `ProgressReporter` ports.

#![allow(clippy::expect_used)]

use std::process::Output;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{CommandRunner, ProgressReporter};

/// Build an `ExitStatus` from a logical exit code (cross-platform).
#[cfg(unix)]
pub fn exit_status(code: i32) -> std::process::ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    std::process::ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
pub fn exit_status(code: i32) -> std::process::ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    #[allow(clippy::cast_sign_loss)]
    std::process::ExitStatus::from_raw(code as u32)
}

pub fn ok_output(stdout: &[u8]) -> Output {
    Output {
        status: exit_status(0),
        stdout: stdout.to_vec(),
        stderr: Vec::new(),
    }
}

pub fn fail_output(code: i32, stderr: &[u8]) -> Output {
    Output {
        status: exit_status(code),
        stdout: Vec::new(),
        stderr: stderr.to_vec(),
    }
}

/// One recorded process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub program: String,
    pub args: Vec<String>,
    pub stdin: Option<Vec<u8>>,
}

type Responder = Box<dyn Fn(&str, &[&str]) -> Result<Output> + Send + Sync>;

/// A `CommandRunner` that records every call and answers from a closure.
pub struct RecordingRunner {
    calls: Mutex<Vec<Call>>,
    respond: Responder,
}

impl RecordingRunner {
    /// Every command succeeds with empty output.
    pub fn ok() -> Self {
        Self::with(|_, _| Ok(ok_output(b"")))
    }

    pub fn with(respond: impl Fn(&str, &[&str]) -> Result<Output> + Send + Sync + 'static) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            respond: Box::new(respond),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("lock").clone()
    }

    fn record(&self, program: &str, args: &[&str], stdin: Option<&[u8]>) -> Result<Output> {
        self.calls.lock().expect("lock").push(Call {
            program: program.to_string(),
            args: args.iter().map(|a| (*a).to_string()).collect(),
            stdin: stdin.map(<[u8]>::to_vec),
        });
        (self.respond)(program, args)
    }
}

impl CommandRunner for RecordingRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        self.record(program, args, None)
    }

    async fn run_with_timeout(&self, program: &str, args: &[&str], _: Duration) -> Result<Output> {
        self.record(program, args, None)
    }

    async fn run_with_stdin(&self, program: &str, args: &[&str], stdin: &[u8]) -> Result<Output> {
        self.record(program, args, Some(stdin))
    }
}

/// A `ProgressReporter` that keeps every message, prefixed by its level.
#[derive(Default)]
pub struct RecordingReporter {
    messages: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().expect("lock").clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter_map(|m| m.strip_prefix("warn: ").map(str::to_string))
            .collect()
    }
}

impl ProgressReporter for RecordingReporter {
    fn step(&self, message: &str) {
        self.messages.lock().expect("lock").push(format!("step: {message}"));
    }

    fn success(&self, message: &str) {
        self.messages.lock().expect("lock").push(format!("success: {message}"));
    }

    fn warn(&self, message: &str) {
        self.messages.lock().expect("lock").push(format!("warn: {message}"));
    }
}

/// `LocalFs` over the real filesystem, for tests that run in a temp dir.
pub struct DiskFs;

impl crate::application::ports::LocalFs for DiskFs {
    fn file_size(&self, path: &std::path::Path) -> Result<Option<u64>> {
        Ok(std::fs::metadata(path).ok().map(|m| m.len()))
    }

    fn exists(&self, path: &std::path::Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &std::path::Path) -> Result<()> {
        Ok(std::fs::create_dir_all(path)?)
    }

    fn remove_file(&self, path: &std::path::Path) -> Result<()> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }

    fn remove_dir_all(&self, path: &std::path::Path) -> Result<()> {
        if path.exists() {
            std::fs::remove_dir_all(path)?;
        }
        Ok(())
    }

    fn rename(&self, from: &std::path::Path, to: &std::path::Path) -> Result<()> {
        Ok(std::fs::rename(from, to)?)
    }

    fn list_dir(&self, path: &std::path::Path) -> Result<Vec<std::path::PathBuf>> {
        let entries = std::fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<_>>()?;
        Ok(entries)
    }

    fn is_dir(&self, path: &std::path::Path) -> bool {
        path.is_dir()
    }
}
