//! `TerminalReporter`: Presentation-layer implementation of `ProgressReporter`.
//!
//! Wraps `&OutputContext` so application services can emit progress events
//! without depending on any presentation type directly.

use std::sync::Mutex;

use indicatif::ProgressBar;
use owo_colors::OwoColorize as _;

use crate::application::ports::ProgressReporter;
use crate::output::{OutputContext, progress};

/// Terminal progress reporter that wraps an `OutputContext`.
///
/// - `step()` prints `"  → {message}"`, or starts a spinner in spinner mode
/// - `success()` prints `"  ✓ {message}"`, finishing any running spinner
/// - `warn()` prints `"  ! {message}"`
///
/// Everything is suppressed when `ctx.quiet`.
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
    spin: bool,
    active: Mutex<Option<(ProgressBar, String)>>,
}

impl<'a> TerminalReporter<'a> {
    /// Create a new `TerminalReporter` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self {
            ctx,
            spin: false,
            active: Mutex::new(None),
        }
    }

    /// Show each step as a spinner until the next event arrives.
    ///
    /// Only for phases that draw nothing else on the terminal; downloads
    /// render their own bar.
    #[must_use]
    pub fn spinning(ctx: &'a OutputContext) -> Self {
        Self {
            ctx,
            spin: ctx.show_progress(),
            active: Mutex::new(None),
        }
    }

    fn take_active(&self) -> Option<(ProgressBar, String)> {
        self.active
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .take()
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        if self.ctx.quiet {
            return;
        }
        if !self.spin {
            println!("  {} {message}", "→".style(self.ctx.styles.step));
            return;
        }
        if let Some((pb, previous)) = self.take_active() {
            progress::finish_ok(&pb, previous.trim_end_matches("..."));
        }
        let pb = progress::spinner(message);
        *self
            .active
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some((pb, message.to_string()));
    }

    fn success(&self, message: &str) {
        if self.ctx.quiet {
            return;
        }
        match self.take_active() {
            Some((pb, _)) => progress::finish_ok(&pb, message),
            None => println!("  {} {message}", "✓".style(self.ctx.styles.success)),
        }
    }

    fn warn(&self, message: &str) {
        if self.ctx.quiet {
            return;
        }
        let line = format!("  {} {message}", "!".style(self.ctx.styles.warning));
        let active = self
            .active
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        match active.as_ref() {
            Some((pb, _)) => pb.suspend(|| println!("{line}")),
            None => println!("{line}"),
        }
    }
}

impl Drop for TerminalReporter<'_> {
    fn drop(&mut self) {
        // A failed step leaves its spinner running; clear it before the error prints.
        if let Some((pb, _)) = self.take_active() {
            pb.finish_and_clear();
        }
    }
}
