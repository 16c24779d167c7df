//! Integration tests for the reachy-lab CLI
//!
//! These tests spawn the actual binary and test end-to-end behavior.
//! Every test points `REACHY_LAB_CONFIG` at a temp file so the user's
//! `~/.reachy-lab/config.yaml` is never read or written.

#![allow(clippy::expect_used, clippy::unwrap_used, deprecated)]

mod cli_tests;
mod config_command;
mod helpers;
mod lesson_command;
mod models_command;
mod status_command;
