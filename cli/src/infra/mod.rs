//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: process execution, HTTP
//! downloads, archive extraction, filesystem access, speech synthesis and the
//! console robot.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod assets;
pub mod command_runner;
pub mod config;
pub mod extract;
pub mod fetch;
pub mod fs;
pub mod input;
pub mod robot;
pub mod speech;
