//! Unit tests for the reachy-lab CLI
//!
//! These tests inspect the source tree and run without spawning anything.

mod architecture;
