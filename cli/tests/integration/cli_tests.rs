//! Top-level CLI behavior: help, version, usage errors.

use predicates::prelude::*;

use crate::helpers::Sandbox;

#[test]
fn test_help_lists_every_command() {
    let out = Sandbox::new().cmd().arg("--help").output().unwrap();
    assert!(out.status.success());
    let help = String::from_utf8_lossy(&out.stdout);
    for command in ["setup", "models", "status", "lesson", "say", "config", "version"] {
        assert!(help.contains(command), "{command} missing from:\n{help}");
    }
}

#[test]
fn test_no_arguments_prints_help_and_fails() {
    Sandbox::new()
        .cmd()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_version_prints_package_version() {
    Sandbox::new()
        .cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(format!("reachy-lab {}\n", env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_version_json_is_an_object() {
    let out = Sandbox::new()
        .cmd()
        .args(["version", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_unknown_mode_is_a_usage_error() {
    Sandbox::new()
        .cmd()
        .args(["models", "--mode", "turbo"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("offline-voice"));
}

#[test]
fn test_say_help_documents_voice_flags() {
    Sandbox::new()
        .cmd()
        .args(["say", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--rate"))
        .stdout(predicate::str::contains("--list-voices"))
        .stdout(predicate::str::contains("--demo"));
}

#[test]
fn test_say_rejects_rate_out_of_range_before_speaking() {
    Sandbox::new()
        .cmd()
        .args(["say", "--rate", "1000", "hello"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("voice.rate"));
}
