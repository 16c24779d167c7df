//! Integration tests for `reachy-lab config`.

use predicates::prelude::*;

use crate::helpers::Sandbox;

#[test]
fn test_config_show_without_file_prints_defaults() {
    Sandbox::new()
        .cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("setup.mode:"))
        .stdout(predicate::str::contains("lite"))
        .stdout(predicate::str::contains("voice.rate:"))
        .stdout(predicate::str::contains("150"));
}

#[test]
fn test_config_set_persists_and_show_reflects_it() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["config", "set", "setup.mode", "offline-voice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set setup.mode = offline-voice"));

    let saved = std::fs::read_to_string(sandbox.config_path()).unwrap();
    assert!(saved.contains("offline-voice"), "got: {saved}");

    sandbox
        .cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("offline-voice"));
}

#[test]
fn test_config_set_unknown_key_fails_and_writes_nothing() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["config", "set", "robot.speed", "fast"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown setting: robot.speed"))
        .stderr(predicate::str::contains("voice.rate"));
    assert!(!sandbox.config_path().exists());
}

#[test]
fn test_config_set_invalid_value_names_valid_range() {
    Sandbox::new()
        .cmd()
        .args(["config", "set", "voice.volume", "3"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid value for voice.volume"));
}

#[test]
fn test_config_set_none_clears_optional_value() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["config", "set", "voice.name", "en-us"])
        .assert()
        .success();
    sandbox
        .cmd()
        .args(["config", "set", "voice.name", "none"])
        .assert()
        .success();
    let saved = std::fs::read_to_string(sandbox.config_path()).unwrap();
    assert!(!saved.contains("en-us"), "got: {saved}");
}

#[test]
fn test_config_show_json_includes_path_and_settings() {
    let sandbox = Sandbox::new();
    let out = sandbox
        .cmd()
        .args(["config", "show", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(
        v["path"].as_str().unwrap(),
        sandbox.config_path().to_str().unwrap()
    );
    assert_eq!(v["config"]["setup"]["mode"], "lite");
    assert_eq!(v["config"]["voice"]["rate"], 150);
}

#[test]
fn test_malformed_config_file_is_reported() {
    let sandbox = Sandbox::new();
    sandbox.write_config("setup: [1, 2]\n");
    sandbox
        .cmd()
        .args(["config", "show"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot parse"));
}
