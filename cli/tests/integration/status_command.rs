//! Integration tests for `reachy-lab status`.

use predicates::prelude::*;

use crate::helpers::Sandbox;

#[test]
fn test_status_json_reports_missing_environment_and_model() {
    let sandbox = Sandbox::new();
    let out = sandbox
        .cmd()
        .args(["status", "--json", "--mode", "offline-voice"])
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["mode"], "offline-voice");
    assert_eq!(v["venv"]["ready"], false);
    assert_eq!(v["ready"], false);
    let assets = v["assets"].as_array().unwrap();
    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0]["name"], "vosk-model-small-en-us-0.15");
    assert_eq!(assets[0]["present"], false);
    assert!(!sandbox.models_dir().exists(), "status must not create directories");
}

#[test]
fn test_status_lite_mode_needs_no_models() {
    let out = Sandbox::new()
        .cmd()
        .args(["status", "--json", "--mode", "lite"])
        .output()
        .unwrap();
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert!(v["assets"].as_array().unwrap().is_empty());
}

#[test]
fn test_status_human_output_suggests_next_steps() {
    Sandbox::new()
        .cmd()
        .args(["status", "--mode", "offline-voice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reachy-lab setup"))
        .stdout(predicate::str::contains("reachy-lab models"));
}

#[test]
fn test_status_uses_configured_mode() {
    let sandbox = Sandbox::new();
    sandbox.write_config("setup:\n  mode: simulation\n");
    let out = sandbox.cmd().args(["status", "--json"]).output().unwrap();
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["mode"], "simulation");
    assert_eq!(v["tier"], "simulation (physics)");
}
