//! Integration tests for `reachy-lab models`: the provisioner end to end
//! against a local HTTP server.

use predicates::prelude::*;

use crate::helpers::{Sandbox, closed_port, model_zip, serve_once};

const MODEL: &str = "vosk-model-small-en-us-0.15";

/// Config that replaces the default model URL with `url`.
fn model_config(sandbox: &Sandbox, url: &str, min_size: u64) -> String {
    let models = sandbox.models_dir();
    format!(
        "setup:\n  mode: offline-voice\n  models_dir: {models}\n\
         assets:\n\
         - name: {MODEL}\n  url: {url}\n  archive: {archive}\n  min_size: {min_size}\n  \
           extract_dir: {extract}\n  required_entries: [am, conf, graph, ivector]\n",
        models = models.display(),
        archive = models.join(format!("{MODEL}.zip")).display(),
        extract = models.join(MODEL).display(),
    )
}

fn leftover_partials(sandbox: &Sandbox) -> Vec<String> {
    std::fs::read_dir(sandbox.models_dir())
        .map(|entries| {
            entries
                .flatten()
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .filter(|n| n.contains("partial"))
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn test_models_in_lite_mode_is_a_no_op() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["models", "--mode", "lite"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no models required"));
    assert!(!sandbox.models_dir().exists());
}

#[test]
fn test_unreachable_source_exits_3_and_leaves_no_partial() {
    let sandbox = Sandbox::new();
    let url = format!("http://127.0.0.1:{}/model.zip", closed_port());
    sandbox.write_config(&model_config(&sandbox, &url, 10));

    sandbox
        .cmd()
        .arg("models")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Download of"))
        .stderr(predicate::str::contains(url.as_str()))
        .stderr(predicate::str::contains("reachy-lab models"));

    assert!(sandbox.models_dir().is_dir(), "models dir is created first");
    assert!(!sandbox.models_dir().join(format!("{MODEL}.zip")).exists());
    assert!(leftover_partials(&sandbox).is_empty());
}

#[test]
fn test_json_error_object_carries_failure_code() {
    let sandbox = Sandbox::new();
    let url = format!("http://127.0.0.1:{}/model.zip", closed_port());
    sandbox.write_config(&model_config(&sandbox, &url, 10));

    let out = sandbox.cmd().args(["models", "--json"]).output().unwrap();
    assert_eq!(out.status.code(), Some(3));
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["error"], true);
    assert_eq!(v["code"], "transport_failure");
    assert_eq!(v["exit_code"], 3);
}

#[test]
fn test_undersized_download_exits_4_and_is_removed() {
    let sandbox = Sandbox::new();
    let url = serve_once(model_zip(MODEL));
    sandbox.write_config(&model_config(&sandbox, &url, 50_000_000));

    sandbox
        .cmd()
        .arg("models")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("corrupted or incomplete"));
    assert!(!sandbox.models_dir().join(format!("{MODEL}.zip")).exists());
}

#[test]
fn test_corrupt_archive_exits_5_and_removes_archive() {
    let sandbox = Sandbox::new();
    let url = serve_once(vec![b'x'; 4096]);
    sandbox.write_config(&model_config(&sandbox, &url, 10));

    sandbox
        .cmd()
        .arg("models")
        .assert()
        .code(5)
        .stderr(predicate::str::contains("Cannot extract"));
    assert!(!sandbox.models_dir().join(format!("{MODEL}.zip")).exists());
    assert!(!sandbox.models_dir().join(MODEL).exists());
    assert!(leftover_partials(&sandbox).is_empty());
}

#[test]
fn test_download_extract_then_rerun_is_idempotent() {
    let sandbox = Sandbox::new();
    let url = serve_once(model_zip(MODEL));
    sandbox.write_config(&model_config(&sandbox, &url, 10));

    sandbox.cmd().arg("models").assert().success();
    let extracted = sandbox.models_dir().join(MODEL);
    for entry in ["am", "conf", "graph", "ivector"] {
        assert!(extracted.join(entry).is_dir(), "missing {entry}");
    }
    assert!(extracted.join("conf").join("model.conf").is_file());

    // The server is gone; a second run must not touch the network.
    sandbox
        .cmd()
        .arg("models")
        .assert()
        .success()
        .stdout(predicate::str::contains("already available"));

    let out = sandbox.cmd().args(["status", "--json"]).output().unwrap();
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["assets"][0]["ready"], true);
}
