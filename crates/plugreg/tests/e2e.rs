// SPDX-FileCopyrightText: 2026 Plugreg Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests driving the `plugreg` binary.
//!
//! Each test runs the binary in an isolated temp directory with `HOME`
//! redirected, so no user or local configuration leaks in.

use std::path::Path;
use std::process::{Command, Output};

use serde_json::{json, Value};

fn plugreg(dir: &Path, args: &[&str]) -> Output {
    plugreg_with_env(dir, args, &[])
}

fn plugreg_with_env(dir: &Path, args: &[&str], vars: &[(&str, &str)]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_plugreg"));
    command
        .args(args)
        .current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("PLUGREG_CATALOG_PATH")
        .env_remove("PLUGREG_CATALOG_FORMAT")
        .env_remove("PLUGREG_RESOLVE_STRICT")
        .env_remove("PLUGREG_LOG_LEVEL")
        .env_remove("RUST_LOG");
    command.envs(vars.iter().copied());
    command.output().expect("failed to run plugreg binary")
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn list_json_keeps_catalog_order() {
    let dir = tempfile::tempdir().unwrap();
    let output = plugreg(dir.path(), &["list", "--json"]);
    assert!(output.status.success());

    let records = stdout_json(&output);
    let keys: Vec<&str> = records
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["key"].as_str().unwrap())
        .collect();
    assert_eq!(
        keys,
        vec![
            "AragonGovern",
            "Chainlink",
            "Charts",
            "CommentBox",
            "GnosisImpact",
            "HAL",
            "Poap",
            "Quorum",
            "SafeSnap",
            "Subscribe"
        ]
    );
}

#[test]
fn resolve_merges_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let output = plugreg(
        dir.path(),
        &["resolve", "Quorum", "space", "--overrides", r#"{"total": 100}"#],
    );
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let config = stdout_json(&output);
    assert_eq!(config["total"], json!(100));
}

#[test]
fn resolve_unknown_plugin_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = plugreg(dir.path(), &["resolve", "Nope", "space"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("plugin not found: Nope"));
}

#[test]
fn check_exit_codes() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(plugreg(dir.path(), &["check", "HAL", "1.0.0"]).status.code(), Some(0));
    assert_eq!(plugreg(dir.path(), &["check", "HAL", "2.0.0"]).status.code(), Some(1));
    assert_eq!(plugreg(dir.path(), &["check", "HAL", "bogus"]).status.code(), Some(2));
}

#[test]
fn local_config_selects_catalog() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("mine.json"),
        r#"{"Mine": {"name": "Mine", "version": "3.1.0", "defaults": {"space": {"a": 1}}}}"#,
    )
    .unwrap();
    std::fs::write(
        dir.path().join("plugreg.toml"),
        "[catalog]\npath = \"mine.json\"\n",
    )
    .unwrap();

    let output = plugreg(dir.path(), &["show", "Mine"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let record = stdout_json(&output);
    assert_eq!(record["version"], json!("3.1.0"));
    assert_eq!(record["defaults"]["space"], json!({ "a": 1 }));
}

#[test]
fn invalid_config_exits_with_diagnostics() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("plugreg.toml"), "[log]\nlevle = \"info\"\n").unwrap();

    let output = plugreg(dir.path(), &["list"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn validate_reports_broken_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[A]\nname = \"\"\nversion = \"1.0.0\"\n").unwrap();

    let output = plugreg(dir.path(), &["--plain", "validate", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("[FAIL]"));
}

#[test]
fn missing_explicit_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = plugreg(
        dir.path(),
        &["--config", "/nonexistent/plugreg.toml", "check", "HAL", "1.0.0"],
    );
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[test]
fn env_vars_override_configuration() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("env.json"),
        r#"{"FromEnv": {"name": "From Env", "version": "1.0.0"}}"#,
    )
    .unwrap();

    let output = plugreg_with_env(
        dir.path(),
        &["list", "--json"],
        &[("PLUGREG_CATALOG_PATH", "env.json"), ("PLUGREG_LOG_LEVEL", "debug")],
    );
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let records = stdout_json(&output);
    assert_eq!(records[0]["key"], json!("FromEnv"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("configuration loaded"), "stderr: {stderr}");
    assert!(stderr.contains("validated plugin record"), "stderr: {stderr}");
}
