//! Integration tests for configuration handling via CLI.
//!
//! These tests verify that `~/.config/dotpad/config.toml` values (here
//! injected through `DOTPAD_CONFIG` / `--config`) reach the layout and
//! canvas stages, and that malformed values are rejected up front.

mod common;

use common::TestEnv;
use predicates::prelude::*;
use serde_json::Value;

fn geometry_json(env: &TestEnv, dot: &str) -> Value {
    let output = env
        .dotpad()
        .arg("geometry")
        .write_stdin(dot.to_string())
        .output()
        .unwrap();
    assert!(output.status.success(), "geometry failed: {output:?}");
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_margin_widens_drawing() {
    let env = TestEnv::new();
    let default_width = geometry_json(&env, "digraph { a }")["width"]
        .as_f64()
        .unwrap();

    env.write_config("[layout]\nmargin = 20.0\n");
    let wide_width = geometry_json(&env, "digraph { a }")["width"]
        .as_f64()
        .unwrap();

    // Margin applies on both sides
    assert_eq!(wide_width, default_width + 24.0);
}

#[test]
fn test_ranksep_stretches_chain() {
    let env = TestEnv::new();
    let dot = "digraph { a -> b }";
    let default_height = geometry_json(&env, dot)["height"].as_f64().unwrap();

    env.write_config("[layout]\nranksep = 100.0\n");
    let tall_height = geometry_json(&env, dot)["height"].as_f64().unwrap();

    assert!(tall_height > default_height);
}

#[test]
fn test_negative_layout_value_rejected() {
    let env = TestEnv::new();
    env.write_config("[layout]\nranksep = -1.0\n");

    env.dotpad()
        .arg("geometry")
        .write_stdin("digraph { a }")
        .assert()
        .failure()
        .stderr(predicate::str::contains("ranksep"));
}

#[test]
fn test_config_flag_overrides_env() {
    let env = TestEnv::new();
    let alt = env.path().join("alt.toml");
    std::fs::write(&alt, "[layout]\nmargin = 50.0\n").unwrap();

    let output = env
        .dotpad()
        .args(["--config", alt.to_str().unwrap(), "geometry"])
        .write_stdin("digraph { a }")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    // 54-wide node box plus 50 on each side
    assert_eq!(json["width"].as_f64().unwrap(), 154.0);
}

#[test]
fn test_unknown_config_keys_are_ignored() {
    let env = TestEnv::new();
    env.write_config("[layout]\nmargin = 8.0\nfuture_knob = true\n");

    env.dotpad()
        .arg("geometry")
        .write_stdin("digraph { a }")
        .assert()
        .success();
}
