//! Tests for the rawtone command line.

mod common;

use common::*;
use pretty_assertions::assert_eq;
use std::path::Path;
use std::process::{Command, Output};

fn rawtone(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rawtone"))
        .args(args)
        .current_dir(dir)
        .env_remove("RAWTONE_CONFIG")
        .env("RUST_LOG", "warn")
        .output()
        .expect("run rawtone")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_presets_lists_all() {
    let ws = Workspace::new();
    let out = rawtone(ws.dir.path(), &["presets", "--json"]);
    assert!(out.status.success());

    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|p| p["name"].as_str())
        .collect();
    assert_eq!(names.len(), 18);
    assert!(names.contains(&"black_and_white"));
}

#[test]
fn test_enhance_writes_output() {
    let ws = Workspace::new();
    ws.write_rgb("in.png", &daylight_scene(32, 24));

    let out = rawtone(
        ws.dir.path(),
        &["enhance", "in.png", "-o", "out.jpg", "--preset", "landscape"],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(stdout(&out).contains("landscape"));
    assert_dimensions(&assert_jpeg(&read(&ws.path("out.jpg"))), 32, 24);
}

#[test]
fn test_unknown_preset_fails() {
    let ws = Workspace::new();
    ws.write_rgb("in.png", &daylight_scene(8, 8));

    let out = rawtone(
        ws.dir.path(),
        &["enhance", "in.png", "-o", "out.jpg", "--preset", "lomography"],
    );
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("lomography"));
    assert!(!ws.path("out.jpg").exists());
}

#[test]
fn test_analyze_json() {
    let ws = Workspace::new();
    ws.write_rgb("in.png", &night_scene(16, 16));

    let out = rawtone(ws.dir.path(), &["analyze", "in.png", "--json"]);
    assert!(out.status.success());

    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["width"], 16);
    assert_eq!(json["low_light"], true);
}

#[test]
fn test_config_in_working_directory_sets_preset() {
    let ws = Workspace::new();
    ws.write_rgb("in.png", &daylight_scene(16, 16));
    ws.write_config("preset: retro\n");

    let out = rawtone(ws.dir.path(), &["plan", "in.png", "--json"]);
    assert!(out.status.success());

    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["preset"], "retro");
}

#[test]
fn test_explicit_broken_config_fails() {
    let ws = Workspace::new();
    ws.write_rgb("in.png", &daylight_scene(16, 16));
    let config = ws.path("broken.yaml");
    std::fs::write(&config, "jpeg_quality: 500\n").unwrap();

    let out = rawtone(
        ws.dir.path(),
        &["--config", config.to_str().unwrap(), "plan", "in.png"],
    );
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Config error"));
}

#[test]
fn test_broken_default_config_falls_back() {
    let ws = Workspace::new();
    ws.write_rgb("in.png", &daylight_scene(16, 16));
    ws.write_config("preset: [not, a, preset\n");

    let out = rawtone(ws.dir.path(), &["plan", "in.png", "--json"]);
    assert!(out.status.success());

    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["preset"], "standard");
}
