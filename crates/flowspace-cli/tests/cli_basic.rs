//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data directory
//! and checks the JSON it prints.

use std::io::Write;
use std::process::{Command, Stdio};

use serde_json::Value;
use tempfile::TempDir;

struct Output {
    stdout: String,
    stderr: String,
    code: i32,
}

fn run_cli_with_stdin(dir: &TempDir, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_flowspace"))
        .args(args)
        .env("FLOWSPACE_DATA_DIR", dir.path())
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn CLI");

    if let Some(mut pipe) = child.stdin.take() {
        pipe.write_all(stdin.as_bytes()).expect("Failed to write stdin");
    }
    let output = child.wait_with_output().expect("Failed to wait for CLI");

    Output {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        code: output.status.code().unwrap_or(-1),
    }
}

fn run_cli(dir: &TempDir, args: &[&str]) -> Output {
    run_cli_with_stdin(dir, args, "")
}

fn run_json(dir: &TempDir, args: &[&str]) -> Value {
    let out = run_cli(dir, args);
    assert_eq!(out.code, 0, "{args:?} failed: {}", out.stderr);
    serde_json::from_str(&out.stdout).unwrap_or_else(|e| panic!("{args:?}: {e}: {}", out.stdout))
}

// ============================================================================
// Tasks
// ============================================================================

#[test]
fn test_task_lifecycle() {
    let dir = tempfile::tempdir().unwrap();

    let added = run_json(&dir, &["task", "add", "  Write report  ", "--priority", "high"]);
    assert_eq!(added["type"], "TaskAdded");
    assert_eq!(added["priority"], "high");
    let id = added["id"].as_i64().unwrap().to_string();

    let list = run_json(&dir, &["task", "list"]);
    assert_eq!(list[0]["text"], "Write report");
    assert_eq!(list[0]["completed"], false);

    let toggled = run_json(&dir, &["task", "toggle", &id]);
    assert_eq!(toggled["completed"], true);

    let removed = run_json(&dir, &["task", "remove", &id]);
    assert_eq!(removed["type"], "TaskRemoved");
    assert_eq!(run_json(&dir, &["task", "list"]), Value::Array(vec![]));
}

#[test]
fn test_task_add_blank_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_cli(&dir, &["task", "add", "   "]);
    assert_eq!(out.code, 1);
    assert!(out.stderr.contains("empty"));
}

#[test]
fn test_task_unknown_id_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_cli(&dir, &["task", "toggle", "12345"]);
    assert_eq!(out.code, 1);
    assert!(out.stderr.contains("task not found"));
}

// ============================================================================
// Notes
// ============================================================================

#[test]
fn test_note_remove_requires_confirmation() {
    let dir = tempfile::tempdir().unwrap();
    let added = run_json(&dir, &["note", "add", "remember the milk"]);
    let id = added["id"].as_i64().unwrap().to_string();

    let declined = run_cli_with_stdin(&dir, &["note", "remove", &id], "n\n");
    assert_eq!(declined.code, 0);
    assert!(declined.stderr.contains("Delete this note?"));
    assert_eq!(run_json(&dir, &["note", "list"]).as_array().unwrap().len(), 1);

    let confirmed = run_cli_with_stdin(&dir, &["note", "remove", &id], "y\n");
    assert_eq!(confirmed.code, 0);
    assert_eq!(run_json(&dir, &["note", "list"]).as_array().unwrap().len(), 0);
}

#[test]
fn test_note_remove_yes_skips_prompt() {
    let dir = tempfile::tempdir().unwrap();
    let added = run_json(&dir, &["note", "add", "scratch"]);
    let id = added["id"].as_i64().unwrap().to_string();

    let removed = run_json(&dir, &["note", "remove", &id, "--yes"]);
    assert_eq!(removed["type"], "NoteRemoved");
}

// ============================================================================
// Timer
// ============================================================================

#[test]
fn test_timer_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let status = run_json(&dir, &["timer", "status"]);
    assert_eq!(status["type"], "StateSnapshot");
    assert_eq!(status["mode"], "focus");
    assert_eq!(status["display"], "25:00");
    assert_eq!(status["is_running"], false);
}

#[test]
fn test_timer_set_toggle_reset() {
    let dir = tempfile::tempdir().unwrap();

    let set = run_json(&dir, &["timer", "set", "15"]);
    assert_eq!(set["time_left_secs"], 900);

    let started = run_json(&dir, &["timer", "toggle"]);
    assert_eq!(started["type"], "TimerStarted");
    assert_eq!(run_json(&dir, &["timer", "status"])["is_running"], true);

    let reset = run_json(&dir, &["timer", "reset"]);
    assert_eq!(reset["type"], "TimerReset");
    let status = run_json(&dir, &["timer", "status"]);
    assert_eq!(status["is_running"], false);
    assert_eq!(status["display"], "15:00");
}

#[test]
fn test_timer_rejects_zero_minutes() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_cli(&dir, &["timer", "set", "0"]);
    assert_eq!(out.code, 1);
    assert_eq!(run_json(&dir, &["timer", "status"])["display"], "25:00");
}

#[test]
fn test_timer_length_refills_while_paused() {
    let dir = tempfile::tempdir().unwrap();

    let set = run_json(&dir, &["timer", "length", "40"]);
    assert_eq!(set["type"], "DurationSet");
    assert_eq!(set["session_minutes"], 40);
    assert_eq!(set["time_left_secs"], 2400);

    let status = run_json(&dir, &["timer", "status"]);
    assert_eq!(status["display"], "40:00");
    assert_eq!(status["is_running"], false);

    let out = run_cli(&dir, &["timer", "length", "0"]);
    assert_eq!(out.code, 1);
    assert_eq!(run_json(&dir, &["timer", "status"])["display"], "40:00");
}

#[test]
fn test_timer_presets() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(run_json(&dir, &["timer", "presets"]), serde_json::json!([15, 25, 50]));
}

// ============================================================================
// Stats, Theme, Config
// ============================================================================

#[test]
fn test_stats_dashboard() {
    let dir = tempfile::tempdir().unwrap();
    run_json(&dir, &["task", "add", "low", "-p", "low"]);
    run_json(&dir, &["task", "add", "medium"]);
    let high = run_json(&dir, &["task", "add", "high", "-p", "high"]);
    let id = high["id"].as_i64().unwrap().to_string();
    run_json(&dir, &["task", "toggle", &id]);

    let stats = run_json(&dir, &["stats"]);
    assert_eq!(stats["completion_percent"], 33);
    assert_eq!(stats["high_priority_completed"], 1);
    assert_eq!(stats["high_priority_total"], 1);
    assert_eq!(stats["sessions_completed"], 0);
    assert_eq!(stats["average_session_minutes"], 0);
    assert_eq!(stats["tier"], "low");
}

#[test]
fn test_theme_toggle_persists() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(run_json(&dir, &["theme", "show"]), "dark");
    let changed = run_json(&dir, &["theme", "toggle"]);
    assert_eq!(changed["theme"], "light");
    assert_eq!(run_json(&dir, &["theme", "show"]), "light");
}

#[test]
fn test_config_set_and_get() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_cli(&dir, &["config", "set", "timer.break_minutes", "10"]);
    assert_eq!(out.code, 0, "{}", out.stderr);

    let out = run_cli(&dir, &["config", "get", "timer.break_minutes"]);
    assert_eq!(out.stdout.trim(), "10");

    let out = run_cli(&dir, &["config", "set", "timer.break_minutes", "0"]);
    assert_eq!(out.code, 1);

    let out = run_cli(&dir, &["config", "get", "no.such.key"]);
    assert_eq!(out.code, 1);
}

#[test]
fn test_completions() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_cli(&dir, &["completions", "bash"]);
    assert_eq!(out.code, 0);
    assert!(out.stdout.contains("flowspace"));
}
