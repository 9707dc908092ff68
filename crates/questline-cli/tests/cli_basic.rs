//! Basic CLI E2E tests.
//!
//! Tests invoke stateless CLI commands via cargo run and verify outputs.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "questline-cli", "--"])
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_help() {
    let (stdout, _, code) = run_cli(&["--help"]);
    assert_eq!(code, 0, "help failed");
    assert!(stdout.contains("Quest plan optimizer"));
}

#[test]
fn test_queue_list() {
    let (stdout, _, code) = run_cli(&["queue", "list"]);
    assert_eq!(code, 0, "queue list failed");
    assert!(stdout.contains("ranked"));
    assert!(stdout.contains("premier_draft"));
}

#[test]
fn test_queue_list_json() {
    let (stdout, _, code) = run_cli(&["queue", "list", "--json"]);
    assert_eq!(code, 0, "queue list JSON failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("invalid JSON output");
    let queues = parsed.as_array().expect("expected a JSON array");
    assert_eq!(queues.len(), 6);
}

#[test]
fn test_queue_ev_at_explicit_win_rate() {
    let (stdout, _, code) = run_cli(&["queue", "ev", "ranked", "--win-rate", "0.5", "--json"]);
    assert_eq!(code, 0, "queue ev failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("invalid JSON output");
    let rows = parsed.as_array().expect("expected a JSON array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["queue"], "ranked");
    assert!(rows[0]["ev"]["net_gold_value"].as_f64().unwrap() > 0.0);
}

#[test]
fn test_queue_ev_rejects_bad_win_rate() {
    let (_, stderr, code) = run_cli(&["queue", "ev", "ranked", "--win-rate", "1.5"]);
    assert_ne!(code, 0, "out-of-range win rate should fail");
    assert!(stderr.contains("win rate"));
}
