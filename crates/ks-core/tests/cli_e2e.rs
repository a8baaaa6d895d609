//! End-to-end tests for the ks-core binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn write_session(path: &Path, text: &str) {
    let events: Vec<serde_json::Value> = text
        .chars()
        .enumerate()
        .map(|(i, c)| {
            serde_json::json!({
                "timestamp": format!("2026-01-15T14:30:{:02}Z", i % 60),
                "key": c.to_string(),
                "kind": "key_down",
            })
        })
        .collect();
    let log = serde_json::json!({
        "timestamp": "2026-01-15T14:30:00Z",
        "events": events,
    });
    std::fs::write(path, serde_json::to_string_pretty(&log).unwrap()).unwrap();
}

fn ks_core() -> Command {
    Command::cargo_bin("ks-core").unwrap()
}

#[test]
fn sanitize_redacts_secret_in_stdout_record() {
    let dir = tempfile::tempdir().unwrap();
    let session = dir.path().join("session.json");
    let secrets = dir.path().join("secrets.txt");
    write_session(&session, "login: hunter2 done");
    std::fs::write(&secrets, "hunter2\n").unwrap();

    ks_core()
        .arg("sanitize")
        .arg(&session)
        .arg("--secrets")
        .arg(&secrets)
        .assert()
        .success()
        .stdout(predicate::str::contains("[REDACTED]"))
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn sanitize_summary_format() {
    let dir = tempfile::tempdir().unwrap();
    let session = dir.path().join("session.json");
    let secrets = dir.path().join("secrets.txt");
    write_session(&session, "say hunter2");
    std::fs::write(&secrets, "hunter2\n").unwrap();

    ks_core()
        .arg("sanitize")
        .arg(&session)
        .arg("--secrets")
        .arg(&secrets)
        .arg("--format")
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("redacted"))
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn sanitize_jsonl_emits_one_line_per_event() {
    let dir = tempfile::tempdir().unwrap();
    let session = dir.path().join("session.json");
    let secrets = dir.path().join("secrets.txt");
    write_session(&session, "abc");
    std::fs::write(&secrets, "unrelated-secret\n").unwrap();

    let output = ks_core()
        .arg("sanitize")
        .arg(&session)
        .arg("--secrets")
        .arg(&secrets)
        .arg("--format")
        .arg("jsonl")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8(output).unwrap();
    assert_eq!(text.lines().count(), 3);
    for line in text.lines() {
        let event: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(event["redacted"], false);
    }
}

#[test]
fn sanitize_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let session = dir.path().join("session.json");
    let secrets = dir.path().join("secrets.txt");
    let output = dir.path().join("clean.json");
    write_session(&session, "pw hunter2");
    std::fs::write(&secrets, "hunter2\n").unwrap();

    ks_core()
        .arg("sanitize")
        .arg(&session)
        .arg("--secrets")
        .arg(&secrets)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.contains("[REDACTED]"));
    assert!(!written.contains("hunter2"));
}

#[test]
fn sanitize_directory_batch() {
    let dir = tempfile::tempdir().unwrap();
    let logs = dir.path().join("logs");
    let out = dir.path().join("out");
    std::fs::create_dir(&logs).unwrap();
    write_session(&logs.join("one.json"), "has hunter2 inside");
    write_session(&logs.join("two.json"), "nothing here");
    let secrets = dir.path().join("secrets.txt");
    std::fs::write(&secrets, "hunter2\n").unwrap();

    ks_core()
        .arg("sanitize")
        .arg(&logs)
        .arg("--secrets")
        .arg(&secrets)
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("one.json"))
        .stdout(predicate::str::contains("two.json"));

    assert!(out.join("one.json").exists());
    assert!(out.join("two.json").exists());
    let one = std::fs::read_to_string(out.join("one.json")).unwrap();
    assert!(!one.contains("hunter2"));
}

#[test]
fn sanitize_directory_requires_destination() {
    let dir = tempfile::tempdir().unwrap();
    let logs = dir.path().join("logs");
    std::fs::create_dir(&logs).unwrap();
    let secrets = dir.path().join("secrets.txt");
    std::fs::write(&secrets, "hunter2\n").unwrap();

    ks_core()
        .arg("sanitize")
        .arg(&logs)
        .arg("--secrets")
        .arg(&secrets)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--output"));
}

#[test]
fn scan_reports_counts_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let session = dir.path().join("session.json");
    let secrets = dir.path().join("secrets.txt");
    write_session(&session, "the hunter2 secret");
    std::fs::write(&secrets, "hunter2\n").unwrap();
    let before = std::fs::read_to_string(&session).unwrap();

    ks_core()
        .arg("scan")
        .arg(&session)
        .arg("--secrets")
        .arg(&secrets)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"final_text\": 1"));

    // Scan never touches the input.
    assert_eq!(std::fs::read_to_string(&session).unwrap(), before);
}

#[test]
fn extract_prints_raw_text() {
    let dir = tempfile::tempdir().unwrap();
    let session = dir.path().join("session.json");
    write_session(&session, "plain text here");

    ks_core()
        .arg("extract")
        .arg(&session)
        .assert()
        .success()
        .stdout(predicate::str::contains("plain text here"));
}

#[test]
fn missing_secrets_file_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let session = dir.path().join("session.json");
    write_session(&session, "abc");

    ks_core()
        .arg("sanitize")
        .arg(&session)
        .arg("--secrets")
        .arg(dir.path().join("nope.txt"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error["));
}

#[test]
fn invalid_threshold_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let session = dir.path().join("session.json");
    let secrets = dir.path().join("secrets.txt");
    write_session(&session, "abc");
    std::fs::write(&secrets, "hunter2\n").unwrap();

    ks_core()
        .arg("sanitize")
        .arg(&session)
        .arg("--secrets")
        .arg(&secrets)
        .arg("--threshold")
        .arg("2.0")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("fuzzy_threshold"));
}

#[test]
fn case_insensitive_flag() {
    let dir = tempfile::tempdir().unwrap();
    let session = dir.path().join("session.json");
    let secrets = dir.path().join("secrets.txt");
    write_session(&session, "xyzABC123qrs");
    std::fs::write(&secrets, "abc123\n").unwrap();

    ks_core()
        .arg("sanitize")
        .arg(&session)
        .arg("--secrets")
        .arg(&secrets)
        .arg("--case-insensitive")
        .arg("--format")
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 final-text match"));
}
