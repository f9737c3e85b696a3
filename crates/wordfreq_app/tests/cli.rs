use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn wordfreq() -> Command {
    Command::cargo_bin("wordfreq").unwrap()
}

#[test]
fn analyzes_inline_text() {
    wordfreq()
        .args(["--text", "The cat sat on the mat. The cat ran.", "--workers", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(" 1. cat"))
        .stdout(predicate::str::contains("Unique words: 4"))
        .stdout(predicate::str::contains("Total words: 5"))
        .stdout(predicate::str::contains("Words occurring once: 3"))
        .stdout(predicate::str::contains("Source: inline text"));
}

#[test]
fn analyzes_a_file_with_top_limit() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("alice.txt");
    fs::write(
        &input,
        "Rabbit rabbit rabbit. Queen queen. Hatter. Alice alice alice alice.",
    )
    .unwrap();

    wordfreq()
        .arg("--file")
        .arg(&input)
        .args(["--top", "2", "--no-chart"])
        .assert()
        .success()
        .stdout(predicate::str::contains(" 1. alice"))
        .stdout(predicate::str::contains(" 2. rabbit"))
        .stdout(predicate::str::contains(" 3. ").not())
        .stdout(predicate::str::contains("|#").not());
}

#[test]
fn chart_is_printed_by_default() {
    wordfreq()
        .args(["--text", "rabbit rabbit hole"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rabbit |"));
}

#[test]
fn exports_reports_to_directory() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");

    wordfreq()
        .args(["--text", "queen hearts queen tarts"])
        .arg("--export-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("frequencies.json"));

    let json = fs::read_to_string(out.join("frequencies.json")).unwrap();
    assert!(json.contains("\"queen\""));
    assert!(out.join("top_words.txt").exists());
}

#[test]
fn config_file_supplies_defaults() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("wordfreq.ron");
    fs::write(&config, "(top: Some(1), chart: Some(false))").unwrap();

    wordfreq()
        .args(["--text", "tea tea party"])
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Top 1 most frequent words"))
        .stdout(predicate::str::contains(" 2. ").not());
}

#[test]
fn zero_workers_fails() {
    wordfreq()
        .args(["--text", "anything", "--workers", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("num_workers"));
}

#[test]
fn missing_file_fails() {
    let temp = TempDir::new().unwrap();
    wordfreq()
        .arg("--file")
        .arg(temp.path().join("missing.txt"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn conflicting_sources_are_a_usage_error() {
    wordfreq()
        .args(["--text", "a", "--url", "https://example.com"])
        .assert()
        .code(2);
}
