//! End-to-end tests driving the shcase binary
//!
//! Each test writes a case file into a temp directory and points the binary
//! at it via `SHCASE_FILE`, then asserts on exit status and report text.

#![cfg(unix)]

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Write `yaml` to a case file in a fresh temp dir; keep the dir alive.
fn case_file(yaml: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("test.yml");
    fs::write(&path, yaml).expect("write case file");
    (dir, path)
}

fn shcase_cmd(case_file: &PathBuf) -> Command {
    let mut cmd = Command::cargo_bin("shcase").expect("shcase binary");
    cmd.env("SHCASE_FILE", case_file);
    cmd
}

#[test]
fn all_passing_cases_exit_zero() {
    let (_dir, path) = case_file(
        r#"
- name: echo
  command: echo hi
  stdout: "hi\n"
- name: pipeline
  command: printf 'a\nb\n' | wc -l | tr -d ' '
  stdout: "2\n"
"#,
    );

    shcase_cmd(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("test_echo"))
        .stdout(predicate::str::contains("test_pipeline"));
}

#[test]
fn failing_case_reports_expected_and_actual() {
    let (_dir, path) = case_file(
        r#"
- name: bad
  command: echo wrong
  stdout: "right\n"
"#,
    );

    shcase_cmd(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("test_bad"))
        .stdout(predicate::str::contains("right"))
        .stdout(predicate::str::contains("wrong"));
}

#[test]
fn one_failure_does_not_abort_other_cases() {
    let (_dir, path) = case_file(
        r#"
- name: bad
  command: echo wrong
  stdout: "right\n"
- name: good
  command: echo hi
  stdout: "hi\n"
"#,
    );

    shcase_cmd(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("test_good ... ok"));
}

#[test]
fn missing_case_file_aborts_before_any_test() {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("test.yml");

    shcase_cmd(&path)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot read case file"))
        .stdout(predicate::str::contains("running").not());
}

#[test]
fn malformed_case_file_aborts_before_any_test() {
    // `stdout` missing from the first mapping
    let (_dir, path) = case_file(
        r#"
- name: incomplete
  command: echo hi
"#,
    );

    shcase_cmd(&path)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot parse case file"))
        .stdout(predicate::str::contains("running").not());
}

#[test]
fn list_flag_shows_one_test_per_case() {
    let (_dir, path) = case_file(
        r#"
- name: echo
  command: echo hi
  stdout: "hi\n"
- name: other
  command: "true"
  stdout: ""
"#,
    );

    shcase_cmd(&path)
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("test_echo: test"))
        .stdout(predicate::str::contains("test_other: test"));
}

#[test]
fn name_filter_is_inherited_from_the_framework() {
    // The failing case is filtered out, so the run succeeds.
    let (_dir, path) = case_file(
        r#"
- name: good
  command: echo hi
  stdout: "hi\n"
- name: bad
  command: echo wrong
  stdout: "right\n"
"#,
    );

    shcase_cmd(&path)
        .args(["--exact", "test_good"])
        .assert()
        .success()
        .stdout(predicate::str::contains("test_bad").not());
}

#[test]
fn duplicate_names_register_a_single_test() {
    let (_dir, path) = case_file(
        r#"
- name: dup
  command: echo first
  stdout: "first\n"
- name: dup
  command: echo second
  stdout: "second\n"
"#,
    );

    // Only the later case survives, and it passes on its own expectation.
    shcase_cmd(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 passed"));
}
