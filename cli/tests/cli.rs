use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn skink() -> Command {
  Command::cargo_bin("skink").expect("binary not built")
}

fn script(source: &str) -> NamedTempFile {
  let mut file = NamedTempFile::new().expect("failed to create temp file");
  file
    .write_all(source.as_bytes())
    .expect("failed to write temp file");
  file
}

#[test]
fn help_exits_zero() {
  skink()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("Usage"));
}

#[test]
fn short_help_exits_zero() {
  skink()
    .arg("-h")
    .assert()
    .success()
    .stdout(predicate::str::contains("Usage"));
}

#[test]
fn invalid_flag_exits_one() {
  skink().arg("--bogus").assert().failure().code(1);
}

#[test]
fn unreadable_file_exits_one() {
  skink()
    .arg("does-not-exist.sk")
    .assert()
    .failure()
    .code(1)
    .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn runs_a_script() {
  let file = script("x = 10\ny = 20\nresult = x + y * 2\nprint(result)\n");
  skink()
    .arg(file.path())
    .assert()
    .success()
    .stdout("50\n");
}

#[test]
fn debug_flag_dumps_tokens_and_tree() {
  let file = script("x = 1\n");
  skink()
    .arg("-d")
    .arg(file.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("Line 1: x (2)").and(predicate::str::contains("Assign")));
}

#[test]
fn invalid_tokens_fail_the_run() {
  let file = script("x = @\n");
  skink()
    .arg(file.path())
    .assert()
    .failure()
    .code(1)
    .stderr(predicate::str::contains("invalid token `@`"));
}

#[test]
fn no_arguments_runs_the_samples() {
  skink()
    .assert()
    .success()
    .stdout(
      predicate::str::contains("== arithmetic")
        .and(predicate::str::contains("50"))
        .and(predicate::str::contains("120"))
        .and(predicate::str::contains("Division by zero")),
    );
}
