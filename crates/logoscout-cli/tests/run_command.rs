use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

#[allow(deprecated)]
fn get_logoscout_bin() -> PathBuf {
    assert_cmd::cargo::cargo_bin("logoscout")
}

#[test]
fn test_run_command_help() {
    let mut cmd = Command::new(get_logoscout_bin());
    cmd.arg("run").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--input"))
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--strategy"))
        .stdout(predicate::str::contains("--chrome-path"))
        .stdout(predicate::str::contains("logo_urls.csv"));
}

#[test]
fn test_run_without_inputs_fails() {
    let mut cmd = Command::new(get_logoscout_bin());
    cmd.arg("run").arg("--strategy").arg("dom-read");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No input URLs"));
}

#[test]
fn test_run_with_missing_input_file_fails() {
    let mut cmd = Command::new(get_logoscout_bin());
    cmd.arg("run")
        .arg("--strategy")
        .arg("dom-read")
        .arg("--input")
        .arg("/nonexistent/sites.txt");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read input file"));
}

#[test]
fn test_run_rejects_unknown_strategy() {
    let mut cmd = Command::new(get_logoscout_bin());
    cmd.arg("run")
        .arg("--url")
        .arg("https://www.acme.ae")
        .arg("--strategy")
        .arg("telepathy");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
