use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

#[allow(deprecated)]
fn get_logoscout_bin() -> PathBuf {
    assert_cmd::cargo::cargo_bin("logoscout")
}

#[test]
fn test_site_name_extracts_from_full_url() {
    let mut cmd = Command::new(get_logoscout_bin());
    cmd.arg("site-name").arg("https://www.acme.ae");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("https://www.acme.ae -> acme"));
}

#[test]
fn test_site_name_handles_multiple_urls() {
    let mut cmd = Command::new(get_logoscout_bin());
    cmd.arg("site-name")
        .arg("https://www.acme.ae")
        .arg("http://globex.com/about")
        .arg("portal.example.org");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("-> acme"))
        .stdout(predicate::str::contains("-> globex"))
        .stdout(predicate::str::contains("-> portal"));
}

#[test]
fn test_site_name_reports_unextractable_input() {
    let mut cmd = Command::new(get_logoscout_bin());
    cmd.arg("site-name").arg("https://localhost");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("(no site name)"));
}

#[test]
fn test_site_name_requires_at_least_one_url() {
    let mut cmd = Command::new(get_logoscout_bin());
    cmd.arg("site-name");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}
