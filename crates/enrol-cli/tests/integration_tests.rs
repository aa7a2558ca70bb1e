//! Integration tests for the `enrol` binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

/// `enrol` isolated from the caller's config dir, log filter and colours.
fn enrol() -> Command {
    let mut cmd = Command::cargo_bin("enrol").unwrap();
    cmd.env("XDG_CONFIG_HOME", std::env::temp_dir().join("enrol-tests-no-config"))
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

const VALID: [&str; 14] = [
    "--name",
    "Grace Hopper",
    "--id",
    "S12345",
    "--email",
    "grace@navy.mil",
    "--phone",
    "+1 555-0100",
    "--dob",
    "1906-12-09",
    "--gender",
    "Female",
    "--course",
    "Computer Science",
];

// ── top level ─────────────────────────────────────────────────────────────────

#[test]
fn help_lists_subcommands() {
    enrol()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("register"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("watch"));
}

#[test]
fn version_flag() {
    enrol()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// ── check ─────────────────────────────────────────────────────────────────────

#[test]
fn check_accepts_valid_email() {
    enrol()
        .args(["check", "email", "ada@example.org"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Email: valid"));
}

#[test]
fn check_short_name_fails_with_rule_text() {
    enrol()
        .args(["check", "name", "Al"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains(
            "Student name is required and must be at least 3 characters long.",
        ))
        .stderr(predicate::str::contains("failed validation"));
}

#[test]
fn check_empty_phone_is_valid() {
    enrol().args(["check", "phone"]).assert().success();
}

#[test]
fn check_unknown_field_is_not_found() {
    enrol().args(["check", "age", "42"]).assert().code(3);
}

#[test]
fn check_future_dob_as_json() {
    enrol()
        .args(["--output-format", "json", "check", "dob", "2999-01-01"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("\"valid\": false"))
        .stdout(predicate::str::contains(
            "Date of Birth cannot be in the future.",
        ));
}

// ── register ──────────────────────────────────────────────────────────────────

#[test]
fn register_valid_form_prints_banner() {
    enrol()
        .arg("register")
        .args(VALID)
        .assert()
        .success()
        .stdout(predicate::str::contains("Registration successful!"))
        .stdout(predicate::str::contains("Reference:"));
}

#[test]
fn register_valid_form_as_json_record() {
    enrol()
        .args(["--output-format", "json", "register"])
        .args(VALID)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"accepted\""))
        .stdout(predicate::str::contains("\"studentName\": \"Grace Hopper\""))
        .stdout(predicate::str::contains("\"dob\": \"1906-12-09\""));
}

#[test]
fn register_missing_fields_exits_with_validation_error() {
    enrol()
        .args(["register", "--name", "Grace Hopper", "--id", "S1"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("A valid email address is required."))
        .stdout(predicate::str::contains("Date of Birth is required."))
        .stdout(predicate::str::contains("Gender is required."))
        .stdout(predicate::str::contains("Course Enrolled is required."))
        .stdout(predicate::str::contains("Student name").not())
        .stderr(predicate::str::contains("4 field(s) failed validation"));
}

#[test]
fn register_rejection_as_json_lists_errors() {
    enrol()
        .args(["--output-format", "json", "register"])
        .args(VALID)
        .args(["--email", "not-an-email"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("\"status\": \"rejected\""))
        .stdout(predicate::str::contains("\"field\": \"email\""));
}

#[test]
fn register_quiet_still_reports_errors() {
    enrol()
        .args(["--quiet", "register"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Student ID is required"));
}

// ── config ────────────────────────────────────────────────────────────────────

#[test]
fn config_get_default() {
    enrol()
        .args(["config", "get", "form.banner_hide_ms"])
        .assert()
        .success()
        .stdout(predicate::str::contains("form.banner_hide_ms = 5000"));
}

#[test]
fn config_env_overrides_default() {
    enrol()
        .env("ENROL__FORM__BANNER_HIDE_MS", "250")
        .args(["config", "get", "form.banner_hide_ms"])
        .assert()
        .success()
        .stdout(predicate::str::contains("form.banner_hide_ms = 250"));
}

#[test]
fn config_file_is_read() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[live_reload]\nurl = \"http://localhost:8080/form.html\"").unwrap();

    enrol()
        .arg("--config")
        .arg(file.path())
        .args(["config", "get", "live_reload.url"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://localhost:8080/form.html"));
}

#[test]
fn missing_config_file_exits_4() {
    let dir = tempfile::tempdir().unwrap();
    enrol()
        .arg("--config")
        .arg(dir.path().join("nope.toml"))
        .args(["config", "list"])
        .assert()
        .code(4);
}

#[test]
fn config_unknown_key_exits_4() {
    enrol()
        .args(["config", "get", "form.colour"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn config_path_prints_a_toml_path() {
    enrol()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

// ── watch / completions ───────────────────────────────────────────────────────

#[test]
fn watch_rejects_url_without_host() {
    enrol()
        .args(["watch", "--url", "file:///tmp/index.html"])
        .assert()
        .code(2);
}

#[test]
fn watch_unreachable_server_is_reported() {
    // Port 9 (discard) is closed on test machines.
    enrol()
        .args(["watch", "--url", "http://127.0.0.1:9/index.html"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("ws://127.0.0.1:9/index.html/ws"));
}

#[test]
fn completions_for_bash() {
    enrol()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("enrol"));
}
