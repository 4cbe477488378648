//! CLI tests for the `launcher` binary.
//!
//! Spawns the binary in a scratch directory with a controlled environment
//! and checks the printed JSON and exit codes.

use std::fs;
use std::process::Command;

use launcher::exit_codes;
use serde_json::Value;

fn launcher(dir: &std::path::Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_launcher"));
    command
        .current_dir(dir)
        .env_remove("PORT")
        .env_remove("HOST")
        .env_remove("APP_ENV")
        .env_remove("RACK_ENV")
        .env_remove("RUST_LOG");
    command
}

#[test]
fn prints_resolved_options_as_json() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = launcher(temp.path())
        .args(["thin", "-p", "4000"])
        .env("HOST", "10.0.0.1")
        .output()
        .expect("run launcher");

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let json: Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(json["Port"], 4000);
    assert_eq!(json["Host"], "10.0.0.1");
    assert_eq!(json["server"], "thin");
    assert_eq!(json["user_supplied_options"], serde_json::json!(["Port"]));
}

#[test]
fn reads_defaults_from_config_file() {
    let temp = tempfile::tempdir().expect("tempdir");
    fs::create_dir_all(temp.path().join("config")).expect("config dir");
    fs::write(
        temp.path().join("config/launcher.toml"),
        "port = 8080\nenvironment = \"production\"\n",
    )
    .expect("write config");

    let output = launcher(temp.path()).output().expect("run launcher");

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let json: Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(json["Port"], 8080);
    assert_eq!(json["Host"], "0.0.0.0");
    assert_eq!(json["log_stdout"], false);
}

#[test]
fn invalid_port_env_exits_with_invalid_code() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = launcher(temp.path())
        .env("PORT", "nope")
        .output()
        .expect("run launcher");

    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("PORT=nope"), "stderr: {stderr}");
}

#[test]
fn output_does_not_depend_on_working_directory() {
    let first = tempfile::tempdir().expect("tempdir");
    let second = tempfile::tempdir().expect("tempdir");
    fs::create_dir_all(second.path().join("nested")).expect("nested dir");

    let from_first = launcher(first.path()).output().expect("run launcher");
    let from_second = launcher(&second.path().join("nested"))
        .output()
        .expect("run launcher");

    assert_eq!(from_first.status.code(), Some(exit_codes::OK));
    assert_eq!(from_second.status.code(), Some(exit_codes::OK));
    let first_json: Value = serde_json::from_slice(&from_first.stdout).expect("json output");
    let second_json: Value = serde_json::from_slice(&from_second.stdout).expect("json output");
    assert_eq!(first_json, second_json);
    assert_eq!(first_json["Port"], 3000);
}

#[test]
fn argument_errors_exit_with_invalid_code() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = launcher(temp.path())
        .args(["-p", "99999"])
        .output()
        .expect("run launcher");

    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("parse server arguments"), "stderr: {stderr}");
}

#[test]
fn help_exits_successfully() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = launcher(temp.path())
        .arg("--help")
        .output()
        .expect("run launcher");

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert!(String::from_utf8_lossy(&output.stdout).contains("--dev-caching"));
}
