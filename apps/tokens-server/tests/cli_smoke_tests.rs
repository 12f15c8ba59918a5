#![allow(clippy::unwrap_used, clippy::expect_used)]

//! CLI smoke tests for the tokens-server binary.

use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

const SECRET: &str = "0123456789abcdef0123456789abcdef";

fn run_tokens_server(args: &[&str], envs: &[(&str, &str)]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tokens-server"))
        .args(args)
        .env_remove("APP__AUTH__JWT_SECRET")
        .envs(envs.iter().copied())
        .env_remove("RUST_LOG")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute tokens-server")
}

fn write_config(dir: &TempDir, body: &str) -> String {
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, body).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_cli_help_command() {
    let output = run_tokens_server(&["--help"], &[]);
    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"), "Should contain usage information");
    assert!(stdout.contains("run"), "Should contain 'run' subcommand");
    assert!(stdout.contains("check"), "Should contain 'check' subcommand");
    assert!(stdout.contains("--config"), "Should mention config option");
    assert!(stdout.contains("--print-config"));
}

#[test]
fn test_cli_version_command() {
    let output = run_tokens_server(&["--version"], &[]);
    assert!(output.status.success(), "Version command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("tokens-server"));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_check_with_valid_config_file() {
    let dir = TempDir::new().unwrap();
    let config = write_config(
        &dir,
        &format!("server:\n  bind_addr: \"127.0.0.1:0\"\nauth:\n  jwt_secret: \"{SECRET}\"\n"),
    );

    let output = run_tokens_server(&["--config", &config, "check"], &[]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "check failed: {stdout}");
    assert!(stdout.contains("Configuration is valid"));
    assert!(!stdout.contains(SECRET), "secret must not be printed");
}

#[test]
fn test_check_takes_secret_from_env() {
    let output = run_tokens_server(&["check"], &[("APP__AUTH__JWT_SECRET", SECRET)]);
    assert!(output.status.success());
}

#[test]
fn test_check_rejects_short_secret() {
    let output = run_tokens_server(&["check"], &[("APP__AUTH__JWT_SECRET", "too-short")]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("at least 32 bytes"), "stderr: {stderr}");
}

#[test]
fn test_check_without_secret_names_the_key() {
    let output = run_tokens_server(&["check"], &[]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("auth.jwt_secret must not be empty"), "stderr: {stderr}");
}

#[test]
fn test_missing_config_file_is_an_error() {
    let missing = Path::new("/definitely/not/here/config.yaml");
    let output = run_tokens_server(&["--config", missing.to_str().unwrap(), "check"], &[]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("config file does not exist"), "stderr: {stderr}");
}

#[test]
fn test_print_config_applies_port_override_and_redacts() {
    let output = run_tokens_server(
        &["--print-config", "--port", "9123"],
        &[("APP__AUTH__JWT_SECRET", SECRET)],
    );
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["server"]["bind_addr"], "127.0.0.1:9123");
    assert_eq!(json["auth"]["jwt_secret"], "[REDACTED]");
    assert_eq!(json["store"]["uri"], "memory://design-tokens");
}
