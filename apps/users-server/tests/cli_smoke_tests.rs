//! CLI smoke tests for the users-server binary
//!
//! These tests verify configuration validation, help output and that the
//! server actually comes up with an in-memory database.

use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::timeout;

/// Helper to run the users-server binary with given arguments
fn run_users_server(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_users-server"))
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute users-server")
}

/// Helper to run the users-server binary with timeout; the child is killed on timeout.
async fn run_users_server_with_timeout(
    args: &[&str],
    timeout_duration: Duration,
) -> Result<std::process::Output, Box<dyn std::error::Error>> {
    let mut cmd = tokio::process::Command::new(env!("CARGO_BIN_EXE_users-server"));
    cmd.args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    match timeout(timeout_duration, cmd.output()).await {
        Ok(result) => result.map_err(|e| e.into()),
        Err(elapsed) => Err(elapsed.into()),
    }
}

/// Write a config whose home_dir points into the temp dir, so nothing lands in $HOME.
fn write_config(dir: &TempDir, name: &str, body: &str) -> String {
    let home = dir.path().join("home");
    let content = format!(
        "server:\n  home_dir: \"{}\"\n{}",
        home.to_string_lossy().replace('\\', "/"),
        body
    );
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write config file");
    path.to_string_lossy().to_string()
}

#[test]
fn test_cli_help_command() {
    let output = run_users_server(&["--help"]);

    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("users-server"), "Should contain binary name");
    assert!(stdout.contains("Usage:"), "Should contain usage information");
    assert!(stdout.contains("run"), "Should contain 'run' subcommand");
    assert!(stdout.contains("check"), "Should contain 'check' subcommand");
    assert!(stdout.contains("--config"), "Should mention config option");
    assert!(stdout.contains("--rpc-port"), "Should mention rpc port option");
}

#[test]
fn test_cli_version_command() {
    let output = run_users_server(&["--version"]);

    assert!(output.status.success(), "Version command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("users-server"), "Should contain binary name");
    assert!(stdout.contains("0.1.0"), "Should contain the version");
}

#[test]
fn test_cli_invalid_command() {
    let output = run_users_server(&["invalid-command"]);

    assert!(!output.status.success(), "Invalid command should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error") || stderr.contains("unrecognized"),
        "Should contain error message about invalid command: {}",
        stderr
    );
}

#[test]
fn test_cli_config_validation_missing_file() {
    let output = run_users_server(&["--config", "/nonexistent/config.yaml", "check"]);

    assert!(!output.status.success(), "Should fail with missing config");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("config file not found"),
        "Should mention the missing config file: {}",
        stderr
    );
}

#[test]
fn test_cli_config_flag_short_form() {
    let output = run_users_server(&["-c", "/nonexistent/config.yaml", "check"]);

    assert!(!output.status.success(), "Should fail with missing config file");
}

#[test]
fn test_cli_config_validation_invalid_yaml() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("invalid.yaml");
    std::fs::write(&config_path, "invalid: yaml: content: [unclosed")
        .expect("Failed to write file");

    let output = run_users_server(&["--config", config_path.to_str().unwrap(), "check"]);

    assert!(!output.status.success(), "Should fail with invalid YAML");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Failed to parse config file"),
        "Should mention YAML parsing issue: {}",
        stderr
    );
}

#[test]
fn test_cli_config_validation_valid_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(
        &temp_dir,
        "valid.yaml",
        r#"
database:
  url: "sqlite://database/users.db?mode=rwc"

logging:
  default:
    console_level: info
    file: "logs/users-server.log"
    file_level: info
    max_backups: 3
    max_size_mb: 100

modules:
  users_clubs:
    default_page_size: 20
"#,
    );

    let output = run_users_server(&["--config", &config_path, "check"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        output.status.success(),
        "Should succeed with valid config: {}",
        stderr
    );
    assert!(stdout.contains("Configuration check passed"), "{}", stdout);

    let db_file = temp_dir.path().join("home").join("database");
    assert!(
        Path::new(&db_file).is_dir(),
        "relative sqlite path must resolve under home_dir"
    );
}

#[test]
fn test_cli_invalid_logging_section_is_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(
        &temp_dir,
        "invalid.yaml",
        r#"
database:
  url: "sqlite://database/users.db"

logging:
  level: "info"
"#,
    );

    let output = run_users_server(&["--config", &config_path, "run"]);

    assert!(!output.status.success(), "Should fail with invalid logging section");
}

#[test]
fn test_cli_invalid_module_config_is_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(
        &temp_dir,
        "module.yaml",
        r#"
database:
  url: "sqlite://database/users.db"

modules:
  users_clubs:
    page: 5
"#,
    );

    let output = run_users_server(&["--config", &config_path, "check"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("users_clubs"), "{}", stderr);
}

#[test]
fn test_cli_mock_flag() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(
        &temp_dir,
        "mock.yaml",
        r#"
database:
  url: "mysql://localhost/nonexistent"
"#,
    );

    // Unsupported DSN would fail the check without --mock.
    let output = run_users_server(&["--config", &config_path, "check"]);
    assert!(!output.status.success());

    let output = run_users_server(&["--config", &config_path, "--mock", "check"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        output.status.success(),
        "Should succeed with mock database: {}",
        stderr
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("sqlite::memory:"));
}

#[test]
fn test_cli_print_config_applies_overrides() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(&temp_dir, "print.yaml", "");

    let output = run_users_server(&[
        "--config",
        &config_path,
        "--port",
        "8081",
        "--rpc-port",
        "9091",
        "--print-config",
    ]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("port: 8081"), "{}", stdout);
    assert!(stdout.contains("rpc_port: 9091"), "{}", stdout);
}

#[tokio::test]
async fn test_cli_run_command_with_mock_database() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(
        &temp_dir,
        "run.yaml",
        r#"
database:
  url: "sqlite://database/users.db?mode=rwc"

logging:
  default:
    console_level: info
"#,
    );

    let result = run_users_server_with_timeout(
        &[
            "--config",
            &config_path,
            "--mock",
            "--port",
            "0",
            "--rpc-port",
            "0",
            "run",
        ],
        Duration::from_secs(5),
    )
    .await;

    match result {
        Err(err) => assert!(
            err.to_string().contains("elapsed"),
            "Server failed to start: {}",
            err
        ),
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            panic!(
                "Server exited early ({}):\nSTDOUT: {}\nSTDERR: {}",
                output.status, stdout, stderr
            );
        }
    }
}

#[test]
fn test_cli_subcommand_help() {
    let output = run_users_server(&["run", "--help"]);
    assert!(output.status.success(), "Run subcommand help should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("REST and RPC"), "{}", stdout);

    let output = run_users_server(&["check", "--help"]);
    assert!(output.status.success(), "Check subcommand help should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Check configuration"), "{}", stdout);
}
