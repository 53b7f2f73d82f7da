//! Exit status of the `order-seed` binary.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Run order-seed in `dir` with a clean configuration environment.
fn execute_order_seed(dir: &Path, args: &[&str], env: &[(&str, &str)]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_order-seed"));
    command
        .args(args)
        .current_dir(dir)
        .env("RUST_LOG", "order_seed=debug")
        .env_remove("ORDER_COUNT")
        .env_remove("DYNAMODB_TABLE_NAME")
        .env_remove("DYNAMODB_ENDPOINT_URL");
    for (key, value) in env {
        command.env(key, value);
    }
    command.output().expect("failed to spawn order-seed")
}

fn describe(output: &Output) -> String {
    format!(
        "exit code: {:?}\nstdout: {}\nstderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

#[test]
fn test_completed_run_exits_zero() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("x.jsonl");

    let output = execute_order_seed(
        temp_dir.path(),
        &[
            "populate",
            "jsonl",
            "-o",
            output_path.to_str().unwrap(),
            "--order-count",
            "3",
            "--max-delay-ms",
            "0",
            "--min-delay-ms",
            "0",
        ],
        &[],
    );

    assert_eq!(output.status.code(), Some(0), "{}", describe(&output));
    let lines = std::fs::read_to_string(&output_path).unwrap();
    let primaries = lines.lines().filter(|l| l.contains("\"STATE#v1\"")).count();
    assert_eq!(primaries, 3);
}

#[test]
fn test_connection_failure_exits_one() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("no-such-dir").join("x.jsonl");

    let output = execute_order_seed(
        temp_dir.path(),
        &["populate", "jsonl", "-o", output_path.to_str().unwrap()],
        &[],
    );

    assert_eq!(output.status.code(), Some(1), "{}", describe(&output));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to connect"), "{stderr}");
    assert!(!output_path.exists());
}

#[test]
fn test_invalid_env_value_exits_one() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("x.jsonl");

    let output = execute_order_seed(
        temp_dir.path(),
        &["populate", "jsonl", "-o", output_path.to_str().unwrap()],
        &[("ORDER_COUNT", "abc")],
    );

    assert_eq!(output.status.code(), Some(1), "{}", describe(&output));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));
    assert!(!output_path.exists());
}

#[test]
fn test_help_exits_zero() {
    let temp_dir = TempDir::new().unwrap();

    let output = execute_order_seed(temp_dir.path(), &["populate", "--help"], &[]);

    assert_eq!(output.status.code(), Some(0), "{}", describe(&output));
    assert!(String::from_utf8_lossy(&output.stdout).contains("dynamodb"));
}
