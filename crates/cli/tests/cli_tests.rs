//! CLI integration tests

use std::process::Command;

fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new("cargo")
        .args(["run", "-p", "rdp-cli", "--", ])
        .args(args)
        .output()
        .expect("Failed to execute command")
}

/// Test that the CLI shows help
#[test]
fn test_cli_help() {
    let output = run_cli(&["--help"]);

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI help should succeed");
    assert!(
        stdout.contains("Ride Duration Predictor"),
        "Should show app name"
    );
    assert!(stdout.contains("encode"), "Should show encode command");
    assert!(stdout.contains("invoke"), "Should show invoke command");
    assert!(stdout.contains("health"), "Should show health command");
}

/// Test that the CLI shows version
#[test]
fn test_cli_version() {
    let output = run_cli(&["--version"]);

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI version should succeed");
    assert!(stdout.contains("rdp"), "Should show binary name");
}

/// Test encode subcommand help
#[test]
fn test_encode_help() {
    let output = run_cli(&["encode", "--help"]);

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Encode help should succeed");
    assert!(
        stdout.contains("--pu-location-id"),
        "Should show pickup zone option"
    );
    assert!(
        stdout.contains("--do-location-id"),
        "Should show drop-off zone option"
    );
    assert!(
        stdout.contains("--trip-distance"),
        "Should show distance option"
    );
    assert!(stdout.contains("--ride-id"), "Should show ride id option");
    assert!(stdout.contains("--ride-file"), "Should show file option");
}

/// Test invoke subcommand help
#[test]
fn test_invoke_help() {
    let output = run_cli(&["invoke", "--help"]);

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Invoke help should succeed");
    assert!(stdout.contains("--file"), "Should show file option");
    assert!(
        stdout.contains("--trip-distance"),
        "Should show inline ride options"
    );
}

/// Test format option
#[test]
fn test_format_option() {
    let output = run_cli(&["--help"]);

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("--format"), "Should show format option");
    assert!(stdout.contains("table"), "Should show table format");
    assert!(stdout.contains("json"), "Should show json format");
}

/// Test api-url option
#[test]
fn test_api_url_option() {
    let output = run_cli(&["--help"]);

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("--api-url"), "Should show api-url option");
    assert!(stdout.contains("RDP_API_URL"), "Should show env var");
}

/// Encoding a ride inline produces a payload that decodes back to the
/// same ride event
#[test]
fn test_encode_round_trips() {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    let output = run_cli(&[
        "encode",
        "--pu-location-id",
        "130",
        "--do-location-id",
        "205",
        "--trip-distance",
        "3.66",
        "--ride-id",
        "156",
    ]);

    assert!(output.status.success(), "Encode should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let decoded = STANDARD.decode(stdout.trim()).expect("Output is base64");
    let event: serde_json::Value = serde_json::from_slice(&decoded).expect("Payload is JSON");

    assert_eq!(event["ride"]["PULocationID"], 130);
    assert_eq!(event["ride"]["DOLocationID"], 205);
    assert_eq!(event["ride"]["trip_distance"], 3.66);
    assert_eq!(event["ride_id"], 156);
}

/// Encoding without the full set of ride flags fails
#[test]
fn test_encode_missing_flags() {
    let output = run_cli(&["encode", "--pu-location-id", "130"]);

    assert!(!output.status.success(), "Partial ride flags should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("--ride-file") || stderr.contains("error"),
        "Should explain the required flags"
    );
}

/// Test invalid command error handling
#[test]
fn test_invalid_command() {
    let output = run_cli(&["invalid-command"]);

    assert!(!output.status.success(), "Invalid command should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error") || stderr.contains("invalid"),
        "Should show error message"
    );
}
