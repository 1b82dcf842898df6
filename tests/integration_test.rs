// tests/integration_test.rs
use serial_test::serial;
use std::process::Command;

#[test]
#[serial]
fn test_plugin_release_help() {
    let output = Command::new("cargo")
        .args(["run", "--bin", "plugin-release", "--", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("plugin-release"));
    assert!(stdout.contains("changelog"));
    assert!(stdout.contains("publish"));
    assert!(stdout.contains("plugin-file"));
}

#[test]
#[serial]
fn test_changelog_requires_version_argument() {
    let output = Command::new("cargo")
        .args(["run", "--bin", "plugin-release", "--", "changelog"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("VERSION_TO") || stderr.contains("version"));
}

#[test]
#[serial]
fn test_changelog_rejects_invalid_version() {
    let output = Command::new("cargo")
        .args([
            "run",
            "--bin",
            "plugin-release",
            "--",
            "changelog",
            "not-a-version",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Invalid version"));
}
