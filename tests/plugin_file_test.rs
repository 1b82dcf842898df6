// tests/plugin_file_test.rs
//
// Assembling a plugin distribution file from real zip bytes on disk.

use plugin_release::checksum::sha256_hex;
use plugin_release::plugin::{Platform, PluginFileBuilder};

use std::fs;

#[test]
fn test_assemble_plugin_file_for_two_platforms() {
    let dir = tempfile::tempdir().unwrap();
    let linux_zip = dir.path().join("json-plugin-x86_64-unknown-linux-gnu.zip");
    let mac_zip = dir.path().join("json-plugin-x86_64-apple-darwin.zip");
    fs::write(&linux_zip, b"linux bytes").unwrap();
    fs::write(&mac_zip, b"mac bytes").unwrap();

    let mut builder = PluginFileBuilder::new("json-plugin", "0.3.0");
    let linux_checksum = builder
        .add_platform(
            Platform::LinuxX8664,
            &linux_zip,
            "https://github.com/example/json-plugin/releases/download/0.3.0/json-plugin-x86_64-unknown-linux-gnu.zip",
        )
        .unwrap();
    let mac_checksum = builder
        .add_platform(
            Platform::DarwinX8664,
            &mac_zip,
            "https://github.com/example/json-plugin/releases/download/0.3.0/json-plugin-x86_64-apple-darwin.zip",
        )
        .unwrap();

    assert_eq!(linux_checksum, sha256_hex(b"linux bytes"));
    assert_eq!(mac_checksum, sha256_hex(b"mac bytes"));

    let out_path = dir.path().join("plugin.json");
    builder.write_to_path(&out_path).unwrap();

    let text = fs::read_to_string(&out_path).unwrap();
    assert!(text.ends_with("\n"));
    assert_eq!(sha256_hex(text.as_bytes()), builder.output_checksum().unwrap());

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["schemaVersion"], 2);
    assert_eq!(value["kind"], "process");
    assert_eq!(value["name"], "json-plugin");
    assert_eq!(value["version"], "0.3.0");
    assert_eq!(
        value["linux-x86_64"]["checksum"],
        linux_checksum.as_str()
    );
    assert_eq!(
        value["darwin-x86_64"]["reference"],
        "https://github.com/example/json-plugin/releases/download/0.3.0/json-plugin-x86_64-apple-darwin.zip"
    );
}

#[test]
fn test_plugin_file_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let zip = dir.path().join("a.zip");
    fs::write(&zip, b"bytes").unwrap();

    let build = || {
        let mut builder = PluginFileBuilder::new("json-plugin", "0.3.0");
        builder
            .add_platform(Platform::LinuxX8664, &zip, "https://example.com/a.zip")
            .unwrap();
        builder.output_text().unwrap()
    };
    assert_eq!(build(), build());
}
