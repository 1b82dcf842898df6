//! Plugin distribution file assembly.
//!
//! Builds the `plugin.json` manifest that points each supported platform at
//! its release zip archive, with a sha256 checksum per archive and for the
//! manifest text itself.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::checksum::sha256_hex;
use crate::error::{ReleaseError, Result};

/// A platform a plugin binary can be distributed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "darwin-x86_64")]
    DarwinX8664,
    #[serde(rename = "darwin-aarch64")]
    DarwinAarch64,
    #[serde(rename = "linux-x86_64")]
    LinuxX8664,
    #[serde(rename = "linux-x86_64-musl")]
    LinuxX8664Musl,
    #[serde(rename = "linux-aarch64")]
    LinuxAarch64,
    #[serde(rename = "linux-aarch64-musl")]
    LinuxAarch64Musl,
    #[serde(rename = "windows-x86_64")]
    WindowsX8664,
    #[serde(rename = "windows-aarch64")]
    WindowsAarch64,
}

impl Platform {
    /// Every supported platform, in distribution-manifest order.
    pub const ALL: [Platform; 8] = [
        Platform::DarwinX8664,
        Platform::DarwinAarch64,
        Platform::LinuxX8664,
        Platform::LinuxX8664Musl,
        Platform::LinuxAarch64,
        Platform::LinuxAarch64Musl,
        Platform::WindowsX8664,
        Platform::WindowsAarch64,
    ];

    /// The platform key used in configuration and the plugin file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::DarwinX8664 => "darwin-x86_64",
            Platform::DarwinAarch64 => "darwin-aarch64",
            Platform::LinuxX8664 => "linux-x86_64",
            Platform::LinuxX8664Musl => "linux-x86_64-musl",
            Platform::LinuxAarch64 => "linux-aarch64",
            Platform::LinuxAarch64Musl => "linux-aarch64-musl",
            Platform::WindowsX8664 => "windows-x86_64",
            Platform::WindowsAarch64 => "windows-aarch64",
        }
    }

    /// The Rust target triple the release archive is built for.
    pub fn target_triple(&self) -> &'static str {
        match self {
            Platform::DarwinX8664 => "x86_64-apple-darwin",
            Platform::DarwinAarch64 => "aarch64-apple-darwin",
            Platform::LinuxX8664 => "x86_64-unknown-linux-gnu",
            Platform::LinuxX8664Musl => "x86_64-unknown-linux-musl",
            Platform::LinuxAarch64 => "aarch64-unknown-linux-gnu",
            Platform::LinuxAarch64Musl => "aarch64-unknown-linux-musl",
            Platform::WindowsX8664 => "x86_64-pc-windows-msvc",
            Platform::WindowsAarch64 => "aarch64-pc-windows-msvc",
        }
    }

    /// The standard zip archive name for a plugin on this platform.
    pub fn zip_file_name(&self, plugin_name: &str) -> String {
        format!("{}-{}.zip", plugin_name, self.target_triple())
    }

    /// Detect the platform the tool is currently running on.
    ///
    /// Never resolves to a musl variant; those only exist as cross-compiled
    /// release targets.
    pub fn current() -> Result<Platform> {
        match (std::env::consts::OS, std::env::consts::ARCH) {
            ("macos", "x86_64") => Ok(Platform::DarwinX8664),
            ("macos", "aarch64") => Ok(Platform::DarwinAarch64),
            ("linux", "x86_64") => Ok(Platform::LinuxX8664),
            ("linux", "aarch64") => Ok(Platform::LinuxAarch64),
            ("windows", "x86_64") => Ok(Platform::WindowsX8664),
            ("windows", "aarch64") => Ok(Platform::WindowsAarch64),
            (os, arch) => Err(ReleaseError::platform(format!(
                "Not supported platform: {}-{}",
                os, arch
            ))),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds a process-plugin distribution file.
///
/// The output always starts with `schemaVersion`, `kind`, `name` and
/// `version`, followed by one entry per added platform in insertion order.
pub struct PluginFileBuilder {
    output: Map<String, Value>,
}

impl PluginFileBuilder {
    pub fn new(name: &str, version: &str) -> Self {
        let mut output = Map::new();
        output.insert("schemaVersion".to_string(), json!(2));
        output.insert("kind".to_string(), json!("process"));
        output.insert("name".to_string(), json!(name));
        output.insert("version".to_string(), json!(version));
        PluginFileBuilder { output }
    }

    pub fn plugin_name(&self) -> &str {
        self.output
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn version(&self) -> &str {
        self.output
            .get("version")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Add a platform entry from a zip archive on disk.
    ///
    /// Reads the archive, records its checksum together with the url the
    /// archive will be distributed at, and returns the checksum.
    pub fn add_platform(
        &mut self,
        platform: Platform,
        zip_file_path: &Path,
        zip_url: &str,
    ) -> Result<String> {
        let bytes = fs::read(zip_file_path)?;
        let checksum = sha256_hex(&bytes);
        self.output.insert(
            platform.to_string(),
            json!({
                "reference": zip_url,
                "checksum": checksum,
            }),
        );
        Ok(checksum)
    }

    /// The plugin file text: pretty-printed JSON with a trailing newline.
    pub fn output_text(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.output)? + "\n")
    }

    /// Checksum of the plugin file text, for release notes.
    pub fn output_checksum(&self) -> Result<String> {
        Ok(sha256_hex(self.output_text()?.as_bytes()))
    }

    /// Write the plugin file to disk.
    pub fn write_to_path(&self, file_path: &Path) -> Result<()> {
        fs::write(file_path, self.output_text()?)?;
        Ok(())
    }
}
