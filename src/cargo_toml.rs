//! Version extraction and substitution for `Cargo.toml` manifests.
//!
//! Deliberately a plain regex splice rather than a TOML round-trip so the
//! rest of the manifest (comments, ordering, formatting) is left untouched.

use std::fs;
use std::path::PathBuf;

use regex::Regex;

use crate::error::{ReleaseError, Result};

const VERSION_FIELD_PATTERN: &str = r#"version\s*=\s*"(\d+\.\d+\.\d+)""#;

/// Handle to a `Cargo.toml` file for reading and writing its package version.
pub struct CargoToml {
    path: PathBuf,
}

impl CargoToml {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CargoToml { path: path.into() }
    }

    /// Extract the package version from the manifest.
    ///
    /// Matches the first `version = "x.y.z"` field, which in a conventional
    /// manifest is the `[package]` version.
    pub fn version(&self) -> Result<String> {
        let text = fs::read_to_string(&self.path)?;
        let pattern = self.version_pattern()?;
        match pattern.captures(&text).and_then(|caps| caps.get(1)) {
            Some(version) => Ok(version.as_str().to_string()),
            None => Err(ReleaseError::manifest(format!(
                "Could not find version in Cargo.toml at {}",
                self.path.display()
            ))),
        }
    }

    /// Replace the package version in place, preserving all other formatting.
    pub fn set_version(&self, new_version: &str) -> Result<()> {
        let mut text = fs::read_to_string(&self.path)?;
        let pattern = self.version_pattern()?;
        let range = match pattern.captures(&text).and_then(|caps| caps.get(1)) {
            Some(version) => version.range(),
            None => {
                return Err(ReleaseError::manifest(format!(
                    "Could not find version in Cargo.toml at {}",
                    self.path.display()
                )))
            }
        };
        text.replace_range(range, new_version);
        fs::write(&self.path, text)?;
        Ok(())
    }

    fn version_pattern(&self) -> Result<Regex> {
        Regex::new(VERSION_FIELD_PATTERN)
            .map_err(|e| ReleaseError::manifest(format!("invalid version pattern: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MANIFEST: &str = r#"[package]
name = "my-plugin"
version = "0.4.2"
edition = "2021"

[dependencies]
serde = { version = "1.0", features = ["derive"] }
"#;

    fn manifest_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_version_extracts_package_version() {
        let file = manifest_file(MANIFEST);
        let manifest = CargoToml::new(file.path());
        assert_eq!(manifest.version().unwrap(), "0.4.2");
    }

    #[test]
    fn test_version_missing_fails() {
        let file = manifest_file("[package]\nname = \"my-plugin\"\n");
        let manifest = CargoToml::new(file.path());
        let err = manifest.version().unwrap_err();
        assert!(err.to_string().contains("Could not find version"));
    }

    #[test]
    fn test_set_version_splices_in_place() {
        let file = manifest_file(MANIFEST);
        let manifest = CargoToml::new(file.path());
        manifest.set_version("0.5.0").unwrap();

        let text = std::fs::read_to_string(file.path()).unwrap();
        assert!(text.contains("version = \"0.5.0\""));
        // the dependency version lines are untouched
        assert!(text.contains(r#"serde = { version = "1.0", features = ["derive"] }"#));
        assert_eq!(manifest.version().unwrap(), "0.5.0");
    }

    #[test]
    fn test_set_version_missing_fails_without_writing() {
        let file = manifest_file("name = \"my-plugin\"\n");
        let manifest = CargoToml::new(file.path());
        assert!(manifest.set_version("1.0.0").is_err());
        let text = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(text, "name = \"my-plugin\"\n");
    }
}
