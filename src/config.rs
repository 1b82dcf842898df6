use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ReleaseError, Result};
use crate::plugin::Platform;

/// Represents the complete configuration for plugin-release.
///
/// Describes the plugin being released and where its manifest lives.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub plugin: PluginConfig,

    #[serde(default)]
    pub manifest: ManifestConfig,
}

/// Configuration for the plugin distribution file.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PluginConfig {
    /// Name of the plugin (e.g., "my-plugin"). Required for `plugin-file`.
    #[serde(default)]
    pub name: String,

    /// GitHub repository slug (e.g., "owner/my-plugin") used to build
    /// release download urls. Required for `plugin-file` outside test mode.
    #[serde(default)]
    pub repo: Option<String>,

    /// Platforms the plugin is distributed for.
    #[serde(default = "default_platforms")]
    pub platforms: Vec<Platform>,
}

fn default_platforms() -> Vec<Platform> {
    Platform::ALL.to_vec()
}

impl Default for PluginConfig {
    fn default() -> Self {
        PluginConfig {
            name: String::new(),
            repo: None,
            platforms: default_platforms(),
        }
    }
}

/// Configuration for manifest version handling.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ManifestConfig {
    #[serde(default = "default_cargo_toml_path")]
    pub cargo_toml_path: String,
}

fn default_cargo_toml_path() -> String {
    "./Cargo.toml".to_string()
}

impl Default for ManifestConfig {
    fn default() -> Self {
        ManifestConfig {
            cargo_toml_path: default_cargo_toml_path(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `pluginrelease.toml` in current directory
/// 3. `pluginrelease.toml` in user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./pluginrelease.toml").exists() {
        fs::read_to_string("./pluginrelease.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("pluginrelease.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str).map_err(|e| ReleaseError::config(e.to_string()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.plugin.name.is_empty());
        assert!(config.plugin.repo.is_none());
        assert_eq!(config.plugin.platforms.len(), 8);
        assert_eq!(config.manifest.cargo_toml_path, "./Cargo.toml");
    }

    #[test]
    fn test_parse_config() {
        let config: Config = toml::from_str(
            r#"
[plugin]
name = "my-plugin"
repo = "owner/my-plugin"
platforms = ["darwin-x86_64", "linux-x86_64-musl"]

[manifest]
cargo_toml_path = "./crates/my-plugin/Cargo.toml"
"#,
        )
        .unwrap();
        assert_eq!(config.plugin.name, "my-plugin");
        assert_eq!(config.plugin.repo.as_deref(), Some("owner/my-plugin"));
        assert_eq!(
            config.plugin.platforms,
            vec![Platform::DarwinX8664, Platform::LinuxX8664Musl]
        );
        assert_eq!(
            config.manifest.cargo_toml_path,
            "./crates/my-plugin/Cargo.toml"
        );
    }

    #[test]
    fn test_parse_config_partial_uses_defaults() {
        let config: Config = toml::from_str("[plugin]\nname = \"my-plugin\"\n").unwrap();
        assert_eq!(config.plugin.name, "my-plugin");
        assert_eq!(config.plugin.platforms.len(), 8);
        assert_eq!(config.manifest.cargo_toml_path, "./Cargo.toml");
    }

    #[test]
    fn test_parse_config_invalid_platform_fails() {
        let result: std::result::Result<Config, _> =
            toml::from_str("[plugin]\nplatforms = [\"amiga-68k\"]\n");
        assert!(result.is_err());
    }
}
