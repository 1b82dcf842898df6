use thiserror::Error;

/// Unified error type for plugin-release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Invalid version '{0}': must be a valid semantic version")]
    InvalidVersion(String),

    #[error("Could not find a past version. Versions: {versions}")]
    NoPastVersion { versions: String },

    #[error("Command `{command}` failed: {message}")]
    Command { command: String, message: String },

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Platform error: {0}")]
    Platform(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results in plugin-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create an invalid-version error for the given input string
    pub fn invalid_version(value: impl Into<String>) -> Self {
        ReleaseError::InvalidVersion(value.into())
    }

    /// Create a no-past-version error listing the versions that were considered
    pub fn no_past_version(considered: &[semver::Version]) -> Self {
        let versions = considered
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        ReleaseError::NoPastVersion { versions }
    }

    /// Create a command-failure error with context
    pub fn command(command: impl Into<String>, message: impl Into<String>) -> Self {
        ReleaseError::Command {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Create a manifest error with context
    pub fn manifest(msg: impl Into<String>) -> Self {
        ReleaseError::Manifest(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a platform error with context
    pub fn platform(msg: impl Into<String>) -> Self {
        ReleaseError::Platform(msg.into())
    }
}
