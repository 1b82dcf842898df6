//! Command execution abstraction layer
//!
//! This module provides a trait-based abstraction over external command
//! invocation, allowing for multiple implementations including a real
//! process spawner and a mock implementation for testing.
//!
//! The primary abstraction is the [CommandRunner] trait. The concrete
//! implementations include:
//!
//! - [runner::ProcessRunner]: spawns real processes via `std::process::Command`
//! - [mock::MockRunner]: a recording mock that serves canned stdout for tests
//!
//! Most code should depend on the [CommandRunner] trait rather than concrete
//! implementations to enable easy testing and flexibility.

pub mod mock;
pub mod runner;

pub use mock::MockRunner;
pub use runner::ProcessRunner;

use crate::error::Result;

/// Common command execution trait for abstraction
///
/// Each call is a single, independent request/response unit: run one
/// external command, capture its stdout, fail on non-zero exit. Implementors
/// must be `Send + Sync` so callers can fan out independent invocations
/// across threads.
pub trait CommandRunner: Send + Sync {
    /// Run a command and return its trimmed stdout.
    ///
    /// # Arguments
    /// * `program` - The executable to run (e.g., "git")
    /// * `args` - Arguments passed to the executable
    ///
    /// # Returns
    /// * `Ok(String)` - Captured stdout with surrounding whitespace trimmed
    /// * `Err(ReleaseError::Command)` - If the command cannot be spawned or
    ///   exits with a non-zero status
    fn run(&self, program: &str, args: &[&str]) -> Result<String>;

    /// Run a command and return its non-empty stdout lines.
    fn run_lines(&self, program: &str, args: &[&str]) -> Result<Vec<String>> {
        Ok(self
            .run(program, args)?
            .lines()
            .map(str::to_string)
            .filter(|line| !line.is_empty())
            .collect())
    }
}

/// Render a program and its arguments as a single command line.
///
/// Used for error messages and for keying mock responses.
pub fn render_command(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_command() {
        assert_eq!(render_command("git", &["tag"]), "git tag");
        assert_eq!(
            render_command("git", &["fetch", "origin", "--tags"]),
            "git fetch origin --tags"
        );
        assert_eq!(render_command("git", &[]), "git");
    }

    #[test]
    fn test_run_lines_splits_and_drops_empty() {
        let mock = MockRunner::new();
        mock.on("git tag", "1.0.0\n\n1.1.0\n");
        let lines = mock.run_lines("git", &["tag"]).unwrap();
        assert_eq!(lines, vec!["1.0.0".to_string(), "1.1.0".to_string()]);
    }
}
