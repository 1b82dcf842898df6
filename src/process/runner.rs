use std::process::Command;

use crate::error::{ReleaseError, Result};
use crate::process::{render_command, CommandRunner};

/// Real command runner backed by `std::process::Command`.
///
/// Commands run in the current working directory and inherit the
/// environment. Stderr is captured and folded into the error message when a
/// command fails.
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        ProcessRunner
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String> {
        let command_line = render_command(program, args);

        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| ReleaseError::command(&command_line, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ReleaseError::command(
                &command_line,
                format!(
                    "exit code {}\n{}",
                    output.status.code().unwrap_or(-1),
                    stderr.trim()
                ),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
