use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::error::{ReleaseError, Result};
use crate::process::{render_command, CommandRunner};

/// Mock command runner for testing without spawning processes.
///
/// Responses are keyed by the full rendered command line (e.g. `git tag`).
/// Unregistered commands succeed with empty stdout, which keeps fixtures
/// small for side-effect-only commands like fetches. Every invocation is
/// recorded so tests can assert exactly which commands ran, and in what
/// order.
pub struct MockRunner {
    responses: Mutex<HashMap<String, String>>,
    failures: Mutex<HashSet<String>>,
    calls: Mutex<Vec<String>>,
}

impl MockRunner {
    /// Create a new mock with no canned responses
    pub fn new() -> Self {
        MockRunner {
            responses: Mutex::new(HashMap::new()),
            failures: Mutex::new(HashSet::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Register stdout for a command line
    pub fn on(&self, command: impl Into<String>, stdout: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(command.into(), stdout.into());
    }

    /// Make a command line fail with a non-zero exit
    pub fn fail(&self, command: impl Into<String>) {
        self.failures.lock().unwrap().insert(command.into());
    }

    /// All command lines invoked so far, in invocation order.
    ///
    /// Concurrent invocations appear in completion order; tests asserting
    /// order should restrict themselves to the sequential phases.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Whether a command line was invoked at least once
    pub fn was_called(&self, command: &str) -> bool {
        self.calls.lock().unwrap().iter().any(|c| c == command)
    }
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String> {
        let command_line = render_command(program, args);
        self.calls.lock().unwrap().push(command_line.clone());

        if self.failures.lock().unwrap().contains(&command_line) {
            return Err(ReleaseError::command(&command_line, "exit code 1"));
        }

        Ok(self
            .responses
            .lock()
            .unwrap()
            .get(&command_line)
            .cloned()
            .unwrap_or_default())
    }
}
