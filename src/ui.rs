//! Progress output helpers.
//!
//! All progress lines go to stderr so command stdout (the changelog text,
//! checksums) stays clean and pipeable.

use console::style;

/// Print a workflow step header in bold.
pub fn display_step(message: &str) {
    eprintln!("{}", style(message).bold());
}

/// Print a secondary detail line, dimmed.
pub fn display_light(message: &str) {
    eprintln!("{}", style(message).dim());
}

/// Print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Print a success message with a green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}
