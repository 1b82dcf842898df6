//! Changelog generation between two release tags.
//!
//! Composes three phases over a [CommandRunner]:
//! 1. resolve the past and new version tags,
//! 2. make sure the local clone has enough history to diff between them
//!    (repairing shallow CI clones on demand),
//! 3. list the commits in the range and filter/format them into release
//!    notes.

use std::thread;

use regex::Regex;
use semver::Version;

use crate::error::{ReleaseError, Result};
use crate::process::CommandRunner;
use crate::ui;
use crate::version::{is_version, parse_version};

/// Commit subject prefixes that never appear in release notes.
///
/// Matched literally at the start of the subject, not at a word boundary:
/// "choreography update" is excluded by the "chore" prefix. Existing
/// changelogs depend on this exact behavior.
const IGNORED_COMMIT_PREFIXES: &[&str] = &[
    "bench", "build", "chore", "ci", "cleanup", "docs", "refactor", "test",
];

/// Matches automated version-bump commit subjects like "1.2.3" or "v1.2.3...".
const VERSION_COMMIT_PATTERN: &str = r"^v?[0-9]+\.[0-9]+\.[0-9]+";

/// Options for one changelog generation run.
#[derive(Debug, Clone)]
pub struct ChangelogRequest {
    /// The version being released. Must parse as a semantic version.
    pub version_to: String,
    /// Optional explicit version to diff from. When absent, the closest
    /// release tag below `version_to` is resolved from the repository.
    pub version_from: Option<String>,
}

/// One commit in the release range, paired with its subject line.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitRecord {
    pub revision: String,
    pub subject: String,
}

/// Generate release notes for the commits between two version tags.
///
/// Fails with [ReleaseError::InvalidVersion] before running any command if
/// `version_to` does not parse, with [ReleaseError::NoPastVersion] if no
/// release tag below the target exists, and with [ReleaseError::Command] if
/// any git invocation fails. There is no partial output: every failure
/// aborts the whole run.
///
/// The result is idempotent for a fixed repository state and fixed
/// arguments. An empty range produces an empty string, not an error.
pub fn generate_changelog(runner: &dyn CommandRunner, request: &ChangelogRequest) -> Result<String> {
    let new_version = parse_version(&request.version_to)?;

    ui::display_step("Fetching git tags...");
    fetch_tags(runner)?;

    let past_version =
        resolve_past_version(runner, &new_version, request.version_from.as_deref())?;
    ui::display_light(&format!("  Past version: {}", past_version));

    ui::display_step("Fetching git log...");
    fetch_history_since(runner, &past_version)?;

    ui::display_step("Creating change log...");
    let records = collect_commits(runner, &past_version, &new_version)?;
    Ok(format_commit_log(&records))
}

/// Fetch all tags from origin. Always runs before tag listing so past-version
/// resolution sees the remote's release tags, not just local ones.
pub fn fetch_tags(runner: &dyn CommandRunner) -> Result<()> {
    runner.run("git", &["fetch", "origin", "--tags", "--recurse-submodules=no"])?;
    Ok(())
}

/// Resolve the version to diff from.
///
/// An explicit `version_from` is parsed and used directly, with no check
/// that a matching tag exists. Otherwise the repository's tags are listed,
/// non-version tags are discarded, and the greatest version strictly less
/// than `new_version` wins.
pub fn resolve_past_version(
    runner: &dyn CommandRunner,
    new_version: &Version,
    version_from: Option<&str>,
) -> Result<Version> {
    if let Some(from) = version_from {
        return parse_version(from);
    }

    ui::display_step("Finding past version...");
    let tags = runner.run_lines("git", &["tag"])?;
    let mut versions = tags
        .iter()
        .filter(|tag| is_version(tag))
        .map(|tag| parse_version(tag))
        .collect::<Result<Vec<Version>>>()?;
    versions.sort_by(|a, b| b.cmp(a));
    ui::display_light(&format!(
        "Versions: {}",
        versions
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    ));

    match versions.iter().find(|version| *version < new_version) {
        Some(past_version) => Ok(past_version.clone()),
        None => Err(ReleaseError::no_past_version(&versions)),
    }
}

/// Make sure the local clone has full history back to the past-version tag.
///
/// CI clones are often shallow; a shallow-exclude fetch extends the shallow
/// frontier backward just far enough to cover the release range without
/// pulling the entire history. On a full clone the tag-scoped fetch is a
/// cheap redundant safety fetch.
pub fn fetch_history_since(runner: &dyn CommandRunner, past_version: &Version) -> Result<()> {
    let tag = past_version.to_string();
    if is_shallow(runner)? {
        let exclude = format!("--shallow-exclude={}", tag);
        runner.run("git", &["fetch", "origin", &exclude])?;
    } else {
        runner.run("git", &["fetch", "origin", "--recurse-submodules=no", &tag])?;
    }
    Ok(())
}

fn is_shallow(runner: &dyn CommandRunner) -> Result<bool> {
    let output = runner.run("git", &["rev-parse", "--is-shallow-repository"])?;
    Ok(output == "true")
}

/// Collect the commits in `past..new` (past exclusive, new inclusive) with
/// their subject lines.
///
/// Subject lookups are independent per revision, so they fan out across
/// threads and are all joined before returning. Completion order is
/// arbitrary; each subject is paired with its originating revision
/// explicitly rather than by position. A single failed lookup fails the
/// whole collection.
pub fn collect_commits(
    runner: &dyn CommandRunner,
    past_version: &Version,
    new_version: &Version,
) -> Result<Vec<CommitRecord>> {
    let range = format!("{}..{}", past_version, new_version);
    let revisions = runner.run_lines("git", &["rev-list", &range])?;

    thread::scope(|scope| {
        let handles: Vec<_> = revisions
            .iter()
            .map(|revision| {
                scope.spawn(move || -> Result<CommitRecord> {
                    let subject =
                        runner.run("git", &["log", "--format=%s", "-n", "1", revision])?;
                    Ok(CommitRecord {
                        revision: revision.clone(),
                        subject,
                    })
                })
            })
            .collect();

        let mut records = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.join() {
                Ok(record) => records.push(record?),
                Err(_) => {
                    return Err(ReleaseError::command(
                        "git log",
                        "commit subject lookup panicked",
                    ))
                }
            }
        }
        Ok(records)
    })
}

/// Filter and format commit records into the final changelog text.
///
/// Version-bump commits, ignored-prefix commits, and empty subjects are
/// dropped. Survivors become `- <subject>` lines, sorted lexicographically
/// by the formatted line rather than chronologically. The lexicographic
/// order is a deliberate simplification kept for compatibility with
/// existing changelogs.
pub fn format_commit_log(records: &[CommitRecord]) -> String {
    let version_commit = Regex::new(VERSION_COMMIT_PATTERN).ok();

    let mut lines: Vec<String> = records
        .iter()
        .filter(|record| {
            // don't include version commits
            if version_commit
                .as_ref()
                .is_some_and(|re| re.is_match(&record.subject))
            {
                return false;
            }

            !IGNORED_COMMIT_PREFIXES
                .iter()
                .any(|prefix| record.subject.starts_with(prefix))
                && !record.subject.is_empty()
        })
        .map(|record| format!("- {}", record.subject))
        .collect();
    lines.sort();
    lines.join("\n")
}
