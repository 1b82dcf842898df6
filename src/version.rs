use semver::Version;

use crate::error::{ReleaseError, Result};

/// Represents the type of semantic version bump to apply.
#[derive(Debug, Clone, PartialEq)]
pub enum VersionBump {
    Major,
    Minor,
    Patch,
}

/// Parses a version string into a semantic version.
///
/// A single leading `v` prefix is tolerated and stripped, so both `1.2.3`
/// and `v1.2.3` parse to the same version.
///
/// # Arguments
/// * `value` - Version string to parse
///
/// # Returns
/// * `Ok(Version)` - Successfully parsed version
/// * `Err(ReleaseError::InvalidVersion)` - If the string is not a semantic version
pub fn parse_version(value: &str) -> Result<Version> {
    let cleaned = value.strip_prefix('v').unwrap_or(value);
    Version::parse(cleaned).map_err(|_| ReleaseError::invalid_version(value))
}

/// Returns whether a tag names a valid semantic version.
///
/// Pure predicate used to filter tag lists; non-version tags are not errors,
/// they are simply not release tags.
pub fn is_version(tag: &str) -> bool {
    parse_version(tag).is_ok()
}

/// Bumps a version according to the specified bump type.
///
/// Increments the appropriate component, resets lower components to 0, and
/// clears any pre-release or build metadata:
/// - **Major**: major += 1, minor = 0, patch = 0
/// - **Minor**: minor += 1, patch = 0
/// - **Patch**: patch += 1
pub fn bump_version(version: &Version, bump: &VersionBump) -> Version {
    match bump {
        VersionBump::Major => Version::new(version.major + 1, 0, 0),
        VersionBump::Minor => Version::new(version.major, version.minor + 1, 0),
        VersionBump::Patch => Version::new(version.major, version.minor, version.patch + 1),
    }
}
