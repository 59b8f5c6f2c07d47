//! Module set version semantics
//!
//! Versions in the versioning file are semver with an optional leading `v`
//! (`v1.2.3` and `1.2.3` are both accepted, `1.2` is not). A version is
//! *stable* when its major component is at least 1.

use semver::Version;

/// Parse a module set version, tolerating a leading `v`
pub fn parse_set_version(version: &str) -> Option<Version> {
  let bare = version.strip_prefix('v').unwrap_or(version);
  Version::parse(bare).ok()
}

/// Whether a module set version is stable (major >= 1)
///
/// Unparseable versions are never stable.
pub fn is_stable_version(version: &str) -> bool {
  parse_set_version(version).is_some_and(|v| v.major >= 1)
}

/// Version string as Cargo expects it in a manifest (no `v` prefix)
pub fn cargo_version(version: &str) -> &str {
  version.strip_prefix('v').unwrap_or(version)
}
