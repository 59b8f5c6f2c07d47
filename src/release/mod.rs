//! Module set release driver
//!
//! - **tags**: derive the version, modules and tag names of a set
//! - **prerelease**: branch, rewrite `Cargo.toml` versions, commit
//! - **tagging**: create the set's tags on a commit, or delete them
//!
//! Git access goes through `core::vcs::SourceControl`.

#[cfg(test)]
mod mock;
pub mod prerelease;
pub mod tagging;
pub mod tags;

pub use prerelease::{PrereleaseOptions, run_prerelease};
pub use tagging::{delete_module_set_tags, tag_all_modules, validate_commit};
pub use tags::versions_and_modules_to_update;
