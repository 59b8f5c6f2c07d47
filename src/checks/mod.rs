//! Consistency checks between the versioning file and the repository
//!
//! Run by `cargo modset verify` in this order:
//!
//! - **membership**: every discovered module is in exactly one set, and every listed module exists
//! - **versions**: set versions are valid semver and no two stable sets share a major version
//! - **dependencies**: stable modules depending on unstable ones (warnings only)
//!
//! The first two are fatal and stop at the first offence; the dependency check
//! never fails.

mod dependencies;
mod membership;
mod versions;

pub use dependencies::{StabilityWarning, verify_dependencies};
pub use membership::verify_all_modules_in_set;
pub use versions::verify_versions;
