//! CLI commands for cargo-modset
//!
//! - **verify**: check the versioning file against the repository
//! - **prerelease**: prepare a release branch for one module set
//! - **tag**: tag (or untag) a module set release
//!
//! All commands take the `&ReleaseContext` built once in `main.rs`.

pub mod prerelease;
pub mod tag;
pub mod verify;

pub use prerelease::run_prerelease;
pub use tag::run_tag;
pub use verify::run_verify;
