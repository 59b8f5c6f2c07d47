//! Core engine for cargo-modset
//!
//! - **config**: versioning file (versions.yaml / versions.toml) loading
//! - **registry**: module sets and the module → set lookup
//! - **version**: semver parsing and stability of set versions
//! - **discovery**: find module declarations on disk
//! - **context**: everything a command needs, built once
//! - **error**: error types with contextual help messages
//! - **logging**: tracing subscriber setup
//! - **vcs**: git operations behind the `SourceControl` trait

pub mod config;
pub mod context;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod registry;
pub mod vcs;
pub mod version;
