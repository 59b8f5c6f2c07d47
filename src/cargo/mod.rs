//! Cargo manifests as module declarations
//!
//! - **manifest**: read package names and dependencies, rewrite versions in place

pub mod manifest;
