//! Release context - build once, pass everywhere
//!
//! Every command needs the same three things: where the repository root is,
//! what the versioning file says, and which modules exist on disk.
//! `ReleaseContext` gathers them once in `main.rs` and commands borrow it.

use crate::core::config::resolve_versioning_file;
use crate::core::discovery::{DiscoveredModules, discover_modules};
use crate::core::error::RailResult;
use crate::core::registry::Registry;
use crate::utils::find_repo_root;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Shared state for a single invocation
#[derive(Debug, Clone)]
pub struct ReleaseContext {
  /// Repository root (directory containing `.git`)
  pub root: PathBuf,

  /// Versioning file the registry was loaded from
  pub versioning_file: PathBuf,

  pub registry: Registry,

  /// Modules and workspace manifests found under `root`
  pub discovered: DiscoveredModules,
}

impl ReleaseContext {
  /// Locate the repository from `cwd`, load the versioning file and discover modules
  pub fn build(cwd: &Path, versioning_file: Option<&Path>) -> RailResult<Self> {
    let root = find_repo_root(cwd)?;
    let versioning_file = resolve_versioning_file(versioning_file, &root)?;
    debug!(root = %root.display(), file = %versioning_file.display(), "Loading versioning file");

    let registry = Registry::load(&versioning_file)?;
    let discovered = discover_modules(&root, registry.excluded_modules())?;

    Ok(Self {
      root,
      versioning_file,
      registry,
      discovered,
    })
  }
}
