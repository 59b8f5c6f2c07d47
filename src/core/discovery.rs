//! Filesystem module discovery
//!
//! Walks the repository for `Cargo.toml` files and maps each package name to
//! the manifest declaring it. Discovery is best-effort: a manifest that can't
//! be read or parsed is logged and skipped rather than failing the walk.

use crate::cargo::manifest::{MANIFEST_FILE, ModuleDeclaration, is_workspace_manifest, read_document};
use crate::core::error::{RailResult, ValidationError};
use crate::core::registry::{ExcludedModules, ModulePath};
use ignore::WalkBuilder;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Directories never worth descending into
const SKIPPED_DIRS: &[&str] = &[".git", "target"];

/// Module path → path of its `Cargo.toml`
pub type ModulePathMap = BTreeMap<ModulePath, PathBuf>;

/// Everything discovery found under the repository root
#[derive(Debug, Clone, Default)]
pub struct DiscoveredModules {
  /// Versionable modules, excluded ones already removed
  pub modules: ModulePathMap,
  /// Virtual workspace manifests (`[workspace]` without `[package]`)
  pub workspace_manifests: Vec<PathBuf>,
  /// Manifests of excluded packages; not modules, but may depend on one
  pub excluded_manifests: Vec<PathBuf>,
}

impl DiscoveredModules {
  /// Every manifest a prerelease has to rewrite
  pub fn all_manifests(&self) -> impl Iterator<Item = &Path> {
    self
      .modules
      .values()
      .chain(self.workspace_manifests.iter())
      .chain(self.excluded_manifests.iter())
      .map(PathBuf::as_path)
  }
}

/// Walk `root` and collect module declarations, skipping `excluded` modules
pub fn discover_modules(root: &Path, excluded: &ExcludedModules) -> RailResult<DiscoveredModules> {
  if !root.is_dir() {
    return Err(
      io::Error::new(
        io::ErrorKind::NotFound,
        format!("repository root {} is not a directory", root.display()),
      )
      .into(),
    );
  }

  let mut discovered = DiscoveredModules::default();

  let walker = WalkBuilder::new(root)
    .hidden(false)
    .git_ignore(true)
    .parents(false)
    .filter_entry(|entry| {
      let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
      !(is_dir && entry.file_name().to_str().is_some_and(|name| SKIPPED_DIRS.contains(&name)))
    })
    .build();

  for result in walker {
    let entry = match result {
      Ok(entry) => entry,
      Err(err) => {
        warn!(error = %err, "Failed to read directory entry");
        continue;
      }
    };

    if entry.file_name() != MANIFEST_FILE || !entry.file_type().is_some_and(|t| t.is_file()) {
      continue;
    }

    let path = entry.path();
    let doc = match read_document(path) {
      Ok(doc) => doc,
      Err(err) => {
        warn!(path = %path.display(), error = %err, "Skipping unreadable manifest");
        continue;
      }
    };

    let Some(declaration) = ModuleDeclaration::from_document(&doc) else {
      if is_workspace_manifest(&doc) {
        debug!(path = %path.display(), "Found workspace manifest");
        discovered.workspace_manifests.push(path.to_path_buf());
      }
      continue;
    };

    if excluded.contains(&declaration.name) {
      debug!(module = %declaration.name, "Skipping excluded module");
      discovered.excluded_manifests.push(path.to_path_buf());
      continue;
    }

    if let Some(first) = discovered.modules.get(&declaration.name) {
      return Err(
        ValidationError::DuplicateDeclaration {
          module: declaration.name.to_string(),
          first: first.clone(),
          second: path.to_path_buf(),
        }
        .into(),
      );
    }

    debug!(
      module = %declaration.name,
      version = declaration.version.as_deref().unwrap_or("<inherited>"),
      path = %path.display(),
      "Found module"
    );
    discovered.modules.insert(declaration.name, path.to_path_buf());
  }

  discovered.workspace_manifests.sort();
  discovered.excluded_manifests.sort();
  Ok(discovered)
}
