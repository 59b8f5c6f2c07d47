//! Tag name derivation for a module set release
//!
//! A module's tag name is the directory of its `Cargo.toml` relative to the
//! repository root (`crates/sdk-metric`), and its full tag is that name joined
//! with the set version (`crates/sdk-metric/v1.2.0`). A module declared at the
//! repository root is tagged with the bare version.

use crate::core::discovery::ModulePathMap;
use crate::core::error::{RailResult, ValidationError};
use crate::core::registry::{ModulePath, Registry};
use crate::core::version::parse_set_version;
use crate::utils::path_to_git_format;
use std::path::Path;

/// Tag prefix for a single module
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleTagName {
  /// Module declared at the repository root; its tag is the bare version
  RepoRoot,
  /// Repository-relative directory, `/`-separated
  Path(String),
}

impl ModuleTagName {
  /// Derive the tag name from the path of a module's `Cargo.toml`
  pub fn from_declaration_path(declaration: &Path, repo_root: &Path) -> RailResult<Self> {
    let outside = || ValidationError::ModuleOutsideRepo {
      declaration: declaration.to_path_buf(),
      repo_root: repo_root.to_path_buf(),
    };

    let dir = declaration.parent().ok_or_else(outside)?;
    let relative = dir.strip_prefix(repo_root).map_err(|_| outside())?;

    if relative.as_os_str().is_empty() {
      Ok(ModuleTagName::RepoRoot)
    } else {
      Ok(ModuleTagName::Path(path_to_git_format(relative)))
    }
  }

  /// Full git tag for `version`
  pub fn full_tag(&self, version: &str) -> String {
    match self {
      ModuleTagName::RepoRoot => version.to_string(),
      ModuleTagName::Path(name) => format!("{}/{}", name, version),
    }
  }
}

/// Join every tag name with `version`, preserving order
pub fn combine_tag_names_and_version(tag_names: &[ModuleTagName], version: &str) -> Vec<String> {
  tag_names.iter().map(|name| name.full_tag(version)).collect()
}

/// Everything needed to release one module set
///
/// `modules` and `tag_names` are parallel and follow the set's module order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSetRelease {
  pub set_name: String,
  pub version: String,
  pub modules: Vec<ModulePath>,
  pub tag_names: Vec<ModuleTagName>,
}

impl ModuleSetRelease {
  pub fn full_tags(&self) -> Vec<String> {
    combine_tag_names_and_version(&self.tag_names, &self.version)
  }
}

/// Resolve the version, modules and tag names of `set_name`
pub fn versions_and_modules_to_update(
  registry: &Registry,
  discovered: &ModulePathMap,
  set_name: &str,
  repo_root: &Path,
) -> RailResult<ModuleSetRelease> {
  let module_set = registry.module_set(set_name)?;
  if parse_set_version(&module_set.version).is_none() {
    return Err(
      ValidationError::InvalidVersion {
        set_name: set_name.to_string(),
        version: module_set.version.clone(),
      }
      .into(),
    );
  }

  let mut tag_names = Vec::with_capacity(module_set.modules.len());
  for module in &module_set.modules {
    let declaration = discovered.get(module).ok_or_else(|| ValidationError::UnresolvedModule {
      module: module.to_string(),
    })?;
    tag_names.push(ModuleTagName::from_declaration_path(declaration, repo_root)?);
  }

  Ok(ModuleSetRelease {
    set_name: set_name.to_string(),
    version: module_set.version.clone(),
    modules: module_set.modules.clone(),
    tag_names,
  })
}
