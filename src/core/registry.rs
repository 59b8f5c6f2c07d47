//! Module set registry
//!
//! The registry is the in-memory view of the versioning file: the module sets
//! keyed by name, the excluded modules, and the inverted module → set lookup.
//! It is built once per invocation from an explicit file path and is read-only
//! afterwards.

use crate::core::config::VersionsConfig;
use crate::core::error::{ConfigError, RailResult};
use serde::Deserialize;
use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;

/// Unique identifier of a versionable module (its Cargo package name)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(transparent)]
pub struct ModulePath(String);

impl ModulePath {
  pub fn new(path: impl Into<String>) -> Self {
    Self(path.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for ModulePath {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl Borrow<str> for ModulePath {
  fn borrow(&self) -> &str {
    &self.0
  }
}

impl From<&str> for ModulePath {
  fn from(path: &str) -> Self {
    Self(path.to_string())
  }
}

/// A named group of modules released together under one version
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModuleSet {
  pub version: String,
  #[serde(default)]
  pub modules: Vec<ModulePath>,
}

/// Module set name → module set, ordered by name
pub type ModuleSetMap = BTreeMap<String, ModuleSet>;

/// Modules explicitly marked as not versioned
pub type ExcludedModules = BTreeSet<ModulePath>;

/// Reverse lookup entry: which set a module belongs to, and at what version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleInfo {
  pub set_name: String,
  pub version: String,
}

/// Module path → its set and version
pub type ModuleInfoMap = BTreeMap<ModulePath, ModuleInfo>;

/// Loaded versioning file with derived lookups
#[derive(Debug, Clone)]
pub struct Registry {
  module_sets: ModuleSetMap,
  excluded_modules: ExcludedModules,
  module_info: ModuleInfoMap,
}

impl Registry {
  /// Read the versioning file and build the registry
  pub fn load(versioning_file: &Path) -> RailResult<Self> {
    let config = VersionsConfig::load(versioning_file)?;
    Self::from_config(config)
  }

  /// Build the registry from an already-parsed versioning file
  pub fn from_config(config: VersionsConfig) -> RailResult<Self> {
    let excluded_modules: ExcludedModules = config.excluded_modules.into_iter().collect();
    let module_info = build_module_info_map(&config.module_sets, &excluded_modules)?;

    Ok(Self {
      module_sets: config.module_sets,
      excluded_modules,
      module_info,
    })
  }

  pub fn module_sets(&self) -> &ModuleSetMap {
    &self.module_sets
  }

  pub fn excluded_modules(&self) -> &ExcludedModules {
    &self.excluded_modules
  }

  pub fn module_info(&self) -> &ModuleInfoMap {
    &self.module_info
  }

  /// Look up a module set by name
  pub fn module_set(&self, set_name: &str) -> RailResult<&ModuleSet> {
    self.module_sets.get(set_name).ok_or_else(|| {
      ConfigError::UnknownModuleSet {
        set_name: set_name.to_string(),
      }
      .into()
    })
  }
}

/// Invert the module set map into a module → (set, version) map
///
/// Sets are visited in name order and modules in list order, so the set
/// reported as `first_set` on a duplicate is always the same one.
pub fn build_module_info_map(module_sets: &ModuleSetMap, excluded: &ExcludedModules) -> RailResult<ModuleInfoMap> {
  let mut module_info = ModuleInfoMap::new();

  for (set_name, module_set) in module_sets {
    for module in &module_set.modules {
      if let Some(existing) = module_info.get(module) {
        return Err(
          ConfigError::DuplicateModule {
            module: module.to_string(),
            first_set: existing.set_name.clone(),
            second_set: set_name.clone(),
          }
          .into(),
        );
      }

      if excluded.contains(module) {
        return Err(
          ConfigError::ExcludedModuleConflict {
            module: module.to_string(),
            set_name: set_name.clone(),
          }
          .into(),
        );
      }

      module_info.insert(
        module.clone(),
        ModuleInfo {
          set_name: set_name.clone(),
          version: module_set.version.clone(),
        },
      );
    }
  }

  Ok(module_info)
}
