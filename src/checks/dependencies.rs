//! Dependency stability check
//!
//! A stable module (set major >= 1) that depends on a module from an unstable
//! set is legal but worth flagging, so this check only ever warns.

use crate::cargo::manifest::ModuleDeclaration;
use crate::core::discovery::ModulePathMap;
use crate::core::registry::{ModuleInfoMap, ModulePath};
use crate::core::version::is_stable_version;
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, warn};

/// A stable module requiring an unstable one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StabilityWarning {
  pub module: ModulePath,
  pub module_version: String,
  pub dependency: ModulePath,
  pub dependency_version: String,
}

impl fmt::Display for StabilityWarning {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "Stable module {} ({}) depends on unstable module {} ({}).",
      self.module, self.module_version, self.dependency, self.dependency_version
    )
  }
}

/// Collect stability warnings for every stable module
///
/// Only dependencies governed by the versioning file are considered; external
/// crates are ignored. Declarations that can't be read are logged and skipped.
pub fn verify_dependencies(module_info: &ModuleInfoMap, discovered: &ModulePathMap) -> Vec<StabilityWarning> {
  let mut warnings = Vec::new();

  for (module, info) in module_info {
    if !is_stable_version(&info.version) {
      continue;
    }

    let Some(path) = discovered.get(module) else {
      continue;
    };

    let declaration = match ModuleDeclaration::read(path) {
      Ok(Some(declaration)) => declaration,
      Ok(None) => {
        warn!(path = %path.display(), "Manifest no longer declares a package");
        continue;
      }
      Err(err) => {
        warn!(path = %path.display(), error = %err, "Skipping unreadable manifest");
        continue;
      }
    };

    let mut seen = BTreeSet::new();
    for dependency in declaration.dependencies {
      let Some(dep_info) = module_info.get(&dependency.module) else {
        continue;
      };
      if is_stable_version(&dep_info.version) || !seen.insert(dependency.module.clone()) {
        continue;
      }

      debug!(
        module = %module,
        dependency = %dependency.module,
        requirement = dependency.requirement.as_deref().unwrap_or("*"),
        kind = ?dependency.kind,
        "Stable module requires unstable module"
      );
      warnings.push(StabilityWarning {
        module: module.clone(),
        module_version: info.version.clone(),
        dependency: dependency.module,
        dependency_version: dep_info.version.clone(),
      });
    }
  }

  warnings
}
