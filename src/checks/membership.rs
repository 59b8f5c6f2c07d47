//! Module set membership check

use crate::core::discovery::ModulePathMap;
use crate::core::error::{RailResult, ValidationError};
use crate::core::registry::ModuleInfoMap;

/// Verify the versioning file and the repository agree on the set of modules
///
/// Both directions are checked: discovered modules must be listed in a set,
/// and listed modules must exist on disk. Maps are ordered, so the reported
/// module is the first offender by name.
pub fn verify_all_modules_in_set(discovered: &ModulePathMap, module_info: &ModuleInfoMap) -> RailResult<()> {
  if let Some((module, declaration)) = discovered.iter().find(|(m, _)| !module_info.contains_key(*m)) {
    return Err(
      ValidationError::UnregisteredModule {
        module: module.to_string(),
        declaration: declaration.clone(),
      }
      .into(),
    );
  }

  if let Some((module, info)) = module_info.iter().find(|(m, _)| !discovered.contains_key(*m)) {
    return Err(
      ValidationError::OrphanManifestEntry {
        module: module.to_string(),
        set_name: info.set_name.clone(),
      }
      .into(),
    );
  }

  Ok(())
}
