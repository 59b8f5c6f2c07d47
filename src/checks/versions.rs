//! Module set version check

use crate::core::error::{RailResult, ValidationError};
use crate::core::registry::ModuleSetMap;
use crate::core::version::parse_set_version;
use std::collections::BTreeMap;

/// Verify every set version is valid semver and stable majors are unique
///
/// Sets are visited in name order, so on a collision `first_set` is the
/// alphabetically smaller name. Major version 0 may be shared freely.
pub fn verify_versions(module_sets: &ModuleSetMap) -> RailResult<()> {
  let mut majors: BTreeMap<u64, (&str, &str)> = BTreeMap::new();

  for (set_name, module_set) in module_sets {
    let Some(version) = parse_set_version(&module_set.version) else {
      return Err(
        ValidationError::InvalidVersion {
          set_name: set_name.clone(),
          version: module_set.version.clone(),
        }
        .into(),
      );
    };

    if version.major == 0 {
      continue;
    }

    if let Some((first_set, first_version)) = majors.get(&version.major) {
      return Err(
        ValidationError::MajorVersionCollision {
          major: version.major,
          first_set: first_set.to_string(),
          first_version: first_version.to_string(),
          second_set: set_name.clone(),
          second_version: module_set.version.clone(),
        }
        .into(),
      );
    }

    majors.insert(version.major, (set_name.as_str(), module_set.version.as_str()));
  }

  Ok(())
}
