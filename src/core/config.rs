//! Versioning file loading
//!
//! The versioning file assigns every module to a named module set:
//!
//! ```yaml
//! moduleSets:
//!   stable-core:
//!     version: v1.2.0
//!     modules:
//!       - otel-api
//! excludedModules:
//!   - xtask
//! ```
//!
//! YAML (`.yaml`/`.yml`) and TOML (`.toml`) are both accepted; the format is
//! chosen by file extension.

use crate::core::error::{ConfigError, RailResult};
use crate::core::registry::{ModulePath, ModuleSetMap};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Versioning file names searched at the repository root, in order
pub const DEFAULT_VERSIONING_FILES: &[&str] = &["versions.yaml", "versions.yml", "versions.toml"];

/// Raw contents of the versioning file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionsConfig {
  #[serde(alias = "module-sets")]
  pub module_sets: ModuleSetMap,
  #[serde(default, alias = "excluded-modules")]
  pub excluded_modules: Vec<ModulePath>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
  Yaml,
  Toml,
}

impl VersionsConfig {
  /// Load and deserialize a versioning file
  pub fn load(path: &Path) -> RailResult<Self> {
    let format = detect_format(path)?;

    let content = match fs::read_to_string(path) {
      Ok(content) => content,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
        return Err(ConfigError::NotFound { path: path.to_path_buf() }.into());
      }
      Err(e) => return Err(e.into()),
    };

    Self::parse(&content, format).map_err(|reason| {
      ConfigError::Parse {
        path: path.to_path_buf(),
        reason,
      }
      .into()
    })
  }

  fn parse(content: &str, format: Format) -> Result<Self, String> {
    match format {
      Format::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
      Format::Toml => toml_edit::de::from_str(content).map_err(|e| e.to_string()),
    }
  }
}

fn detect_format(path: &Path) -> RailResult<Format> {
  match path.extension().and_then(|ext| ext.to_str()) {
    Some("yaml") | Some("yml") => Ok(Format::Yaml),
    Some("toml") => Ok(Format::Toml),
    _ => Err(ConfigError::UnsupportedFormat { path: path.to_path_buf() }.into()),
  }
}

/// Resolve the versioning file: an explicit path wins, otherwise search the repo root
pub fn resolve_versioning_file(explicit: Option<&Path>, repo_root: &Path) -> RailResult<PathBuf> {
  if let Some(path) = explicit {
    return Ok(path.to_path_buf());
  }

  DEFAULT_VERSIONING_FILES
    .iter()
    .map(|name| repo_root.join(name))
    .find(|candidate| candidate.is_file())
    .ok_or_else(|| {
      ConfigError::NotFound {
        path: repo_root.join(DEFAULT_VERSIONING_FILES[0]),
      }
      .into()
    })
}
