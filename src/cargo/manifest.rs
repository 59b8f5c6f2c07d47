//! Cargo.toml as a module declaration file
//!
//! Reading extracts the package name and the packages it requires; writing
//! rewrites package and dependency versions in place with `toml_edit`, so
//! comments and formatting survive a prerelease.

use crate::core::error::{RailResult, ResultExt};
use crate::core::registry::ModulePath;
use crate::core::version::cargo_version;
use std::fs;
use std::path::Path;
use toml_edit::{DocumentMut, Item, TableLike, Value};

/// Manifest file name of a module declaration
pub const MANIFEST_FILE: &str = "Cargo.toml";

/// Dependency tables that may reference other modules
const DEPENDENCY_TABLES: &[(&str, DependencyKind)] = &[
  ("dependencies", DependencyKind::Normal),
  ("dev-dependencies", DependencyKind::Dev),
  ("build-dependencies", DependencyKind::Build),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyKind {
  Normal,
  Dev,
  Build,
}

/// A dependency declared by a module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredDependency {
  /// Real package name (after `package = "..."` renames)
  pub module: ModulePath,
  /// Version requirement, if one is written literally
  pub requirement: Option<String>,
  pub kind: DependencyKind,
}

/// Parsed view of a package manifest
#[derive(Debug, Clone)]
pub struct ModuleDeclaration {
  pub name: ModulePath,
  /// Literal `package.version`; `None` when inherited from the workspace or absent
  pub version: Option<String>,
  pub dependencies: Vec<RequiredDependency>,
}

impl ModuleDeclaration {
  /// Read and parse a manifest from disk
  ///
  /// Returns `Ok(None)` for manifests without a `[package]` name (virtual workspaces).
  pub fn read(path: &Path) -> RailResult<Option<Self>> {
    let doc = read_document(path)?;
    Ok(Self::from_document(&doc))
  }

  pub fn from_document(doc: &DocumentMut) -> Option<Self> {
    let package = doc.get("package")?;
    let name = package.get("name")?.as_str()?;
    let version = package.get("version").and_then(|v| v.as_str()).map(str::to_string);

    let mut dependencies = Vec::new();
    collect_dependencies(doc.as_table(), &mut dependencies);

    if let Some(targets) = doc.get("target").and_then(Item::as_table_like) {
      for (_, target) in targets.iter() {
        if let Some(target) = target.as_table_like() {
          collect_dependencies(target, &mut dependencies);
        }
      }
    }

    Some(Self {
      name: ModulePath::new(name),
      version,
      dependencies,
    })
  }
}

/// Read a manifest into an editable document
pub fn read_document(path: &Path) -> RailResult<DocumentMut> {
  let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
  content
    .parse::<DocumentMut>()
    .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Whether the manifest declares a `[workspace]`
pub fn is_workspace_manifest(doc: &DocumentMut) -> bool {
  doc.get("workspace").is_some_and(Item::is_table_like)
}

fn collect_dependencies(parent: &dyn TableLike, out: &mut Vec<RequiredDependency>) {
  for (table_name, kind) in DEPENDENCY_TABLES {
    let Some(table) = parent.get(table_name).and_then(Item::as_table_like) else {
      continue;
    };

    for (key, item) in table.iter() {
      let requirement = match item {
        Item::Value(Value::String(s)) => Some(s.value().clone()),
        other => other.get("version").and_then(|v| v.as_str()).map(str::to_string),
      };

      out.push(RequiredDependency {
        module: ModulePath::new(dependency_package_name(key, item)),
        requirement,
        kind: *kind,
      });
    }
  }
}

fn dependency_package_name<'a>(key: &'a str, item: &'a Item) -> &'a str {
  item.get("package").and_then(|p| p.as_str()).unwrap_or(key)
}

/// Rewrite versions of `modules` in a manifest document
///
/// Touches `package.version` when the package itself is one of `modules`, and
/// the version of every dependency entry (all dependency tables, target-specific
/// tables and `[workspace.dependencies]`) that names one of `modules`. Returns
/// whether anything changed.
pub fn update_module_versions(doc: &mut DocumentMut, version: &str, modules: &[ModulePath]) -> bool {
  let version = cargo_version(version);
  let mut changed = false;

  if let Some(package) = doc.get_mut("package").and_then(Item::as_table_like_mut) {
    let is_member = package
      .get("name")
      .and_then(|n| n.as_str())
      .is_some_and(|name| modules.iter().any(|m| m.as_str() == name));

    if is_member && let Some(item) = package.get_mut("version") {
      if item.is_str() {
        changed |= set_version(item, version);
      } else {
        tracing::debug!("package version is inherited from the workspace; leaving it alone");
      }
    }
  }

  changed |= rewrite_dependency_tables(doc.as_table_mut(), version, modules);

  if let Some(targets) = doc.get_mut("target").and_then(Item::as_table_like_mut) {
    for (_, target) in targets.iter_mut() {
      if let Some(target) = target.as_table_like_mut() {
        changed |= rewrite_dependency_tables(target, version, modules);
      }
    }
  }

  if let Some(deps) = doc
    .get_mut("workspace")
    .and_then(Item::as_table_like_mut)
    .and_then(|ws| ws.get_mut("dependencies"))
    .and_then(Item::as_table_like_mut)
  {
    changed |= rewrite_dependencies(deps, version, modules);
  }

  changed
}

/// Rewrite a manifest on disk; the file is only written when something changed
pub fn update_manifest_file(path: &Path, version: &str, modules: &[ModulePath]) -> RailResult<bool> {
  let mut doc = read_document(path)?;
  if !update_module_versions(&mut doc, version, modules) {
    return Ok(false);
  }

  fs::write(path, doc.to_string()).with_context(|| format!("Failed to write {}", path.display()))?;
  Ok(true)
}

fn rewrite_dependency_tables(parent: &mut dyn TableLike, version: &str, modules: &[ModulePath]) -> bool {
  let mut changed = false;
  for (table_name, _) in DEPENDENCY_TABLES {
    if let Some(table) = parent.get_mut(table_name).and_then(Item::as_table_like_mut) {
      changed |= rewrite_dependencies(table, version, modules);
    }
  }
  changed
}

fn rewrite_dependencies(table: &mut dyn TableLike, version: &str, modules: &[ModulePath]) -> bool {
  let mut changed = false;

  for (key, item) in table.iter_mut() {
    let name = dependency_package_name(key.get(), item).to_string();
    if !modules.iter().any(|m| m.as_str() == name) {
      continue;
    }

    if item.is_str() {
      changed |= set_version(item, version);
    } else if let Some(entry) = item.as_table_like_mut()
      && let Some(version_item) = entry.get_mut("version")
      && version_item.is_str()
    {
      changed |= set_version(version_item, version);
    }
  }

  changed
}

/// Replace a string value, keeping its surrounding whitespace and comments
fn set_version(item: &mut Item, version: &str) -> bool {
  let Some(value) = item.as_value_mut() else {
    return false;
  };
  if value.as_str() == Some(version) {
    return false;
  }

  let decor = value.decor().clone();
  *value = Value::from(version);
  *value.decor_mut() = decor;
  true
}
