//! Integration tests for `cargo modset prerelease`

use crate::helpers::{TestWorkspace, VERSIONS_YAML, git, run_cargo_modset, run_cargo_modset_raw, stderr, stdout};
use anyhow::Result;

#[test]
fn test_prerelease_bumps_versions_on_new_branch() -> Result<()> {
  let ws = TestWorkspace::standard()?;

  let output = run_cargo_modset(&ws.path, &["prerelease", "--module-set", "stable-core", "--skip-make"])?;
  let out = stdout(&output);
  assert!(out.contains("Skipping 'make lint'..."));
  assert!(out.contains("git diff main"));

  assert_eq!(ws.current_branch()?, "pre_release_stable-core_v1.2.0");
  assert_eq!(ws.last_commit_subject()?, "Prepare for releasing v1.2.0");

  let api = ws.read_file("crates/otel-api/Cargo.toml")?;
  assert!(api.contains("version = \"1.2.0\""));

  let sdk = ws.read_file("crates/otel-sdk/Cargo.toml")?;
  assert!(sdk.contains("version = \"1.2.0\"\n"));
  assert!(sdk.contains("otel-api = { path = \"../otel-api\", version = \"1.2.0\" }"));

  let exp = ws.read_file("crates/otel-exp/Cargo.toml")?;
  assert!(exp.contains("version = \"0.8.0\""));
  assert!(exp.contains("otel-api = { workspace = true }"));

  let workspace = ws.read_file("Cargo.toml")?;
  assert!(workspace.contains("otel-api = { path = \"crates/otel-api\", version = \"1.2.0\" }"));

  let xtask = ws.read_file("crates/xtask/Cargo.toml")?;
  assert!(xtask.contains("version = \"0.0.0\""));

  let status = git(&ws.path, &["status", "--porcelain"])?;
  assert!(status.stdout.is_empty(), "prerelease should leave a clean tree");
  Ok(())
}

#[test]
fn test_prerelease_from_existing_branch() -> Result<()> {
  let ws = TestWorkspace::standard()?;
  git(&ws.path, &["checkout", "-b", "feature"])?;

  run_cargo_modset(
    &ws.path,
    &[
      "prerelease",
      "--module-set",
      "experimental",
      "--from-existing-branch",
      "main",
      "--skip-make",
    ],
  )?;

  assert_eq!(ws.current_branch()?, "pre_release_experimental_v0.9.0");
  assert!(ws.read_file("crates/otel-exp/Cargo.toml")?.contains("version = \"0.9.0\""));
  Ok(())
}

#[test]
fn test_prerelease_refuses_dirty_tree() -> Result<()> {
  let ws = TestWorkspace::standard()?;
  std::fs::write(ws.path.join("crates/otel-api/src/lib.rs"), "pub fn changed() {}\n")?;

  let output = run_cargo_modset_raw(&ws.path, &["prerelease", "--module-set", "stable-core", "--skip-make"])?;
  assert_eq!(output.status.code(), Some(2));
  assert!(stderr(&output).contains("Working tree is not clean"));
  assert_eq!(ws.current_branch()?, "main");
  Ok(())
}

#[test]
fn test_prerelease_refuses_existing_tag() -> Result<()> {
  let ws = TestWorkspace::standard()?;
  git(&ws.path, &["tag", "crates/otel-sdk/v1.2.0"])?;

  let output = run_cargo_modset_raw(&ws.path, &["prerelease", "--module-set", "stable-core", "--skip-make"])?;
  assert_eq!(output.status.code(), Some(2));
  assert!(stderr(&output).contains("Git tag already exists for crates/otel-sdk/v1.2.0"));
  assert_eq!(ws.current_branch()?, "main");
  Ok(())
}

#[test]
fn test_prerelease_unknown_module_set() -> Result<()> {
  let ws = TestWorkspace::standard()?;

  let output = run_cargo_modset_raw(&ws.path, &["prerelease", "--module-set", "nope", "--skip-make"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("nope"));
  Ok(())
}

#[test]
fn test_prerelease_failing_make_does_not_commit() -> Result<()> {
  let ws = TestWorkspace::standard()?;
  std::fs::write(ws.path.join("Makefile"), "lint:\n\t@echo lint broke && exit 1\n\nci:\n\t@true\n")?;
  ws.commit("Add Makefile")?;

  let output = run_cargo_modset_raw(&ws.path, &["prerelease", "--module-set", "stable-core"])?;
  assert_eq!(output.status.code(), Some(2));
  assert_eq!(ws.last_commit_subject()?, "Add Makefile");
  Ok(())
}

#[test]
fn test_prerelease_updates_excluded_dependents() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_crate("otel-api", "1.1.0", &[])?;
  ws.add_crate("otel-sdk", "1.1.0", &[("otel-api", "{ path = \"../otel-api\", version = \"1.1.0\" }")])?;
  ws.add_crate("otel-exp", "0.8.0", &[])?;
  ws.add_crate("xtask", "0.0.0", &[("otel-exp", "{ path = \"../otel-exp\", version = \"0.8.0\" }")])?;
  ws.write_versions(VERSIONS_YAML)?;
  ws.commit("Add packages")?;

  run_cargo_modset(&ws.path, &["prerelease", "--module-set", "experimental", "--skip-make"])?;

  let xtask = ws.read_file("crates/xtask/Cargo.toml")?;
  assert!(xtask.contains("version = \"0.0.0\""));
  assert!(xtask.contains("otel-exp = { path = \"../otel-exp\", version = \"0.9.0\" }"));

  let status = git(&ws.path, &["status", "--porcelain"])?;
  assert!(status.stdout.is_empty());
  Ok(())
}

#[test]
fn test_prerelease_rejects_invalid_set_version() -> Result<()> {
  let ws = TestWorkspace::standard()?;
  ws.write_versions(&VERSIONS_YAML.replace("v1.2.0", "1.2"))?;
  ws.commit("Break the version")?;

  let output = run_cargo_modset_raw(&ws.path, &["prerelease", "--module-set", "stable-core", "--skip-make"])?;
  assert_eq!(output.status.code(), Some(3));
  assert!(stderr(&output).contains("invalid version string: 1.2"));
  assert_eq!(ws.current_branch()?, "main");
  assert!(ws.read_file("crates/otel-api/Cargo.toml")?.contains("version = \"1.1.0\""));
  Ok(())
}
