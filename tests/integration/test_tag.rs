//! Integration tests for `cargo modset tag`

use crate::helpers::{TestWorkspace, git, run_cargo_modset, run_cargo_modset_raw, stderr, stdout};
use anyhow::Result;

#[test]
fn test_tag_creates_annotated_tags() -> Result<()> {
  let ws = TestWorkspace::standard()?;
  let head = ws.head()?;

  let output = run_cargo_modset(&ws.path, &["tag", "--module-set", "stable-core", "--commit-hash", &head[..12]])?;
  let out = stdout(&output);
  let tag_lines: Vec<&str> = out.lines().filter(|line| line.starts_with("crates/")).collect();
  assert_eq!(tag_lines, vec!["crates/otel-api/v1.2.0", "crates/otel-sdk/v1.2.0"]);
  assert!(!out.contains("git tag"));

  assert_eq!(ws.tags()?, vec!["crates/otel-api/v1.2.0", "crates/otel-sdk/v1.2.0"]);

  let kind = git(&ws.path, &["cat-file", "-t", "crates/otel-api/v1.2.0"])?;
  assert_eq!(String::from_utf8_lossy(&kind.stdout).trim(), "tag");

  let message = git(&ws.path, &["tag", "-l", "--format=%(contents:subject)", "crates/otel-sdk/v1.2.0"])?;
  assert_eq!(String::from_utf8_lossy(&message.stdout).trim(), "Version crates/otel-sdk/v1.2.0");

  let target = git(&ws.path, &["rev-list", "-n", "1", "crates/otel-sdk/v1.2.0"])?;
  assert_eq!(String::from_utf8_lossy(&target.stdout).trim(), head);
  Ok(())
}

#[test]
fn test_tag_root_module_uses_bare_version() -> Result<()> {
  let ws = TestWorkspace::standard()?;
  std::fs::write(
    ws.path.join("Cargo.toml"),
    "[package]\nname = \"otel\"\nversion = \"1.1.0\"\n\n[workspace]\nmembers = [\"crates/*\"]\n",
  )?;
  ws.write_versions(
    r#"moduleSets:
  stable-core:
    version: v1.2.0
    modules: [otel-sdk, otel, otel-api]
  experimental:
    version: v0.9.0
    modules: [otel-exp]
excludedModules: [xtask]
"#,
  )?;
  let head = ws.commit("Root package")?;

  run_cargo_modset(&ws.path, &["tag", "-m", "stable-core", "-c", &head])?;

  let tags = ws.tags()?;
  assert!(tags.contains(&"v1.2.0".to_string()));
  assert!(tags.contains(&"crates/otel-sdk/v1.2.0".to_string()));
  assert_eq!(tags.len(), 3);
  Ok(())
}

#[test]
fn test_tag_delete_module_set_tags() -> Result<()> {
  let ws = TestWorkspace::standard()?;
  let head = ws.head()?;
  git(&ws.path, &["tag", "unrelated/v1.0.0"])?;

  run_cargo_modset(&ws.path, &["tag", "--module-set", "stable-core", "--commit-hash", &head])?;
  assert_eq!(ws.tags()?.len(), 3);

  run_cargo_modset(&ws.path, &["tag", "--module-set", "stable-core", "--delete-module-set-tags"])?;
  assert_eq!(ws.tags()?, vec!["unrelated/v1.0.0"]);
  Ok(())
}

#[test]
fn test_tag_requires_commit_hash() -> Result<()> {
  let ws = TestWorkspace::standard()?;

  let output = run_cargo_modset_raw(&ws.path, &["tag", "--module-set", "stable-core"])?;
  assert!(!output.status.success());
  assert!(stderr(&output).contains("--commit-hash"));
  assert!(ws.tags()?.is_empty());
  Ok(())
}

#[test]
fn test_tag_rejects_commit_off_branch() -> Result<()> {
  let ws = TestWorkspace::standard()?;
  git(&ws.path, &["checkout", "-b", "side"])?;
  std::fs::write(ws.path.join("notes.txt"), "side work\n")?;
  let side = ws.commit("Side commit")?;
  git(&ws.path, &["checkout", "main"])?;

  let output = run_cargo_modset_raw(&ws.path, &["tag", "--module-set", "stable-core", "--commit-hash", &side])?;
  assert_eq!(output.status.code(), Some(2));
  assert!(stderr(&output).contains("not found on this branch"));
  assert!(ws.tags()?.is_empty());
  Ok(())
}

#[test]
fn test_tag_rolls_back_on_conflict() -> Result<()> {
  let ws = TestWorkspace::standard()?;
  let head = ws.head()?;
  git(&ws.path, &["tag", "crates/otel-sdk/v1.2.0"])?;

  let output = run_cargo_modset_raw(&ws.path, &["tag", "--module-set", "stable-core", "--commit-hash", &head])?;
  assert_eq!(output.status.code(), Some(2));
  assert_eq!(ws.tags()?, vec!["crates/otel-sdk/v1.2.0"]);
  Ok(())
}
