//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Versioning file used by most tests
pub const VERSIONS_YAML: &str = r#"moduleSets:
  stable-core:
    version: v1.2.0
    modules:
      - otel-api
      - otel-sdk
  experimental:
    version: v0.9.0
    modules:
      - otel-exp
excludedModules:
  - xtask
"#;

/// A throwaway git repository laid out as a Cargo workspace
pub struct TestWorkspace {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestWorkspace {
  /// Create a repository with a virtual workspace manifest and one commit
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();

    git(&path, &["init", "--initial-branch=main"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;
    git(&path, &["config", "commit.gpgsign", "false"])?;
    git(&path, &["config", "tag.gpgsign", "false"])?;

    std::fs::write(
      path.join("Cargo.toml"),
      r#"[workspace]
members = ["crates/*"]
resolver = "2"

[workspace.dependencies]
otel-api = { path = "crates/otel-api", version = "1.1.0" }
"#,
    )?;

    git(&path, &["add", "."])?;
    git(&path, &["commit", "-m", "Initial workspace setup"])?;

    Ok(Self { _root: root, path })
  }

  /// Workspace with the three packages `VERSIONS_YAML` describes, plus an excluded xtask
  pub fn standard() -> Result<Self> {
    let ws = Self::new()?;
    ws.add_crate("otel-api", "1.1.0", &[])?;
    ws.add_crate("otel-sdk", "1.1.0", &[("otel-api", "{ path = \"../otel-api\", version = \"1.1.0\" }")])?;
    ws.add_crate("otel-exp", "0.8.0", &[("otel-api", "{ workspace = true }")])?;
    ws.add_crate("xtask", "0.0.0", &[])?;
    ws.write_versions(VERSIONS_YAML)?;
    ws.commit("Add packages")?;
    Ok(ws)
  }

  /// Add a package under `crates/<name>`
  pub fn add_crate(&self, name: &str, version: &str, deps: &[(&str, &str)]) -> Result<PathBuf> {
    let crate_path = self.path.join("crates").join(name);
    std::fs::create_dir_all(crate_path.join("src"))?;

    let mut cargo_toml = format!(
      r#"[package]
name = "{}"
version = "{}"
edition = "2021"

[dependencies]
"#,
      name, version
    );

    for (dep_name, dep_spec) in deps {
      cargo_toml.push_str(&format!("{} = {}\n", dep_name, dep_spec));
    }

    std::fs::write(crate_path.join("Cargo.toml"), cargo_toml)?;
    std::fs::write(crate_path.join("src/lib.rs"), format!("//! {} crate\n", name))?;

    Ok(crate_path)
  }

  pub fn write_versions(&self, content: &str) -> Result<()> {
    std::fs::write(self.path.join("versions.yaml"), content)?;
    Ok(())
  }

  /// Commit current changes and return the new HEAD
  pub fn commit(&self, message: &str) -> Result<String> {
    git(&self.path, &["add", "."])?;
    git(&self.path, &["commit", "-m", message])?;
    self.head()
  }

  pub fn head(&self) -> Result<String> {
    let output = git(&self.path, &["rev-parse", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  pub fn current_branch(&self) -> Result<String> {
    let output = git(&self.path, &["rev-parse", "--abbrev-ref", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  pub fn tags(&self) -> Result<Vec<String>> {
    let output = git(&self.path, &["tag", "-l"])?;
    Ok(
      String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(String::from)
        .collect(),
    )
  }

  /// Subject line of the last commit
  pub fn last_commit_subject(&self) -> Result<String> {
    let output = git(&self.path, &["log", "-1", "--format=%s"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  pub fn read_file(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(path))?)
  }
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run `cargo modset ...` and return its output whatever the exit status
pub fn run_cargo_modset_raw(cwd: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_cargo-modset");

  Command::new(bin)
    .current_dir(cwd)
    .arg("modset")
    .args(args)
    .env_remove("RUST_LOG")
    .output()
    .context("Failed to run cargo-modset")
}

/// Run `cargo modset ...`, failing the test on a non-zero exit
pub fn run_cargo_modset(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_cargo_modset_raw(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "cargo-modset command failed: cargo modset {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).to_string()
}
