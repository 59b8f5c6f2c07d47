//! Prerelease: prepare a branch with a module set's new version
//!
//! 1. Refuse if any of the set's tags already exist or the tree is dirty
//! 2. Branch `pre_release_<set>_<version>` off the base branch
//! 3. Rewrite versions in every discovered `Cargo.toml`
//! 4. Run `make lint` and `make ci` (unless skipped)
//! 5. Commit everything

use crate::cargo::manifest::update_manifest_file;
use crate::core::context::ReleaseContext;
use crate::core::error::{GitError, RailError, RailResult, ResultExt};
use crate::core::vcs::SourceControl;
use crate::release::tags::{ModuleSetRelease, versions_and_modules_to_update};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct PrereleaseOptions {
  pub module_set: String,
  /// Branch to start from; the current branch when `None`
  pub from_existing_branch: Option<String>,
  /// Skip `make lint` and `make ci`
  pub skip_make: bool,
}

/// What a successful prerelease produced
#[derive(Debug, Clone)]
pub struct PrereleaseOutcome {
  pub release: ModuleSetRelease,
  pub base_branch: String,
  pub branch: String,
  pub updated_manifests: Vec<PathBuf>,
}

pub fn prerelease_branch_name(set_name: &str, version: &str) -> String {
  format!("pre_release_{}_{}", set_name, version)
}

pub fn commit_message(version: &str) -> String {
  format!("Prepare for releasing {}", version)
}

/// Run the prerelease flow for one module set
pub fn run_prerelease(
  ctx: &ReleaseContext,
  scm: &dyn SourceControl,
  opts: &PrereleaseOptions,
) -> RailResult<PrereleaseOutcome> {
  let release = versions_and_modules_to_update(&ctx.registry, &ctx.discovered.modules, &opts.module_set, &ctx.root)?;
  let full_tags = release.full_tags();

  println!("Checking for tags {}", full_tags.join(", "));
  verify_tags_do_not_exist(scm, &full_tags)?;

  if let Some(status) = scm.working_tree_status()? {
    return Err(GitError::DirtyWorkingTree { status }.into());
  }

  let base_branch = match &opts.from_existing_branch {
    Some(branch) => branch.clone(),
    None => scm.current_branch()?,
  };
  let branch = prerelease_branch_name(&release.set_name, &release.version);
  println!("Creating branch {} from {}", branch, base_branch);
  scm.create_branch(&branch, &base_branch)?;

  println!("Updating module versions in Cargo.toml files...");
  let mut updated_manifests = Vec::new();
  for manifest in ctx.discovered.all_manifests() {
    if update_manifest_file(manifest, &release.version, &release.modules)
      .with_context(|| format!("Could not update module versions in {}", manifest.display()))?
    {
      debug!(path = %manifest.display(), "Updated manifest");
      updated_manifests.push(manifest.to_path_buf());
    }
  }

  if opts.skip_make {
    println!("Skipping 'make lint'...");
    println!("Skipping 'make ci'...");
  } else {
    println!("Running 'make lint'...");
    run_make(&ctx.root, "lint")?;
    println!("Running 'make ci'...");
    run_make(&ctx.root, "ci")?;
  }

  let message = commit_message(&release.version);
  println!("Commit changes to git with message '{}'...", message);
  scm.commit_all(&message)?;

  Ok(PrereleaseOutcome {
    release,
    base_branch,
    branch,
    updated_manifests,
  })
}

fn verify_tags_do_not_exist(scm: &dyn SourceControl, full_tags: &[String]) -> RailResult<()> {
  for tag in full_tags {
    if scm.tag_exists(tag)? {
      return Err(GitError::TagExists { tag: tag.clone() }.into());
    }
  }
  Ok(())
}

fn run_make(root: &Path, target: &str) -> RailResult<()> {
  let command = format!("make {}", target);
  let output = Command::new("make")
    .arg(target)
    .current_dir(root)
    .output()
    .with_context(|| format!("Failed to execute {}", command))?;

  if !output.status.success() {
    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));
    return Err(RailError::Tool {
      command,
      output: combined.trim().to_string(),
    });
  }

  Ok(())
}
