//! `cargo modset tag`

use crate::core::context::ReleaseContext;
use crate::core::error::{RailError, RailResult};
use crate::core::vcs::SystemGit;
use crate::release::{delete_module_set_tags, tag_all_modules, validate_commit, versions_and_modules_to_update};

pub fn run_tag(
  ctx: &ReleaseContext,
  module_set: String,
  commit_hash: Option<String>,
  delete: bool,
  sign: bool,
) -> RailResult<()> {
  println!("Using versioning file {}", ctx.versioning_file.display());
  let git = SystemGit::open(&ctx.root)?;
  let release = versions_and_modules_to_update(&ctx.registry, &ctx.discovered.modules, &module_set, &ctx.root)?;

  if delete {
    println!("Deleting all tags associated with module set {} {}", release.set_name, release.version);
    delete_module_set_tags(&git, &release)?;
    println!("✅ Successfully deleted module tags");
    return Ok(());
  }

  let commit_hash = commit_hash.ok_or_else(|| {
    RailError::with_help(
      "required argument --commit-hash was not given",
      "Pass the commit produced by `cargo modset prerelease`, or --delete-module-set-tags.",
    )
  })?;
  let sha = validate_commit(&git, &commit_hash)?;

  println!("Tagging module set {} {} at {}", release.set_name, release.version, sha);
  let created = tag_all_modules(&git, &release, &sha, sign)?;
  println!("✅ Created {} tag(s)", created.len());
  Ok(())
}
