//! `cargo modset prerelease`

use crate::core::context::ReleaseContext;
use crate::core::error::RailResult;
use crate::core::vcs::SystemGit;
use crate::release::{self, PrereleaseOptions};

pub fn run_prerelease(
  ctx: &ReleaseContext,
  module_set: String,
  from_existing_branch: Option<String>,
  skip_make: bool,
) -> RailResult<()> {
  println!("Using versioning file {}", ctx.versioning_file.display());
  let git = SystemGit::open(&ctx.root)?;

  let opts = PrereleaseOptions {
    module_set,
    from_existing_branch,
    skip_make,
  };
  let outcome = release::run_prerelease(ctx, &git, &opts)?;

  println!(
    "\n✅ Prerelease of {} {} finished ({} manifest(s) updated). Now verify the changes with:",
    outcome.release.set_name,
    outcome.release.version,
    outcome.updated_manifests.len()
  );
  println!("\n   git diff {}\n", outcome.base_branch);
  println!("Then push branch {} upstream.", outcome.branch);
  Ok(())
}
