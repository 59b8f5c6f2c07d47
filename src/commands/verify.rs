//! `cargo modset verify`

use crate::checks::{verify_all_modules_in_set, verify_dependencies, verify_versions};
use crate::core::context::ReleaseContext;
use crate::core::error::RailResult;

/// Run every check; dependency stability problems are printed but don't fail
pub fn run_verify(ctx: &ReleaseContext) -> RailResult<()> {
  println!("Using versioning file {}", ctx.versioning_file.display());

  verify_all_modules_in_set(&ctx.discovered.modules, ctx.registry.module_info())?;
  println!("PASS: All modules exist in exactly one set.");

  verify_versions(ctx.registry.module_sets())?;
  println!("PASS: All module versions are valid, and no module sets have same non-zero major version.");

  for warning in verify_dependencies(ctx.registry.module_info(), &ctx.discovered.modules) {
    println!("WARNING: {}", warning);
  }
  println!("Finished checking all stable modules' dependencies.");

  println!("PASS: Module sets successfully verified.");
  Ok(())
}
