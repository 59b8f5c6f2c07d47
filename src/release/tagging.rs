//! Tagging: create (or delete) the git tags of a module set release
//!
//! Tags are created as a batch. If any tag fails, the tags already created in
//! that batch are deleted again so a release is never half-tagged.

use crate::core::error::{GitError, RailResult};
use crate::core::vcs::SourceControl;
use crate::release::tags::ModuleSetRelease;

/// Resolve `commit_hash` and make sure it is on the current branch
pub fn validate_commit(scm: &dyn SourceControl, commit_hash: &str) -> RailResult<String> {
  let sha = scm.resolve_commit(commit_hash)?;

  if !scm.is_ancestor_of_head(&sha)? {
    return Err(
      GitError::CommitNotOnBranch {
        commit: commit_hash.to_string(),
        sha,
      }
      .into(),
    );
  }

  Ok(sha)
}

pub fn tag_message(tag: &str) -> String {
  format!("Version {}", tag)
}

/// Tag every module of the release at `commit`, rolling back on failure
///
/// Returns the created tags in module order.
pub fn tag_all_modules(
  scm: &dyn SourceControl,
  release: &ModuleSetRelease,
  commit: &str,
  sign: bool,
) -> RailResult<Vec<String>> {
  let mut created: Vec<String> = Vec::new();

  for tag in release.full_tags() {
    let message = tag_message(&tag);

    if let Err(err) = scm.create_tag(&tag, commit, &message, sign) {
      println!("git tag failed for {}, removing all newly created tags...", tag);

      if let Err(rollback_err) = delete_tags(scm, &created) {
        return Err(
          GitError::TagRollbackFailed {
            tag,
            reason: err.to_string(),
            rollback_error: rollback_err.to_string(),
          }
          .into(),
        );
      }

      return Err(err);
    }

    println!("{}", tag);
    created.push(tag);
  }

  Ok(created)
}

/// Delete the given tags, stopping at the first failure
pub fn delete_tags(scm: &dyn SourceControl, tags: &[String]) -> RailResult<()> {
  for tag in tags {
    scm.delete_tag(tag)?;
    println!("Deleted {}", tag);
  }
  Ok(())
}

/// Delete every tag of the release
pub fn delete_module_set_tags(scm: &dyn SourceControl, release: &ModuleSetRelease) -> RailResult<Vec<String>> {
  let tags = release.full_tags();
  delete_tags(scm, &tags)?;
  Ok(tags)
}
