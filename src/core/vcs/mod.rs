//! Source control used by the release driver
//!
//! The release flow talks to git through [`SourceControl`] so tag rollback
//! and branch handling can be exercised without a real repository. The
//! validator never touches source control.

pub mod system_git;

pub use system_git::SystemGit;

use crate::core::error::RailResult;

/// Git operations needed to cut a module set release
pub trait SourceControl {
  /// Name of the checked-out branch (`HEAD` when detached)
  fn current_branch(&self) -> RailResult<String>;

  /// Create `name` from `base` and switch to it
  fn create_branch(&self, name: &str, base: &str) -> RailResult<()>;

  fn tag_exists(&self, tag: &str) -> RailResult<bool>;

  /// Create an annotated tag on `commit`, GPG-signed when `sign` is set
  fn create_tag(&self, tag: &str, commit: &str, message: &str, sign: bool) -> RailResult<()>;

  fn delete_tag(&self, tag: &str) -> RailResult<()>;

  /// `None` when clean, otherwise the porcelain status listing
  fn working_tree_status(&self) -> RailResult<Option<String>>;

  fn is_working_tree_clean(&self) -> RailResult<bool> {
    Ok(self.working_tree_status()?.is_none())
  }

  /// Stage every change and commit it
  fn commit_all(&self, message: &str) -> RailResult<()>;

  /// Resolve a revision to its full commit SHA
  fn resolve_commit(&self, rev: &str) -> RailResult<String>;

  /// Whether `sha` is reachable from `HEAD`
  fn is_ancestor_of_head(&self, sha: &str) -> RailResult<bool>;
}
