//! In-memory `SourceControl` for release driver tests

use crate::core::error::{GitError, RailError, RailResult};
use crate::core::vcs::SourceControl;
use std::cell::RefCell;
use std::collections::BTreeSet;

#[derive(Default)]
pub struct MockScm {
  pub branch: RefCell<String>,
  pub tags: RefCell<BTreeSet<String>>,
  pub status: Option<String>,
  pub commits: RefCell<Vec<String>>,
  /// Full SHAs `resolve_commit` can find by prefix
  pub known_commits: Vec<String>,
  /// Resolvable commits that are not ancestors of HEAD
  pub unreachable: Vec<String>,
  /// `create_tag` fails for this tag
  pub fail_create: Option<String>,
  /// `delete_tag` fails for this tag
  pub fail_delete: Option<String>,
}

impl MockScm {
  pub fn on_branch(branch: &str) -> Self {
    Self {
      branch: RefCell::new(branch.to_string()),
      known_commits: vec!["a".repeat(40)],
      ..Default::default()
    }
  }

  fn failed(command: &str) -> RailError {
    RailError::Git(GitError::CommandFailed {
      command: command.to_string(),
      stderr: "simulated failure".to_string(),
    })
  }
}

impl SourceControl for MockScm {
  fn current_branch(&self) -> RailResult<String> {
    Ok(self.branch.borrow().clone())
  }

  fn create_branch(&self, name: &str, _base: &str) -> RailResult<()> {
    *self.branch.borrow_mut() = name.to_string();
    Ok(())
  }

  fn tag_exists(&self, tag: &str) -> RailResult<bool> {
    Ok(self.tags.borrow().contains(tag))
  }

  fn create_tag(&self, tag: &str, _commit: &str, _message: &str, _sign: bool) -> RailResult<()> {
    if self.fail_create.as_deref() == Some(tag) || !self.tags.borrow_mut().insert(tag.to_string()) {
      return Err(Self::failed("git tag"));
    }
    Ok(())
  }

  fn delete_tag(&self, tag: &str) -> RailResult<()> {
    if self.fail_delete.as_deref() == Some(tag) || !self.tags.borrow_mut().remove(tag) {
      return Err(Self::failed("git tag -d"));
    }
    Ok(())
  }

  fn working_tree_status(&self) -> RailResult<Option<String>> {
    Ok(self.status.clone())
  }

  fn commit_all(&self, message: &str) -> RailResult<()> {
    self.commits.borrow_mut().push(message.to_string());
    Ok(())
  }

  fn resolve_commit(&self, rev: &str) -> RailResult<String> {
    self
      .known_commits
      .iter()
      .find(|sha| sha.starts_with(rev))
      .cloned()
      .ok_or_else(|| GitError::CommitNotFound { sha: rev.to_string() }.into())
  }

  fn is_ancestor_of_head(&self, sha: &str) -> RailResult<bool> {
    Ok(!self.unreachable.iter().any(|s| s == sha))
  }
}
