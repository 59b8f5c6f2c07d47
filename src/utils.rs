//! Path helpers

use crate::core::error::{GitError, RailResult};
use std::path::{Path, PathBuf};

/// Find the repository root by walking up from `start` until a `.git` entry appears
///
/// `.git` may be a directory or, for worktrees and submodules, a file.
pub fn find_repo_root(start: &Path) -> RailResult<PathBuf> {
  start
    .ancestors()
    .find(|dir| dir.join(".git").exists())
    .map(Path::to_path_buf)
    .ok_or_else(|| {
      GitError::RepoNotFound {
        path: start.to_path_buf(),
      }
      .into()
    })
}

/// Convert a path to Git format (always forward slashes)
///
/// Tag names are built from paths, and git expects `/` even on Windows.
pub fn path_to_git_format(path: &Path) -> String {
  #[cfg(target_os = "windows")]
  {
    path.to_string_lossy().replace('\\', "/")
  }
  #[cfg(not(target_os = "windows"))]
  {
    path.to_string_lossy().to_string()
  }
}
