//! System git backend
//!
//! Every operation is a `git` subprocess run with an isolated environment.

use super::SourceControl;
use crate::core::error::{GitError, RailError, RailResult, ResultExt};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::debug;

/// Environment variables passed through to git
const GIT_ENV_PASSTHROUGH: &[&str] = &["PATH", "HOME", "XDG_CONFIG_HOME", "GNUPGHOME", "GPG_TTY", "SSH_AUTH_SOCK"];

/// Git backend using the system `git` binary
pub struct SystemGit {
  /// Working tree root
  pub(crate) work_tree: PathBuf,
}

impl SystemGit {
  /// Open the repository containing `path`
  pub fn open(path: &Path) -> RailResult<Self> {
    let output = Command::new("git")
      .arg("-C")
      .arg(path)
      .args(["rev-parse", "--show-toplevel"])
      .output()
      .context("Failed to execute git rev-parse")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("not a git repository") {
        return Err(RailError::Git(GitError::RepoNotFound {
          path: path.to_path_buf(),
        }));
      }
      return Err(RailError::message(format!("Failed to open git repository: {}", stderr)));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(Self {
      work_tree: PathBuf::from(stdout.trim()),
    })
  }

  /// Create a safe git command with isolated environment
  ///
  /// Only PATH, HOME, XDG_CONFIG_HOME and the GnuPG/SSH agent variables
  /// survive, so user config (signing keys, identity) still applies but
  /// nothing else leaks in.
  pub(crate) fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(&self.work_tree);

    cmd.env_clear();
    for var in GIT_ENV_PASSTHROUGH {
      if let Ok(value) = std::env::var(var) {
        cmd.env(var, value);
      }
    }

    cmd.arg("-c").arg("advice.detachedHead=false");
    cmd.arg("-c").arg("core.quotePath=false");

    cmd
  }

  /// Run git and return its output, successful or not
  fn output(&self, args: &[&str]) -> RailResult<Output> {
    debug!(command = %format!("git {}", args.join(" ")), "Running git");
    self
      .git_cmd()
      .args(args)
      .output()
      .with_context(|| format!("Failed to execute git {}", args.join(" ")))
  }

  /// Run git, failing with `CommandFailed` on a non-zero exit
  fn run(&self, args: &[&str]) -> RailResult<String> {
    let output = self.output(args)?;

    if !output.status.success() {
      return Err(RailError::Git(GitError::CommandFailed {
        command: format!("git {}", args.join(" ")),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
      }));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }
}

impl SourceControl for SystemGit {
  fn current_branch(&self) -> RailResult<String> {
    let output = self.output(&["rev-parse", "--abbrev-ref", "HEAD"])?;

    if !output.status.success() {
      return Ok("HEAD".to_string());
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  fn create_branch(&self, name: &str, base: &str) -> RailResult<()> {
    self.run(&["checkout", "-b", name, base])?;
    Ok(())
  }

  fn tag_exists(&self, tag: &str) -> RailResult<bool> {
    let tag_ref = format!("refs/tags/{}", tag);
    let output = self.output(&["rev-parse", "--quiet", "--verify", &tag_ref])?;
    Ok(output.status.success())
  }

  fn create_tag(&self, tag: &str, commit: &str, message: &str, sign: bool) -> RailResult<()> {
    let mode = if sign { "-s" } else { "-a" };
    self.run(&["tag", mode, tag, "-m", message, commit])?;
    Ok(())
  }

  fn delete_tag(&self, tag: &str) -> RailResult<()> {
    self.run(&["tag", "-d", tag])?;
    Ok(())
  }

  fn working_tree_status(&self) -> RailResult<Option<String>> {
    let status = self.run(&["status", "--porcelain"])?;
    Ok(if status.is_empty() { None } else { Some(status) })
  }

  fn commit_all(&self, message: &str) -> RailResult<()> {
    self.run(&["add", "--all"])?;
    self.run(&["commit", "-m", message])?;
    Ok(())
  }

  fn resolve_commit(&self, rev: &str) -> RailResult<String> {
    let peeled = format!("{}^{{commit}}", rev);
    let output = self.output(&["rev-parse", "--quiet", "--verify", &peeled])?;

    if !output.status.success() {
      return Err(RailError::Git(GitError::CommitNotFound { sha: rev.to_string() }));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  fn is_ancestor_of_head(&self, sha: &str) -> RailResult<bool> {
    let output = self.output(&["merge-base", "--is-ancestor", sha, "HEAD"])?;

    match output.status.code() {
      Some(0) => Ok(true),
      Some(1) => Ok(false),
      _ => Err(RailError::Git(GitError::CommandFailed {
        command: format!("git merge-base --is-ancestor {} HEAD", sha),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
      })),
    }
  }
}
