//! Error types for cargo-modset with contextual messages and exit codes
//!
//! This module provides a unified error type that categorizes errors and provides
//! contextual help messages to users. Configuration problems (the versioning file
//! itself is wrong), validation problems (the versioning file disagrees with the
//! repository), and system problems (git, make, I/O) map to distinct exit codes.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for cargo-modset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, missing files)
  User = 1,
  /// System error (git, make, I/O)
  System = 2,
  /// Validation failure (versioning file disagrees with the repository)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for cargo-modset
#[derive(Debug)]
pub enum RailError {
  /// Versioning file errors
  Config(ConfigError),

  /// Git operation errors
  Git(GitError),

  /// Validation errors (module sets vs. repository)
  Validation(ValidationError),

  /// External build tool failed (make)
  Tool { command: String, output: String },

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl RailError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    RailError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    RailError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      RailError::Message { message, context, help } => RailError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      RailError::Io(e) => RailError::Message {
        message: format!("I/O error: {}", e),
        context: Some(ctx_str),
        help: None,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      RailError::Config(_) => ExitCode::User,
      RailError::Git(_) => ExitCode::System,
      RailError::Validation(_) => ExitCode::Validation,
      RailError::Tool { .. } => ExitCode::System,
      RailError::Io(_) => ExitCode::System,
      RailError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      RailError::Config(e) => e.help_message(),
      RailError::Git(e) => e.help_message(),
      RailError::Validation(e) => e.help_message(),
      RailError::Tool { .. } => Some("Fix the build, or pass --skip-make while debugging the release flow.".to_string()),
      RailError::Message { help, .. } => help.clone(),
      RailError::Io(_) => None,
    }
  }
}

impl fmt::Display for RailError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RailError::Config(e) => write!(f, "{}", e),
      RailError::Git(e) => write!(f, "{}", e),
      RailError::Validation(e) => write!(f, "{}", e),
      RailError::Tool { command, output } => write!(f, "'{}' failed:\n{}", command, output),
      RailError::Io(e) => write!(f, "I/O error: {}", e),
      RailError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for RailError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      RailError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for RailError {
  fn from(err: io::Error) -> Self {
    RailError::Io(err)
  }
}

impl From<String> for RailError {
  fn from(msg: String) -> Self {
    RailError::message(msg)
  }
}

impl From<&str> for RailError {
  fn from(msg: &str) -> Self {
    RailError::message(msg)
  }
}

impl From<toml_edit::TomlError> for RailError {
  fn from(err: toml_edit::TomlError) -> Self {
    RailError::message(format!("TOML parse error: {}", err))
  }
}

impl From<ConfigError> for RailError {
  fn from(err: ConfigError) -> Self {
    RailError::Config(err)
  }
}

impl From<GitError> for RailError {
  fn from(err: GitError) -> Self {
    RailError::Git(err)
  }
}

impl From<ValidationError> for RailError {
  fn from(err: ValidationError) -> Self {
    RailError::Validation(err)
  }
}

/// Versioning file errors
#[derive(Debug)]
pub enum ConfigError {
  /// Versioning file not found
  NotFound { path: PathBuf },

  /// Versioning file extension is not yaml/yml/toml
  UnsupportedFormat { path: PathBuf },

  /// Versioning file does not deserialize into the expected shape
  Parse { path: PathBuf, reason: String },

  /// A module is listed in more than one set
  DuplicateModule {
    module: String,
    first_set: String,
    second_set: String,
  },

  /// A module is listed in a set and also excluded
  ExcludedModuleConflict { module: String, set_name: String },

  /// Requested module set does not exist
  UnknownModuleSet { set_name: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => Some(
        "Create versions.yaml at the repository root, or pass --versioning-file <PATH>.".to_string(),
      ),
      ConfigError::UnsupportedFormat { .. } => {
        Some("Use a .yaml, .yml or .toml versioning file.".to_string())
      }
      ConfigError::Parse { .. } => Some(
        "Expected top-level keys `moduleSets` (name -> {version, modules}) and optional `excludedModules`."
          .to_string(),
      ),
      ConfigError::DuplicateModule { module, .. } => {
        Some(format!("Keep '{}' in exactly one module set.", module))
      }
      ConfigError::ExcludedModuleConflict { module, .. } => Some(format!(
        "Either remove '{}' from excludedModules or from its module set.",
        module
      )),
      ConfigError::UnknownModuleSet { .. } => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { path } => {
        write!(f, "Versioning file not found: {}", path.display())
      }
      ConfigError::UnsupportedFormat { path } => {
        write!(f, "Unsupported versioning file format: {}", path.display())
      }
      ConfigError::Parse { path, reason } => {
        write!(f, "Failed to parse versioning file {}: {}", path.display(), reason)
      }
      ConfigError::DuplicateModule {
        module,
        first_set,
        second_set,
      } => write!(
        f,
        "Module {} exists more than once. Exists in sets {} and {}.",
        module, first_set, second_set
      ),
      ConfigError::ExcludedModuleConflict { module, set_name } => write!(
        f,
        "Module {} is an excluded module and should not be versioned (listed in set {}).",
        module, set_name
      ),
      ConfigError::UnknownModuleSet { set_name } => {
        write!(f, "Could not find module set {} in versioning file", set_name)
      }
    }
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Git command failed
  CommandFailed { command: String, stderr: String },

  /// Repository not found
  RepoNotFound { path: PathBuf },

  /// Commit not found
  CommitNotFound { sha: String },

  /// Commit exists but is not reachable from HEAD
  CommitNotOnBranch { commit: String, sha: String },

  /// Release tag already exists
  TagExists { tag: String },

  /// Working tree has uncommitted changes
  DirtyWorkingTree { status: String },

  /// Tag creation failed and the batch could not be fully rolled back
  TagRollbackFailed {
    tag: String,
    reason: String,
    rollback_error: String,
  },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::RepoNotFound { path } => Some(format!(
        "Run cargo modset from inside a git repository (searched upwards from {}).",
        path.display()
      )),
      GitError::TagExists { .. } => Some(
        "Bump the module set version in the versioning file, or delete the stale tags with `cargo modset tag --delete-module-set-tags`."
          .to_string(),
      ),
      GitError::DirtyWorkingTree { .. } => Some("Commit or stash your changes first.".to_string()),
      GitError::CommitNotOnBranch { .. } => {
        Some("Check out the branch that contains the prerelease commit.".to_string())
      }
      GitError::TagRollbackFailed { .. } => {
        Some("Inspect `git tag -l` and delete the leftover tags by hand.".to_string())
      }
      _ => None,
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr)
      }
      GitError::RepoNotFound { path } => {
        write!(f, "Git repository not found at: {}", path.display())
      }
      GitError::CommitNotFound { sha } => {
        write!(f, "Commit not found: {}", sha)
      }
      GitError::CommitNotOnBranch { commit, sha } => {
        write!(f, "Commit {} (complete SHA: {}) not found on this branch", commit, sha)
      }
      GitError::TagExists { tag } => {
        write!(f, "Git tag already exists for {}", tag)
      }
      GitError::DirtyWorkingTree { status } => {
        write!(
          f,
          "Working tree is not clean, can't proceed with the release process:\n\n{}",
          status
        )
      }
      GitError::TagRollbackFailed {
        tag,
        reason,
        rollback_error,
      } => write!(
        f,
        "git tag failed for {}:\n{}\nCould not remove all tags: {}",
        tag, reason, rollback_error
      ),
    }
  }
}

/// Validation errors: the versioning file disagrees with the repository
#[derive(Debug)]
pub enum ValidationError {
  /// A Cargo package on disk is not in any module set
  UnregisteredModule { module: String, declaration: PathBuf },

  /// A module set lists a package that does not exist on disk
  OrphanManifestEntry { module: String, set_name: String },

  /// A module set version is not valid semver
  InvalidVersion { set_name: String, version: String },

  /// Two module sets share the same non-zero major version
  MajorVersionCollision {
    major: u64,
    first_set: String,
    first_version: String,
    second_set: String,
    second_version: String,
  },

  /// A module listed in a set has no declaration file
  UnresolvedModule { module: String },

  /// The same package name is declared by two Cargo.toml files
  DuplicateDeclaration {
    module: String,
    first: PathBuf,
    second: PathBuf,
  },

  /// A declaration file lives outside the repository root
  ModuleOutsideRepo { declaration: PathBuf, repo_root: PathBuf },
}

impl ValidationError {
  fn help_message(&self) -> Option<String> {
    match self {
      ValidationError::UnregisteredModule { module, .. } => Some(format!(
        "Add '{}' to a module set, or list it under excludedModules.",
        module
      )),
      ValidationError::OrphanManifestEntry { module, .. } => Some(format!(
        "Remove '{}' from the versioning file or restore its Cargo.toml.",
        module
      )),
      ValidationError::InvalidVersion { .. } => {
        Some("Versions must look like v1.2.3 (the leading 'v' is optional).".to_string())
      }
      ValidationError::MajorVersionCollision { .. } => Some(
        "Only one module set may own a given stable major version; merge the sets or bump one of them."
          .to_string(),
      ),
      ValidationError::DuplicateDeclaration { .. } => {
        Some("Rename one of the packages, or delete the stray Cargo.toml.".to_string())
      }
      _ => None,
    }
  }
}

impl fmt::Display for ValidationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ValidationError::UnregisteredModule { module, declaration } => write!(
        f,
        "Module {} (defined in {}) is not contained in any module set.",
        module,
        declaration.display()
      ),
      ValidationError::OrphanManifestEntry { module, set_name } => write!(
        f,
        "Module {} in module set {} does not exist in the repository.",
        module, set_name
      ),
      ValidationError::InvalidVersion { set_name, version } => {
        write!(f, "Module set {} has invalid version string: {}", set_name, version)
      }
      ValidationError::MajorVersionCollision {
        major,
        first_set,
        first_version,
        second_set,
        second_version,
      } => write!(
        f,
        "Multiple module sets have the same major version (v{}): {} (version {}) and {} (version {})",
        major, first_set, first_version, second_set, second_version
      ),
      ValidationError::UnresolvedModule { module } => {
        write!(f, "Module {} has no Cargo.toml in the repository", module)
      }
      ValidationError::DuplicateDeclaration { module, first, second } => write!(
        f,
        "Module {} is declared twice: {} and {}",
        module,
        first.display(),
        second.display()
      ),
      ValidationError::ModuleOutsideRepo { declaration, repo_root } => write!(
        f,
        "Declaration {} could not be found in the repo root {}",
        declaration.display(),
        repo_root.display()
      ),
    }
  }
}

/// Result type alias for cargo-modset
pub type RailResult<T> = Result<T, RailError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> RailResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> RailResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<RailError>,
{
  fn context(self, ctx: impl Into<String>) -> RailResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> RailResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &RailError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
