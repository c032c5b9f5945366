//! Run context: every ambient input the pipeline used to carry in environment
//! variables, made explicit
//!
//! One `ReleaseContext` is built per pipeline invocation and passed by value
//! through the stages. Nothing in the engine reads the process environment.

use std::path::PathBuf;

/// Explicit per-run inputs supplied by the calling pipeline
#[derive(Debug, Clone)]
pub struct ReleaseContext {
  /// Workspace root the run operates in
  pub workspace_root: PathBuf,

  /// Branch being built ("master" selects release routing)
  pub branch: String,

  /// Free-text change trigger (e.g. a change-request title); absent maps to no bump
  pub trigger: Option<String>,

  /// Path to a single-line version file, if the project keeps one
  pub version_file: Option<PathBuf>,

  /// Path to a TOML build descriptor with a `version = "X.Y.Z"` assignment
  pub descriptor: Option<PathBuf>,
}

impl ReleaseContext {
  /// Create a context with no version sources configured
  pub fn new(workspace_root: PathBuf, branch: impl Into<String>, trigger: Option<String>) -> Self {
    Self {
      workspace_root,
      branch: branch.into(),
      trigger,
      version_file: None,
      descriptor: None,
    }
  }

  /// Whether any version source is configured
  pub fn has_version_source(&self) -> bool {
    self.version_file.is_some() || self.descriptor.is_some()
  }

  /// Trigger text, treating empty strings as absent
  pub fn trigger_text(&self) -> Option<&str> {
    self.trigger.as_deref().filter(|t| !t.trim().is_empty())
  }
}
