//! Error types for release-gate with contextual messages and exit codes
//!
//! The engine distinguishes recoverable validation problems (skip the bump,
//! keep going) from fatal ones (external service failure, exhausted polling
//! budget, policy violation). Every fatal error maps to an exit code so the
//! outer pipeline can translate an aborted decision into a build failure.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for release-gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, missing files)
  User = 1,
  /// System error (external service, timeout, I/O)
  System = 2,
  /// Policy failure (gate failed, compliance violations)
  Policy = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for release-gate
#[derive(Debug)]
pub enum GateError {
  /// Configuration errors (gate.toml)
  Config(ConfigError),

  /// Recoverable input validation errors (malformed version string, bad trigger)
  Validation { what: String, message: String },

  /// Transport failure or malformed response from a polled remote service
  External { service: String, message: String },

  /// Polling exhausted its attempt budget without a terminal state
  Timeout {
    stage: String,
    attempts: u32,
    interval_secs: u64,
  },

  /// Failing quality gate or compliance verdict
  PolicyViolation { stage: String, reason: String },

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl GateError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    GateError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    GateError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Create a recoverable validation error
  pub fn validation(what: impl Into<String>, message: impl Into<String>) -> Self {
    GateError::Validation {
      what: what.into(),
      message: message.into(),
    }
  }

  /// Create an external-service error
  pub fn external(service: impl Into<String>, message: impl Into<String>) -> Self {
    GateError::External {
      service: service.into(),
      message: message.into(),
    }
  }

  /// Create a policy-violation error
  pub fn policy(stage: impl Into<String>, reason: impl Into<String>) -> Self {
    GateError::PolicyViolation {
      stage: stage.into(),
      reason: reason.into(),
    }
  }

  /// Whether this error is recoverable (the run continues without aborting)
  pub fn is_recoverable(&self) -> bool {
    matches!(self, GateError::Validation { .. })
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      GateError::Message { message, context, help } => GateError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      GateError::Config(_) => ExitCode::User,
      GateError::Validation { .. } => ExitCode::User,
      GateError::External { .. } => ExitCode::System,
      GateError::Timeout { .. } => ExitCode::System,
      GateError::PolicyViolation { .. } => ExitCode::Policy,
      GateError::Io(_) => ExitCode::System,
      GateError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      GateError::Config(e) => e.help_message(),
      GateError::Timeout { stage, .. } => Some(format!(
        "The {} did not reach a terminal state. Raise max_attempts or interval_secs in gate.toml, or check the remote service",
        stage
      )),
      GateError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for GateError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GateError::Config(e) => write!(f, "{}", e),
      GateError::Validation { what, message } => write!(f, "Invalid {}: {}", what, message),
      GateError::External { service, message } => write!(f, "External service '{}' failed: {}", service, message),
      GateError::Timeout {
        stage,
        attempts,
        interval_secs,
      } => write!(
        f,
        "{} timed out after {} attempts at {}s intervals",
        stage, attempts, interval_secs
      ),
      GateError::PolicyViolation { stage, reason } => write!(f, "{}: {}", stage, reason),
      GateError::Io(e) => write!(f, "I/O error: {}", e),
      GateError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for GateError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      GateError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for GateError {
  fn from(err: io::Error) -> Self {
    GateError::Io(err)
  }
}

impl From<String> for GateError {
  fn from(msg: String) -> Self {
    GateError::message(msg)
  }
}

impl From<&str> for GateError {
  fn from(msg: &str) -> Self {
    GateError::message(msg)
  }
}

impl From<toml_edit::TomlError> for GateError {
  fn from(err: toml_edit::TomlError) -> Self {
    GateError::message(format!("TOML parse error: {}", err))
  }
}

impl From<toml_edit::de::Error> for GateError {
  fn from(err: toml_edit::de::Error) -> Self {
    GateError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<toml_edit::ser::Error> for GateError {
  fn from(err: toml_edit::ser::Error) -> Self {
    GateError::message(format!("TOML serialization error: {}", err))
  }
}

impl From<serde_json::Error> for GateError {
  fn from(err: serde_json::Error) -> Self {
    GateError::message(format!("JSON error: {}", err))
  }
}

impl From<semver::Error> for GateError {
  fn from(err: semver::Error) -> Self {
    GateError::validation("version string", err.to_string())
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// gate.toml not found in any search location
  NotFound { workspace_root: PathBuf },
  /// Required field missing from config
  MissingField { field: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => Some(
        "Create a gate.toml with at least:\n  [artifact]\n  base_name = \"my-project\"".to_string(),
      ),
      ConfigError::MissingField { field } => Some(format!("Add '{}' to gate.toml", field)),
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { workspace_root } => {
        write!(f, "No gate.toml found under {}", workspace_root.display())
      }
      ConfigError::MissingField { field } => write!(f, "Missing required config field: {}", field),
    }
  }
}

/// Result alias used throughout the crate
pub type GateResult<T> = Result<T, GateError>;

/// Extension trait for adding context to results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> GateResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> GateResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<GateError>,
{
  fn context(self, ctx: impl Into<String>) -> GateResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> GateResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Print an error with optional help text
pub fn print_error(error: &GateError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
