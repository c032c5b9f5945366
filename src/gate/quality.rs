//! Quality gate resolution: poll a project's gate to a concrete status

use crate::core::config::{QualityGateConfig, RetryPolicy};
use crate::core::error::{GateError, GateResult, ResultExt};
use crate::poll::{Clock, PollOutcome, poll};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Resolved quality gate status. `Ok` is the only passing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateStatus {
  Pending,
  Ok,
  Error,
  Warn,
  /// Synthesized locally when polling exhausts its budget
  Timeout,
}

impl GateStatus {
  /// The gate has resolved once it is no longer pending
  pub fn is_resolved(&self) -> bool {
    !matches!(self, GateStatus::Pending)
  }
}

impl std::fmt::Display for GateStatus {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      GateStatus::Pending => write!(f, "pending"),
      GateStatus::Ok => write!(f, "ok"),
      GateStatus::Error => write!(f, "error"),
      GateStatus::Warn => write!(f, "warn"),
      GateStatus::Timeout => write!(f, "timeout"),
    }
  }
}

/// One gate condition, reported for diagnostics only.
///
/// Conditions never affect the pass/fail decision; the resolved status alone
/// decides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GateCondition {
  pub metric_key: String,
  pub status: String,
  #[serde(default)]
  pub actual_value: Option<String>,
  #[serde(default)]
  pub error_threshold: Option<String>,
}

/// Gate status plus its supporting conditions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateSnapshot {
  pub status: GateStatus,
  #[serde(default)]
  pub conditions: Vec<GateCondition>,
}

/// Source of quality gate snapshots, fetched once per poll attempt
pub trait GateStatusSource {
  fn fetch(&mut self, project_key: &str) -> GateResult<GateSnapshot>;
}

/// File-backed gate source: the outer pipeline refreshes the file between
/// attempts. Stands in for the HTTP adapter, which is out of scope here.
pub struct FileGateSource {
  path: PathBuf,
}

impl FileGateSource {
  pub fn new(path: PathBuf) -> Self {
    Self { path }
  }
}

impl GateStatusSource for FileGateSource {
  fn fetch(&mut self, project_key: &str) -> GateResult<GateSnapshot> {
    let content = fs::read_to_string(&self.path).map_err(|e| {
      GateError::external(
        "quality gate",
        format!(
          "could not read gate status for '{}' from {}: {}",
          project_key,
          self.path.display(),
          e
        ),
      )
    })?;
    serde_json::from_str(&content)
      .map_err(|e| GateError::external("quality gate", format!("malformed gate document: {}", e)))
  }
}

/// Result of resolving a quality gate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateResolution {
  /// Concrete status the gate resolved to (Timeout when the budget ran out)
  pub status: GateStatus,

  /// Whether the resolved status passes the gate
  pub passed: bool,

  /// Supporting condition details, diagnostic only
  pub conditions: Vec<GateCondition>,
}

/// Poll the gate until it resolves, then map status to pass/fail.
///
/// `Ok` passes. `Error` and a polling timeout fail. `Warn` fails under the
/// strict default and passes only when `warn_fails_gate` is disabled in
/// config.
pub fn resolve_gate(
  source: &mut dyn GateStatusSource,
  project_key: &str,
  gate_config: &QualityGateConfig,
  policy: &RetryPolicy,
  clock: &dyn Clock,
) -> GateResult<GateResolution> {
  let outcome = poll(
    || source.fetch(project_key),
    |snapshot: &GateSnapshot| snapshot.status.is_resolved(),
    policy,
    clock,
  )
  .with_context(|| format!("While resolving quality gate for '{}'", project_key))?;

  let (status, conditions) = match outcome {
    PollOutcome::Terminal(snapshot) => (snapshot.status, snapshot.conditions),
    PollOutcome::TimedOut { .. } => (GateStatus::Timeout, Vec::new()),
  };

  let passed = match status {
    GateStatus::Ok => true,
    GateStatus::Warn => !gate_config.warn_fails_gate,
    _ => false,
  };

  Ok(GateResolution {
    status,
    passed,
    conditions,
  })
}
