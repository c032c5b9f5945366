//! Analysis task wait: poll an opaque task id to a terminal status

use crate::core::config::RetryPolicy;
use crate::core::error::{GateError, GateResult, ResultExt};
use crate::poll::{Clock, PollOutcome, poll};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Status of a remote analysis task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
  Pending,
  Success,
  Failed,
  Canceled,
  /// Status string the remote reported that we do not recognize
  #[serde(other)]
  Unknown,
}

impl TaskStatus {
  /// Terminal states end the wait
  pub fn is_terminal(&self) -> bool {
    matches!(self, TaskStatus::Success | TaskStatus::Failed | TaskStatus::Canceled)
  }
}

/// Source of analysis task status, fetched once per poll attempt
pub trait TaskStatusSource {
  fn fetch(&mut self, task_id: &str) -> GateResult<TaskStatus>;
}

/// Status document shape returned by the analysis service
#[derive(Debug, Deserialize)]
struct TaskStatusDoc {
  status: TaskStatus,
}

/// File-backed status source: the outer pipeline refreshes the file between
/// attempts. Stands in for the HTTP adapter, which is out of scope here.
pub struct FileTaskSource {
  path: PathBuf,
}

impl FileTaskSource {
  pub fn new(path: PathBuf) -> Self {
    Self { path }
  }
}

impl TaskStatusSource for FileTaskSource {
  fn fetch(&mut self, task_id: &str) -> GateResult<TaskStatus> {
    let content = fs::read_to_string(&self.path).map_err(|e| {
      GateError::external(
        "analysis",
        format!("could not read status for task '{}' from {}: {}", task_id, self.path.display(), e),
      )
    })?;
    let doc: TaskStatusDoc = serde_json::from_str(&content)
      .map_err(|e| GateError::external("analysis", format!("malformed status document: {}", e)))?;
    Ok(doc.status)
  }
}

/// Terminal outcome of waiting on an analysis task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisOutcome {
  Success,
  Failed,
  Canceled,
  Timeout,
}

impl AnalysisOutcome {
  /// Only a successful analysis lets the pipeline proceed
  pub fn passed(&self) -> bool {
    matches!(self, AnalysisOutcome::Success)
  }
}

impl std::fmt::Display for AnalysisOutcome {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      AnalysisOutcome::Success => write!(f, "success"),
      AnalysisOutcome::Failed => write!(f, "failed"),
      AnalysisOutcome::Canceled => write!(f, "canceled"),
      AnalysisOutcome::Timeout => write!(f, "timeout"),
    }
  }
}

/// Wait for an analysis task to reach a terminal status.
///
/// Unknown statuses are treated like Pending: the wait continues until the
/// remote reports something terminal or the budget runs out.
pub fn await_analysis(
  source: &mut dyn TaskStatusSource,
  task_id: &str,
  policy: &RetryPolicy,
  clock: &dyn Clock,
) -> GateResult<AnalysisOutcome> {
  let outcome = poll(|| source.fetch(task_id), TaskStatus::is_terminal, policy, clock)
    .with_context(|| format!("While waiting for analysis task '{}'", task_id))?;

  Ok(match outcome {
    PollOutcome::Terminal(TaskStatus::Success) => AnalysisOutcome::Success,
    PollOutcome::Terminal(TaskStatus::Failed) => AnalysisOutcome::Failed,
    PollOutcome::Terminal(TaskStatus::Canceled) => AnalysisOutcome::Canceled,
    // is_terminal admits only the three statuses above
    PollOutcome::Terminal(_) | PollOutcome::TimedOut { .. } => AnalysisOutcome::Timeout,
  })
}
