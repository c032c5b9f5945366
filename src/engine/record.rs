//! Audit record for a completed decision
//!
//! Mirrors the plan idiom: the record carries a content-hash id so identical
//! inputs are recognizable as the same decision across re-runs, plus a
//! timestamp for the audit log. The id deliberately excludes the timestamp.

use crate::engine::Decision;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Decision identifier (SHA-256 hash of decision contents)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionId(String);

impl DecisionId {
  /// Get the short ID (first 12 characters)
  pub fn short(&self) -> &str {
    &self.0[..12.min(self.0.len())]
  }
}

impl fmt::Display for DecisionId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.short())
  }
}

/// A decision plus the run inputs that produced it, ready for audit logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRecord {
  /// Content hash over branch, trigger, and decision
  pub id: DecisionId,

  /// When the decision was made
  pub decided_at: DateTime<Utc>,

  /// Branch the run was for
  pub branch: String,

  /// Trigger text the run was for, if any
  pub trigger: Option<String>,

  /// The decision itself
  pub decision: Decision,
}

impl DecisionRecord {
  /// Build a record for a completed run
  pub fn new(branch: impl Into<String>, trigger: Option<String>, decision: Decision) -> Self {
    let branch = branch.into();
    let id = Self::compute_id(&branch, trigger.as_deref(), &decision);
    Self {
      id,
      decided_at: Utc::now(),
      branch,
      trigger,
      decision,
    }
  }

  /// Hash the timestamp-independent parts so identical inputs give identical ids
  fn compute_id(branch: &str, trigger: Option<&str>, decision: &Decision) -> DecisionId {
    let mut hasher = Sha256::new();
    hasher.update(branch.as_bytes());
    hasher.update(b"\0");
    hasher.update(trigger.unwrap_or("").as_bytes());
    hasher.update(b"\0");
    hasher.update(serde_json::to_vec(decision).unwrap_or_default());
    DecisionId(format!("{:x}", hasher.finalize()))
  }

  /// Serialize to JSON for the audit log
  pub fn to_json(&self) -> crate::core::error::GateResult<String> {
    Ok(serde_json::to_string_pretty(self)?)
  }
}
