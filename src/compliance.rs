//! Compliance report evaluation against fixed severity thresholds
//!
//! Pure and total: counting violations and mapping counts to a verdict never
//! touches the network or the filesystem. Severity counts are derived from
//! the violation list on demand so they cannot diverge from it.

use crate::core::error::{GateError, GateResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Severity classification attached to a compliance violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreatLevel {
  Critical,
  Severe,
  Moderate,
  Low,
}

/// A single policy violation from the scan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceViolation {
  pub threat_level: ThreatLevel,
}

/// Raw compliance report produced by the external security-scanning service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
  #[serde(default)]
  pub policy_action: String,

  #[serde(default)]
  pub components: Vec<serde_json::Value>,

  #[serde(default)]
  pub violations: Vec<ComplianceViolation>,
}

impl ComplianceReport {
  /// Parse a report from a JSON document
  pub fn from_json(json: &str) -> GateResult<Self> {
    serde_json::from_str(json)
      .map_err(|e| GateError::external("compliance scan", format!("malformed report: {}", e)))
  }

  /// Load a report from a JSON file
  pub fn load(path: &Path) -> GateResult<Self> {
    let content = std::fs::read_to_string(path).map_err(|e| {
      GateError::external(
        "compliance scan",
        format!("could not read report from {}: {}", path.display(), e),
      )
    })?;
    Self::from_json(&content)
  }

  /// Number of components the scan covered
  pub fn total_components(&self) -> usize {
    self.components.len()
  }

  /// Derive severity counts from the violation list
  pub fn summarize(&self) -> SeveritySummary {
    let count = |level: ThreatLevel| self.violations.iter().filter(|v| v.threat_level == level).count();
    SeveritySummary {
      critical: count(ThreatLevel::Critical),
      severe: count(ThreatLevel::Severe),
      moderate: count(ThreatLevel::Moderate),
    }
  }
}

/// Violation counts by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeveritySummary {
  pub critical: usize,
  pub severe: usize,
  pub moderate: usize,
}

impl std::fmt::Display for SeveritySummary {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{} critical, {} severe, {} moderate",
      self.critical, self.severe, self.moderate
    )
  }
}

/// Policy verdict for a compliance report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyVerdict {
  Pass,
  /// Moderate findings only; recorded, never blocking
  Warn,
  Fail,
}

impl std::fmt::Display for PolicyVerdict {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      PolicyVerdict::Pass => write!(f, "pass"),
      PolicyVerdict::Warn => write!(f, "warn"),
      PolicyVerdict::Fail => write!(f, "fail"),
    }
  }
}

/// Evaluation result: verdict plus the counts that produced it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyEvaluation {
  pub verdict: PolicyVerdict,
  pub summary: SeveritySummary,
}

/// Evaluate a compliance report.
///
/// Decision rule, in order: any critical or severe violation fails; otherwise
/// any moderate violation warns; otherwise the report passes.
pub fn evaluate(report: &ComplianceReport) -> PolicyEvaluation {
  let summary = report.summarize();

  let verdict = if summary.critical > 0 || summary.severe > 0 {
    PolicyVerdict::Fail
  } else if summary.moderate > 0 {
    PolicyVerdict::Warn
  } else {
    PolicyVerdict::Pass
  };

  PolicyEvaluation { verdict, summary }
}
