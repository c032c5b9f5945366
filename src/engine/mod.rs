//! Release orchestration: sequence the stages, fail fast, report one decision
//!
//! # Stage order
//!
//! ```text
//! Init → VersionResolved → (optional) AnalysisAwaited → GateResolved
//!      → PolicyEvaluated → Routed → Done
//! ```
//!
//! Any fatal outcome moves the run straight to `Aborted(reason)` and no
//! further stage executes. Warn-level findings are recorded and carried into
//! the final decision instead of aborting. The orchestrator holds no state
//! across runs; it is built, driven once, and discarded.

pub mod record;

pub use record::DecisionRecord;

use crate::artifact::{self, ArtifactTarget};
use crate::compliance::{self, ComplianceReport, PolicyVerdict};
use crate::core::config::GateConfig;
use crate::core::context::ReleaseContext;
use crate::core::error::GateError;
use crate::gate::{AnalysisOutcome, GateStatus, GateStatusSource, TaskStatusSource, await_analysis, resolve_gate};
use crate::poll::Clock;
use crate::version::{BumpType, Resolution, VersionSource, resolve};
use semver::Version;
use serde::{Deserialize, Serialize};

/// Pipeline stage a decision can abort in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
  VersionResolve,
  AnalysisWait,
  GateResolve,
  PolicyEvaluate,
  Route,
}

impl Stage {
  /// Human-readable stage name used in abort reasons
  pub fn describe(&self) -> &'static str {
    match self {
      Stage::VersionResolve => "version resolution",
      Stage::AnalysisWait => "analysis wait",
      Stage::GateResolve => "quality gate",
      Stage::PolicyEvaluate => "policy evaluation",
      Stage::Route => "artifact routing",
    }
  }
}

/// Classification of an abort, so the caller can map it to an exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbortKind {
  /// Remote service failed or answered garbage
  External,
  /// Polling budget exhausted
  Timeout,
  /// Gate or compliance policy said no
  Policy,
}

/// Final decision handed back to the calling pipeline: either a complete
/// release decision or a single unambiguous abort. No partial states.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum Decision {
  Done {
    bump: BumpType,
    /// New version, absent when no bump applied
    new_version: Option<Version>,
    /// Version the artifact is routed under (new or unchanged current)
    version: Version,
    target: ArtifactTarget,
    warnings: Vec<String>,
  },
  Aborted {
    stage: Stage,
    kind: AbortKind,
    reason: String,
  },
}

impl Decision {
  /// Whether the pipeline may proceed to publish
  pub fn is_done(&self) -> bool {
    matches!(self, Decision::Done { .. })
  }

  fn aborted(stage: Stage, kind: AbortKind, reason: impl Into<String>) -> Self {
    Decision::Aborted {
      stage,
      kind,
      reason: reason.into(),
    }
  }

  /// Map a fatal stage error into an abort decision
  fn from_error(stage: Stage, err: GateError) -> Self {
    let kind = match &err {
      GateError::Timeout { .. } => AbortKind::Timeout,
      GateError::PolicyViolation { .. } => AbortKind::Policy,
      _ => AbortKind::External,
    };
    Decision::aborted(stage, kind, format!("{} failed: {}", stage.describe(), err))
  }
}

/// Gating inputs: who to poll and what to evaluate.
///
/// The analysis wait is optional; gate resolution and compliance evaluation
/// always run.
pub struct GatingInputs<'a> {
  /// Analysis task to await, if the pipeline submitted one
  pub analysis: Option<(&'a mut dyn TaskStatusSource, &'a str)>,

  /// Quality gate to resolve
  pub gate: (&'a mut dyn GateStatusSource, &'a str),

  /// Compliance report to evaluate
  pub report: &'a ComplianceReport,
}

/// Release decision orchestrator, driven exactly once per pipeline invocation
pub struct ReleaseOrchestrator<'a> {
  config: &'a GateConfig,
  clock: &'a dyn Clock,
  /// When set, the resolved version is written back to the configured sources
  apply_version: bool,
}

impl<'a> ReleaseOrchestrator<'a> {
  pub fn new(config: &'a GateConfig, clock: &'a dyn Clock) -> Self {
    Self {
      config,
      clock,
      apply_version: false,
    }
  }

  /// Write the resolved version back to its sources (dry-run is the default)
  pub fn apply_version(mut self, apply: bool) -> Self {
    self.apply_version = apply;
    self
  }

  /// Drive the run to `Done` or `Aborted`
  pub fn run(&self, ctx: &ReleaseContext, mut inputs: GatingInputs<'_>) -> Decision {
    let mut warnings = Vec::new();

    // Stage: version resolution. Malformed version sources are recoverable:
    // skip the bump, record the warning, keep going.
    let source = VersionSource {
      version_file: ctx.version_file.clone(),
      descriptor: ctx.descriptor.clone(),
    };
    let (current, parse_failed) = match source.read_current() {
      Ok(v) => (v, false),
      Err(err) if err.is_recoverable() => {
        warnings.push(format!("Version source unusable, no bump performed: {}", err));
        (None, true)
      }
      Err(err) => return Decision::from_error(Stage::VersionResolve, err),
    };

    let resolution = resolve(ctx.trigger_text(), current.as_ref());
    let resolution = if parse_failed {
      // Do not guess a baseline when a source existed but was malformed
      Resolution {
        bump: BumpType::None,
        current: resolution.current,
        new_version: None,
      }
    } else {
      resolution
    };

    if self.apply_version
      && let Some(new_version) = &resolution.new_version
    {
      match source.write_version(new_version) {
        Ok(mut write_warnings) => warnings.append(&mut write_warnings),
        Err(err) => return Decision::from_error(Stage::VersionResolve, err),
      }
    }

    // Stage: analysis wait (optional)
    if let Some((task_source, task_id)) = inputs.analysis.take() {
      let outcome = match await_analysis(task_source, task_id, &self.config.poll.analysis, self.clock) {
        Ok(outcome) => outcome,
        Err(err) => return Decision::from_error(Stage::AnalysisWait, err),
      };
      if !outcome.passed() {
        let kind = match outcome {
          AnalysisOutcome::Timeout => AbortKind::Timeout,
          _ => AbortKind::Policy,
        };
        return Decision::aborted(
          Stage::AnalysisWait,
          kind,
          format!("analysis task '{}' ended with status {}", task_id, outcome),
        );
      }
    }

    // Stage: quality gate
    let (gate_source, project_key) = inputs.gate;
    let gate = match resolve_gate(
      gate_source,
      project_key,
      &self.config.gate,
      &self.config.poll.gate,
      self.clock,
    ) {
      Ok(res) => res,
      Err(err) => return Decision::from_error(Stage::GateResolve, err),
    };
    if !gate.passed {
      let kind = match gate.status {
        GateStatus::Timeout => AbortKind::Timeout,
        _ => AbortKind::Policy,
      };
      return Decision::aborted(
        Stage::GateResolve,
        kind,
        format!("quality gate for '{}' resolved to {}", project_key, gate.status),
      );
    }
    if gate.status == GateStatus::Warn {
      warnings.push(format!("Quality gate for '{}' resolved to warn", project_key));
    }

    // Stage: policy evaluation
    let evaluation = compliance::evaluate(inputs.report);
    match evaluation.verdict {
      PolicyVerdict::Fail => {
        return Decision::aborted(
          Stage::PolicyEvaluate,
          AbortKind::Policy,
          format!("compliance report failed policy: {}", evaluation.summary),
        );
      }
      PolicyVerdict::Warn => {
        warnings.push(format!(
          "Compliance report has moderate findings (non-blocking): {}",
          evaluation.summary
        ));
      }
      PolicyVerdict::Pass => {}
    }

    // Stage: routing (pure, last computation before the final report)
    let version = resolution.new_version.clone().unwrap_or(resolution.current);
    let file_name = self.config.artifact.file_name_for(&version);
    let target = artifact::route(&ctx.branch, &self.config.artifact.base_name, &version, &file_name);

    Decision::Done {
      bump: resolution.bump,
      new_version: resolution.new_version,
      version,
      target,
      warnings,
    }
  }
}
