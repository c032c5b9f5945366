//! Decide command: drive the orchestrator end to end
//!
//! Translates the final decision for the outer pipeline: `Done` exits 0,
//! `Aborted` prints the reason and exits non-zero according to the abort
//! class.

use crate::compliance::ComplianceReport;
use crate::core::config::GateConfig;
use crate::core::context::ReleaseContext;
use crate::core::error::{ExitCode, GateError, GateResult};
use crate::engine::{AbortKind, Decision, DecisionRecord, GatingInputs, ReleaseOrchestrator};
use crate::gate::{FileGateSource, FileTaskSource};
use crate::poll::WallClock;
use std::env;
use std::path::PathBuf;

/// Inputs for the decide command, straight from the CLI flags
pub struct DecideOptions {
  pub trigger: Option<String>,
  pub branch: String,
  pub version_file: Option<PathBuf>,
  pub descriptor: Option<PathBuf>,
  pub task_id: Option<String>,
  pub task_status_file: Option<PathBuf>,
  pub project_key: String,
  pub gate_status_file: PathBuf,
  pub report: PathBuf,
  pub apply: bool,
  pub json: bool,
}

/// Run the full release decision
pub fn run_decide(opts: DecideOptions) -> GateResult<()> {
  let workspace_root = env::current_dir()?;
  let config = GateConfig::load(&workspace_root)?;

  let mut ctx = ReleaseContext::new(workspace_root, opts.branch, opts.trigger);
  ctx.version_file = opts.version_file;
  ctx.descriptor = opts.descriptor;

  let report = ComplianceReport::load(&opts.report)?;

  // Analysis wait runs only when the pipeline submitted a task
  let mut task_source = match (&opts.task_id, &opts.task_status_file) {
    (Some(_), Some(path)) => Some(FileTaskSource::new(path.clone())),
    (None, None) => None,
    _ => {
      return Err(GateError::with_help(
        "Analysis wait needs both a task id and a status file",
        "Pass --task-id together with --task-status-file, or neither",
      ));
    }
  };

  let mut gate_source = FileGateSource::new(opts.gate_status_file.clone());

  let analysis = match (&mut task_source, &opts.task_id) {
    (Some(source), Some(task_id)) => Some((source as &mut dyn crate::gate::TaskStatusSource, task_id.as_str())),
    _ => None,
  };

  let decision = ReleaseOrchestrator::new(&config, &WallClock)
    .apply_version(opts.apply)
    .run(&ctx, GatingInputs {
      analysis,
      gate: (&mut gate_source, &opts.project_key),
      report: &report,
    });

  let record = DecisionRecord::new(ctx.branch.clone(), ctx.trigger.clone(), decision);

  if opts.json {
    println!("{}", record.to_json()?);
  } else {
    print_decision(&record, opts.apply);
  }

  match &record.decision {
    Decision::Done { .. } => Ok(()),
    Decision::Aborted { kind, .. } => {
      let code = match kind {
        AbortKind::Policy => ExitCode::Policy,
        AbortKind::External | AbortKind::Timeout => ExitCode::System,
      };
      std::process::exit(code.as_i32());
    }
  }
}

fn print_decision(record: &DecisionRecord, applied: bool) {
  match &record.decision {
    Decision::Done {
      bump,
      new_version,
      version,
      target,
      warnings,
    } => {
      println!("✅ Release decision {} for branch '{}'", record.id, record.branch);
      println!();
      match new_version {
        Some(v) => println!("  Version:    {} ({} bump)", v, bump),
        None => println!("  Version:    {} (no bump)", version),
      }
      println!("  Repository: {}", target.repository);
      println!("  Path:       {}", target.path);
      if !applied && new_version.is_some() {
        println!();
        println!("🔍 Dry-run mode (version sources not updated, use --apply)");
      }
      for warning in warnings {
        println!("⚠️  {}", warning);
      }
    }
    Decision::Aborted { stage, reason, .. } => {
      println!("❌ Release aborted during {} ({})", stage.describe(), record.id);
      println!();
      println!("  Reason: {}", reason);
    }
  }
}
