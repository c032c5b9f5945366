//! Policy command: evaluate a compliance report file

use crate::compliance::{self, ComplianceReport, PolicyVerdict};
use crate::core::error::{ExitCode, GateResult};
use std::path::PathBuf;

/// Evaluate a compliance report and print the verdict.
///
/// A Fail verdict exits with the policy exit code after printing, matching
/// how the decide command treats it.
pub fn run_policy(report_path: PathBuf, json: bool) -> GateResult<()> {
  let report = ComplianceReport::load(&report_path)?;
  let evaluation = compliance::evaluate(&report);

  if json {
    println!("{}", serde_json::to_string_pretty(&evaluation)?);
  } else {
    let icon = match evaluation.verdict {
      PolicyVerdict::Pass => "✅",
      PolicyVerdict::Warn => "⚠️ ",
      PolicyVerdict::Fail => "❌",
    };
    println!("{} Policy verdict: {}", icon, evaluation.verdict);
    println!();
    println!("  Components: {}", report.total_components());
    println!("  Violations: {}", evaluation.summary);
  }

  if evaluation.verdict == PolicyVerdict::Fail {
    std::process::exit(ExitCode::Policy.as_i32());
  }

  Ok(())
}
