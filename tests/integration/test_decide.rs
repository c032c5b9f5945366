//! Integration tests for the decide command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_decide_master_release_happy_path() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_file("version.txt", "1.2.3\n")?;
  ws.write_file("task-status.json", r#"{"status": "success"}"#)?;
  ws.write_gate_ok()?;
  ws.write_clean_report()?;

  let output = run_release_gate(&ws.path, &[
    "decide",
    "--branch",
    "master",
    "--trigger",
    "feature-search",
    "--version-file",
    "version.txt",
    "--task-id",
    "task-42",
    "--task-status-file",
    "task-status.json",
    "--project-key",
    "sample-lib",
    "--gate-status-file",
    "gate-status.json",
    "--report",
    "report.json",
    "--json",
  ])?;

  let record: serde_json::Value = serde_json::from_str(&stdout_str(&output))?;
  let decision = &record["decision"];
  assert_eq!(decision["outcome"], "done");
  assert_eq!(decision["bump"], "minor");
  assert_eq!(decision["new_version"], "1.3.0");
  assert_eq!(decision["target"]["repository"], "sample-lib-release");
  assert_eq!(decision["target"]["path"], "sample-lib/1.3.0/sample-lib-1.3.0.tar.gz");

  // Dry-run by default
  assert_eq!(ws.read_file("version.txt")?.trim(), "1.2.3");
  Ok(())
}

#[test]
fn test_decide_apply_writes_version() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_file("version.txt", "0.5.0\n")?;
  ws.write_gate_ok()?;
  ws.write_clean_report()?;

  run_release_gate(&ws.path, &[
    "decide",
    "--branch",
    "master",
    "--trigger",
    "fix-off-by-one",
    "--version-file",
    "version.txt",
    "--project-key",
    "sample-lib",
    "--gate-status-file",
    "gate-status.json",
    "--report",
    "report.json",
    "--apply",
  ])?;

  assert_eq!(ws.read_file("version.txt")?.trim(), "0.5.1");
  Ok(())
}

#[test]
fn test_decide_non_master_routes_to_snapshot() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_file("version.txt", "1.0.0\n")?;
  ws.write_gate_ok()?;
  ws.write_clean_report()?;

  let output = run_release_gate(&ws.path, &[
    "decide",
    "--branch",
    "develop",
    "--version-file",
    "version.txt",
    "--project-key",
    "sample-lib",
    "--gate-status-file",
    "gate-status.json",
    "--report",
    "report.json",
    "--json",
  ])?;

  let record: serde_json::Value = serde_json::from_str(&stdout_str(&output))?;
  let decision = &record["decision"];
  assert_eq!(decision["outcome"], "done");
  // No trigger means no bump and routing under the current version
  assert_eq!(decision["bump"], "none");
  assert_eq!(decision["new_version"], serde_json::Value::Null);
  assert_eq!(decision["target"]["repository"], "sample-lib-snapshot");
  assert_eq!(decision["target"]["path"], "sample-lib/1.0.0-SNAPSHOT/sample-lib-1.0.0.tar.gz");
  Ok(())
}

#[test]
fn test_decide_failed_analysis_aborts_with_policy_exit_code() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_file("version.txt", "1.0.0\n")?;
  ws.write_file("task-status.json", r#"{"status": "failed"}"#)?;
  ws.write_gate_ok()?;
  ws.write_clean_report()?;

  let output = run_release_gate_raw(&ws.path, &[
    "decide",
    "--branch",
    "master",
    "--version-file",
    "version.txt",
    "--task-id",
    "task-42",
    "--task-status-file",
    "task-status.json",
    "--project-key",
    "sample-lib",
    "--gate-status-file",
    "gate-status.json",
    "--report",
    "report.json",
    "--json",
  ])?;

  assert_eq!(output.status.code(), Some(3));
  let record: serde_json::Value = serde_json::from_str(&stdout_str(&output))?;
  let decision = &record["decision"];
  assert_eq!(decision["outcome"], "aborted");
  assert_eq!(decision["stage"], "analysis_wait");
  assert_eq!(decision["kind"], "policy");
  Ok(())
}

#[test]
fn test_decide_pending_analysis_times_out_with_system_exit_code() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_file("version.txt", "1.0.0\n")?;
  ws.write_file("task-status.json", r#"{"status": "pending"}"#)?;
  ws.write_gate_ok()?;
  ws.write_clean_report()?;

  let output = run_release_gate_raw(&ws.path, &[
    "decide",
    "--branch",
    "master",
    "--version-file",
    "version.txt",
    "--task-id",
    "task-42",
    "--task-status-file",
    "task-status.json",
    "--project-key",
    "sample-lib",
    "--gate-status-file",
    "gate-status.json",
    "--report",
    "report.json",
    "--json",
  ])?;

  assert_eq!(output.status.code(), Some(2));
  let record: serde_json::Value = serde_json::from_str(&stdout_str(&output))?;
  let decision = &record["decision"];
  assert_eq!(decision["outcome"], "aborted");
  assert_eq!(decision["kind"], "timeout");
  Ok(())
}

#[test]
fn test_decide_gate_error_aborts() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_file("version.txt", "1.0.0\n")?;
  ws.write_file("gate-status.json", r#"{"status": "error", "conditions": []}"#)?;
  ws.write_clean_report()?;

  let output = run_release_gate_raw(&ws.path, &[
    "decide",
    "--branch",
    "master",
    "--version-file",
    "version.txt",
    "--project-key",
    "sample-lib",
    "--gate-status-file",
    "gate-status.json",
    "--report",
    "report.json",
    "--json",
  ])?;

  assert_eq!(output.status.code(), Some(3));
  let record: serde_json::Value = serde_json::from_str(&stdout_str(&output))?;
  assert_eq!(record["decision"]["stage"], "gate_resolve");
  Ok(())
}

#[test]
fn test_decide_compliance_failure_aborts() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_file("version.txt", "1.0.0\n")?;
  ws.write_gate_ok()?;
  ws.write_file(
    "report.json",
    r#"{"policyAction": "failure", "components": [], "violations": [{"threatLevel": "severe"}]}"#,
  )?;

  let output = run_release_gate_raw(&ws.path, &[
    "decide",
    "--branch",
    "master",
    "--version-file",
    "version.txt",
    "--project-key",
    "sample-lib",
    "--gate-status-file",
    "gate-status.json",
    "--report",
    "report.json",
    "--json",
  ])?;

  assert_eq!(output.status.code(), Some(3));
  let record: serde_json::Value = serde_json::from_str(&stdout_str(&output))?;
  assert_eq!(record["decision"]["stage"], "policy_evaluate");
  assert_eq!(record["decision"]["kind"], "policy");
  Ok(())
}

#[test]
fn test_decide_moderate_violations_carried_as_warning() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_file("version.txt", "1.0.0\n")?;
  ws.write_gate_ok()?;
  ws.write_file(
    "report.json",
    r#"{"policyAction": "evaluate", "components": [], "violations": [{"threatLevel": "moderate"}]}"#,
  )?;

  let output = run_release_gate(&ws.path, &[
    "decide",
    "--branch",
    "master",
    "--version-file",
    "version.txt",
    "--project-key",
    "sample-lib",
    "--gate-status-file",
    "gate-status.json",
    "--report",
    "report.json",
    "--json",
  ])?;

  let record: serde_json::Value = serde_json::from_str(&stdout_str(&output))?;
  let decision = &record["decision"];
  assert_eq!(decision["outcome"], "done");
  let warnings = decision["warnings"].as_array().unwrap();
  assert!(warnings.iter().any(|w| w.as_str().unwrap().contains("moderate")));
  Ok(())
}

#[test]
fn test_decide_missing_config_is_user_error() -> Result<()> {
  let ws = TestWorkspace::new()?;
  std::fs::remove_file(ws.path.join("gate.toml"))?;
  ws.write_gate_ok()?;
  ws.write_clean_report()?;

  let output = run_release_gate_raw(&ws.path, &[
    "decide",
    "--branch",
    "master",
    "--project-key",
    "sample-lib",
    "--gate-status-file",
    "gate-status.json",
    "--report",
    "report.json",
  ])?;

  assert_eq!(output.status.code(), Some(1));
  Ok(())
}

#[test]
fn test_decide_identical_inputs_share_a_decision_id() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_file("version.txt", "1.0.0\n")?;
  ws.write_gate_ok()?;
  ws.write_clean_report()?;

  let args = [
    "decide",
    "--branch",
    "master",
    "--trigger",
    "feature-cache",
    "--version-file",
    "version.txt",
    "--project-key",
    "sample-lib",
    "--gate-status-file",
    "gate-status.json",
    "--report",
    "report.json",
    "--json",
  ];

  let first: serde_json::Value = serde_json::from_str(&stdout_str(&run_release_gate(&ws.path, &args)?))?;
  let second: serde_json::Value = serde_json::from_str(&stdout_str(&run_release_gate(&ws.path, &args)?))?;
  assert_eq!(first["id"], second["id"]);
  Ok(())
}
