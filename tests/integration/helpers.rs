//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A test workspace with a gate.toml and room for status documents
pub struct TestWorkspace {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestWorkspace {
  /// Create a workspace with a fast-polling gate.toml
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();

    std::fs::write(
      path.join("gate.toml"),
      r#"[artifact]
base_name = "sample-lib"

[poll.analysis]
interval_secs = 0
max_attempts = 3

[poll.gate]
interval_secs = 0
max_attempts = 3
"#,
    )?;

    Ok(Self { _root: root, path })
  }

  /// Write a file relative to the workspace root
  pub fn write_file(&self, rel: &str, content: &str) -> Result<PathBuf> {
    let file_path = self.path.join(rel);
    if let Some(parent) = file_path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&file_path, content)?;
    Ok(file_path)
  }

  /// Read a file relative to the workspace root
  pub fn read_file(&self, rel: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(rel))?)
  }

  /// Write a passing quality gate status document
  pub fn write_gate_ok(&self) -> Result<PathBuf> {
    self.write_file("gate-status.json", r#"{"status": "ok", "conditions": []}"#)
  }

  /// Write a clean compliance report
  pub fn write_clean_report(&self) -> Result<PathBuf> {
    self.write_file(
      "report.json",
      r#"{"policyAction": "evaluate", "components": [], "violations": []}"#,
    )
  }
}

/// Run release-gate and require success
pub fn run_release_gate(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_release_gate_raw(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "release-gate command failed: release-gate {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

/// Run release-gate and return the output regardless of exit status
pub fn run_release_gate_raw(cwd: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_release-gate");

  Command::new(bin)
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run release-gate")
}

/// Decode stdout as UTF-8
pub fn stdout_str(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).to_string()
}
