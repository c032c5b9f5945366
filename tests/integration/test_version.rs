//! Integration tests for the version command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_version_dry_run_leaves_sources_untouched() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_file("version.txt", "1.2.3\n")?;

  let output = run_release_gate(&ws.path, &[
    "version",
    "--trigger",
    "feature-search",
    "--version-file",
    "version.txt",
  ])?;

  let stdout = stdout_str(&output);
  assert!(stdout.contains("1.2.3"));
  assert!(stdout.contains("1.3.0"));
  assert!(stdout.contains("Dry-run"));

  // The file keeps its original content
  assert_eq!(ws.read_file("version.txt")?.trim(), "1.2.3");
  Ok(())
}

#[test]
fn test_version_apply_updates_version_file() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_file("version.txt", "1.2.3\n")?;

  run_release_gate(&ws.path, &[
    "version",
    "--trigger",
    "breaking-api-rework",
    "--version-file",
    "version.txt",
    "--apply",
  ])?;

  assert_eq!(ws.read_file("version.txt")?.trim(), "2.0.0");
  Ok(())
}

#[test]
fn test_version_apply_updates_descriptor() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_file(
    "build.toml",
    "[package]\nname = \"sample-lib\"\nversion = \"0.4.1\"\n",
  )?;

  run_release_gate(&ws.path, &[
    "version",
    "--trigger",
    "fix-null-deref",
    "--descriptor",
    "build.toml",
    "--apply",
  ])?;

  let descriptor = ws.read_file("build.toml")?;
  assert!(descriptor.contains("version = \"0.4.2\""));
  // Lossless edit keeps the rest of the document intact
  assert!(descriptor.contains("name = \"sample-lib\""));
  Ok(())
}

#[test]
fn test_version_unrecognized_trigger_is_no_bump() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_file("version.txt", "1.2.3\n")?;

  let output = run_release_gate(&ws.path, &[
    "version",
    "--trigger",
    "hot fix-z",
    "--version-file",
    "version.txt",
    "--apply",
  ])?;

  let stdout = stdout_str(&output);
  assert!(stdout.contains("No version bump"));
  assert_eq!(ws.read_file("version.txt")?.trim(), "1.2.3");
  Ok(())
}

#[test]
fn test_version_missing_sources_use_baseline() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_release_gate(&ws.path, &["version", "--trigger", "feature-init", "--json"])?;

  let resolution: serde_json::Value = serde_json::from_str(&stdout_str(&output))?;
  assert_eq!(resolution["bump"], "minor");
  assert_eq!(resolution["current"], "0.1.0");
  assert_eq!(resolution["new_version"], "0.2.0");
  Ok(())
}

#[test]
fn test_version_json_output() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_file("version.txt", "0.9.9\n")?;

  let output = run_release_gate(&ws.path, &[
    "version",
    "--trigger",
    "FIX-case-insensitive",
    "--version-file",
    "version.txt",
    "--json",
  ])?;

  let resolution: serde_json::Value = serde_json::from_str(&stdout_str(&output))?;
  assert_eq!(resolution["bump"], "patch");
  assert_eq!(resolution["new_version"], "0.9.10");
  Ok(())
}
