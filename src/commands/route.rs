//! Route command: compute the artifact target for a branch and version

use crate::artifact;
use crate::core::error::{GateError, GateResult};

/// Compute and print the publish target
pub fn run_route(branch: String, base_name: String, version: String, file_name: Option<String>, json: bool) -> GateResult<()> {
  let version = semver::Version::parse(&version)
    .map_err(|e| GateError::validation("version string", format!("{}: {}", version, e)))?;

  let file_name = file_name.unwrap_or_else(|| format!("{}-{}.tar.gz", base_name, version));
  let target = artifact::route(&branch, &base_name, &version, &file_name);

  if json {
    println!("{}", serde_json::to_string_pretty(&target)?);
  } else {
    println!("📦 Artifact target for branch '{}'", branch);
    println!();
    println!("  Repository: {}", target.repository);
    println!("  Path:       {}", target.path);
  }

  Ok(())
}
