//! Version command: run the resolver without gating or routing

use crate::core::error::GateResult;
use crate::version::{BumpType, VersionSource, resolve};
use std::path::PathBuf;

/// Plan a version bump from a trigger and the configured sources
pub fn run_version(
  trigger: Option<String>,
  version_file: Option<PathBuf>,
  descriptor: Option<PathBuf>,
  apply: bool,
  json: bool,
) -> GateResult<()> {
  let source = VersionSource {
    version_file,
    descriptor,
  };

  let current = match source.read_current() {
    Ok(v) => v,
    Err(err) if err.is_recoverable() => {
      eprintln!("⚠️  {}", err);
      eprintln!("   No bump will be performed");
      None
    }
    Err(err) => return Err(err),
  };

  let trigger_text = trigger.as_deref().filter(|t| !t.trim().is_empty());
  let resolution = resolve(trigger_text, current.as_ref());

  if apply && let Some(new_version) = &resolution.new_version {
    let warnings = source.write_version(new_version)?;
    for warning in warnings {
      eprintln!("⚠️  {}", warning);
    }
  }

  if json {
    println!("{}", serde_json::to_string_pretty(&resolution)?);
    return Ok(());
  }

  match resolution.bump {
    BumpType::None => {
      println!("ℹ️  No version bump for trigger {:?}", trigger.as_deref().unwrap_or(""));
      println!("   Current: {}", resolution.current);
    }
    bump => {
      let new_version = resolution
        .new_version
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_default();
      println!("📦 Version bump: {} → {} ({})", resolution.current, new_version, bump);
      if !apply {
        println!();
        println!("🔍 Dry-run mode (use --apply to update version sources)");
      }
    }
  }

  Ok(())
}
