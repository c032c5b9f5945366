//! Version sources: single-line version file and TOML build descriptor
//!
//! Both sources are optional and independently updatable. Reads prefer the
//! version file over the descriptor. Writes are atomic per destination (temp
//! file in the same directory, then rename): the destination is either fully
//! replaced or left unchanged.

use crate::core::error::{GateError, GateResult, ResultExt};
use semver::Version;
use std::fs;
use std::path::{Path, PathBuf};

/// The version sources configured for a run
#[derive(Debug, Clone, Default)]
pub struct VersionSource {
  /// Single-line semver file (e.g. version.txt)
  pub version_file: Option<PathBuf>,

  /// TOML build descriptor with a `version = "X.Y.Z"` assignment,
  /// either at the document root or under `[package]`
  pub descriptor: Option<PathBuf>,
}

impl VersionSource {
  /// Read the current version, preferring the version file.
  ///
  /// Returns `Ok(None)` when no source is configured or no source file
  /// exists yet. A file that exists but does not parse is a recoverable
  /// validation error: the caller skips the bump rather than guessing.
  pub fn read_current(&self) -> GateResult<Option<Version>> {
    if let Some(path) = &self.version_file
      && path.exists()
    {
      return read_version_file(path).map(Some);
    }

    if let Some(path) = &self.descriptor
      && path.exists()
    {
      return read_descriptor_version(path).map(Some);
    }

    Ok(None)
  }

  /// Write the new version to every configured destination, atomically per
  /// destination. A missing version file is created; a missing descriptor
  /// assignment is reported as a warning string instead of an error.
  pub fn write_version(&self, version: &Version) -> GateResult<Vec<String>> {
    let mut warnings = Vec::new();

    if let Some(path) = &self.version_file {
      atomic_write(path, &format!("{}\n", version))
        .with_context(|| format!("Failed to update version file {}", path.display()))?;
    }

    if let Some(path) = &self.descriptor {
      if path.exists() {
        update_descriptor_version(path, version)?;
      } else {
        warnings.push(format!(
          "Descriptor {} does not exist; version assignment not updated",
          path.display()
        ));
      }
    }

    Ok(warnings)
  }
}

/// Read a single-line semver file
fn read_version_file(path: &Path) -> GateResult<Version> {
  let content =
    fs::read_to_string(path).with_context(|| format!("Failed to read version file {}", path.display()))?;
  let line = content.trim();
  Version::parse(line)
    .map_err(|e| GateError::validation("version string", format!("{} in {}: {}", line, path.display(), e)))
}

/// Read the `version = "X.Y.Z"` assignment from a TOML descriptor
fn read_descriptor_version(path: &Path) -> GateResult<Version> {
  let content =
    fs::read_to_string(path).with_context(|| format!("Failed to read descriptor {}", path.display()))?;
  let doc: toml_edit::DocumentMut = content
    .parse()
    .map_err(|e| GateError::validation("descriptor", format!("{}: {}", path.display(), e)))?;

  let raw = descriptor_version_str(&doc).ok_or_else(|| {
    GateError::validation(
      "descriptor",
      format!("No version assignment found in {}", path.display()),
    )
  })?;

  Version::parse(raw)
    .map_err(|e| GateError::validation("version string", format!("{} in {}: {}", raw, path.display(), e)))
}

/// Locate the version assignment: document root first, then `[package]`
fn descriptor_version_str(doc: &toml_edit::DocumentMut) -> Option<&str> {
  if let Some(v) = doc.get("version").and_then(|i| i.as_str()) {
    return Some(v);
  }
  doc
    .get("package")
    .and_then(|p| p.as_table())
    .and_then(|t| t.get("version"))
    .and_then(|i| i.as_str())
}

/// Replace the version assignment in place, preserving the rest of the file
fn update_descriptor_version(path: &Path, version: &Version) -> GateResult<()> {
  let content =
    fs::read_to_string(path).with_context(|| format!("Failed to read descriptor {}", path.display()))?;
  let mut doc: toml_edit::DocumentMut = content
    .parse()
    .map_err(|e| GateError::validation("descriptor", format!("{}: {}", path.display(), e)))?;

  if doc.get("version").is_some() {
    doc["version"] = toml_edit::value(version.to_string());
  } else if let Some(package) = doc.get_mut("package").and_then(|p| p.as_table_mut()) {
    package["version"] = toml_edit::value(version.to_string());
  } else {
    return Err(GateError::validation(
      "descriptor",
      format!("No version assignment to replace in {}", path.display()),
    ));
  }

  atomic_write(path, &doc.to_string()).with_context(|| format!("Failed to update descriptor {}", path.display()))
}

/// Write via a sibling temp file and rename so the destination is never
/// left half-written
fn atomic_write(path: &Path, content: &str) -> GateResult<()> {
  let parent = path.parent().unwrap_or_else(|| Path::new("."));
  let tmp = parent.join(format!(
    ".{}.tmp",
    path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default()
  ));

  fs::write(&tmp, content)?;
  if let Err(e) = fs::rename(&tmp, path) {
    let _ = fs::remove_file(&tmp);
    return Err(e.into());
  }
  Ok(())
}
