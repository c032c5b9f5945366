//! Trigger classification and version bump arithmetic

use semver::Version;
use serde::{Deserialize, Serialize};

/// Baseline used when no current version can be determined
fn baseline() -> Version {
  Version::new(0, 1, 0)
}

/// Version bump type derived from the change trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpType {
  /// Major version bump (breaking changes)
  Major,
  /// Minor version bump (new features)
  Minor,
  /// Patch version bump (bug fixes)
  Patch,
  /// No bump needed (no relevant trigger)
  None,
}

impl BumpType {
  /// Classify a trigger string, checked in fixed priority order.
  ///
  /// Prefix matching is case-insensitive: `breaking-` → Major,
  /// `feature-` → Minor, `fix-` → Patch, anything else → None.
  pub fn from_trigger(trigger: Option<&str>) -> Self {
    let Some(text) = trigger else {
      return BumpType::None;
    };
    let lower = text.trim().to_lowercase();

    if lower.starts_with("breaking-") {
      BumpType::Major
    } else if lower.starts_with("feature-") {
      BumpType::Minor
    } else if lower.starts_with("fix-") {
      BumpType::Patch
    } else {
      BumpType::None
    }
  }

  /// Apply bump to a semver version
  pub fn apply(&self, version: &Version) -> Version {
    match self {
      BumpType::Major => Version::new(version.major + 1, 0, 0),
      BumpType::Minor => Version::new(version.major, version.minor + 1, 0),
      BumpType::Patch => Version::new(version.major, version.minor, version.patch + 1),
      BumpType::None => version.clone(),
    }
  }
}

impl std::fmt::Display for BumpType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      BumpType::Major => write!(f, "major"),
      BumpType::Minor => write!(f, "minor"),
      BumpType::Patch => write!(f, "patch"),
      BumpType::None => write!(f, "none"),
    }
  }
}

/// Outcome of resolving a trigger against the current version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resolution {
  /// Classified bump type
  pub bump: BumpType,

  /// Version the bump was applied to (baseline 0.1.0 when no source existed)
  pub current: Version,

  /// New version, present only when a bump applies
  pub new_version: Option<Version>,
}

/// Resolve a trigger and current version into a bump decision.
///
/// Pure function: `current = None` means no version source was available and
/// the 0.1.0 baseline is used before applying the bump.
pub fn resolve(trigger: Option<&str>, current: Option<&Version>) -> Resolution {
  let bump = BumpType::from_trigger(trigger);
  let current = current.cloned().unwrap_or_else(baseline);

  let new_version = match bump {
    BumpType::None => None,
    _ => Some(bump.apply(&current)),
  };

  Resolution {
    bump,
    current,
    new_version,
  }
}
