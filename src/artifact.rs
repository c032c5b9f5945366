//! Branch-conditional artifact routing
//!
//! A pure, total function of (branch, base name, version, file name): identical
//! inputs always produce identical targets, which is what makes re-publish and
//! retry idempotent upstream. Nothing here is persisted; the artifact store
//! owns that.

use semver::Version;
use serde::{Deserialize, Serialize};

/// Branch that routes to the release repository
const RELEASE_BRANCH: &str = "master";

/// Computed publish destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactTarget {
  /// Target repository ({base}-release or {base}-snapshot)
  pub repository: String,

  /// Path inside the repository, ending in the artifact file name
  pub path: String,
}

/// Route an artifact to its branch-conditional destination.
///
/// `master` publishes `{base}/{version}/{file}` into `{base}-release`; every
/// other branch publishes `{base}/{version}-SNAPSHOT/{file}` into
/// `{base}-snapshot`.
pub fn route(branch: &str, base_name: &str, version: &Version, file_name: &str) -> ArtifactTarget {
  if branch == RELEASE_BRANCH {
    ArtifactTarget {
      repository: format!("{}-release", base_name),
      path: format!("{}/{}/{}", base_name, version, file_name),
    }
  } else {
    ArtifactTarget {
      repository: format!("{}-snapshot", base_name),
      path: format!("{}/{}-SNAPSHOT/{}", base_name, version, file_name),
    }
  }
}
