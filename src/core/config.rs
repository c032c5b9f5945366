use crate::core::error::{ConfigError, GateError, GateResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for release-gate
/// Searched in order: gate.toml, .gate.toml, .config/gate.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
  pub artifact: ArtifactConfig,
  #[serde(default)]
  pub gate: QualityGateConfig,
  #[serde(default)]
  pub poll: PollConfig,
}

/// Artifact naming and routing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactConfig {
  /// Base name of the artifact repository pair ({base_name}-release / {base_name}-snapshot)
  pub base_name: String,

  /// Artifact file name placed at the end of the target path
  /// (default: "{base_name}-{version}.tar.gz")
  #[serde(default)]
  pub file_name: Option<String>,
}

impl ArtifactConfig {
  /// Resolve the artifact file name for a given version
  pub fn file_name_for(&self, version: &semver::Version) -> String {
    self
      .file_name
      .clone()
      .unwrap_or_else(|| format!("{}-{}.tar.gz", self.base_name, version))
  }
}

/// Quality gate policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityGateConfig {
  /// Treat a Warn gate status as failing (strict default)
  #[serde(default = "default_warn_fails_gate")]
  pub warn_fails_gate: bool,
}

fn default_warn_fails_gate() -> bool {
  true
}

impl Default for QualityGateConfig {
  fn default() -> Self {
    Self {
      warn_fails_gate: default_warn_fails_gate(),
    }
  }
}

/// Polling policies for the two remote waits
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PollConfig {
  /// Policy for the analysis task wait
  #[serde(default)]
  pub analysis: RetryPolicy,

  /// Policy for the quality gate wait
  #[serde(default)]
  pub gate: RetryPolicy,
}

/// Bounded retry policy: fixed interval, fixed attempt budget
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RetryPolicy {
  /// Seconds to sleep between attempts
  #[serde(default = "default_interval_secs")]
  pub interval_secs: u64,

  /// Maximum number of fetch attempts before timing out
  #[serde(default = "default_max_attempts")]
  pub max_attempts: u32,
}

fn default_interval_secs() -> u64 {
  10
}

fn default_max_attempts() -> u32 {
  30
}

impl Default for RetryPolicy {
  fn default() -> Self {
    Self {
      interval_secs: default_interval_secs(),
      max_attempts: default_max_attempts(),
    }
  }
}

impl RetryPolicy {
  /// Upper bound on the total wait this policy allows, in seconds
  pub fn ceiling_secs(&self) -> u64 {
    self.interval_secs * self.max_attempts as u64
  }

  /// Validate the policy values
  pub fn validate(&self) -> GateResult<()> {
    if self.max_attempts == 0 {
      return Err(GateError::with_help(
        "Retry policy max_attempts must be at least 1",
        "Set max_attempts >= 1 in gate.toml under [poll.analysis] or [poll.gate]",
      ));
    }
    Ok(())
  }
}

impl GateConfig {
  /// Find config file in search order: gate.toml, .gate.toml, .config/gate.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("gate.toml"),
      path.join(".gate.toml"),
      path.join(".config").join("gate.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config from gate.toml (searches multiple locations)
  pub fn load(path: &Path) -> GateResult<Self> {
    let config_path = Self::find_config_path(path).ok_or_else(|| {
      GateError::Config(ConfigError::NotFound {
        workspace_root: path.to_path_buf(),
      })
    })?;

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: GateConfig = toml_edit::de::from_str(&content)
      .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

    config.validate()?;

    Ok(config)
  }

  /// Validate the full configuration
  pub fn validate(&self) -> GateResult<()> {
    if self.artifact.base_name.is_empty() {
      return Err(GateError::Config(ConfigError::MissingField {
        field: "artifact.base_name".to_string(),
      }));
    }
    self.poll.analysis.validate()?;
    self.poll.gate.validate()?;
    Ok(())
  }
}
