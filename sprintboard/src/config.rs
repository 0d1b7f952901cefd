//! Engine configuration loaded with figment
//!
//! Precedence, lowest to highest:
//! 1. built-in defaults
//! 2. `sprintboard.toml`, `sprintboard.yaml`, `sprintboard.json` in the store directory
//! 3. environment variables prefixed `SPRINTBOARD_`

use crate::error::Result;
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// How `resequence issues` treats caller-supplied sequence numbers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResequencePolicy {
    /// Apply submitted sequences verbatim; duplicates are accepted
    Trust,
    /// Reject duplicate sequences in the submission or collisions with untouched issues
    #[default]
    Validate,
}

/// Settings for the engine and the CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SprintboardConfig {
    pub resequence_policy: ResequencePolicy,
    /// Whether `revert sprint` may reopen a completed sprint
    pub allow_reopen_completed: bool,
    /// Prefix for sprints auto-named on completion, e.g. "Sprint 4"
    pub sprint_name_prefix: String,
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for SprintboardConfig {
    fn default() -> Self {
        Self {
            resequence_policy: ResequencePolicy::Validate,
            allow_reopen_completed: true,
            sprint_name_prefix: "Sprint".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

/// Environment variable prefix
pub const ENV_PREFIX: &str = "SPRINTBOARD_";

/// Config file stem looked up in the store directory
pub const CONFIG_FILE_STEM: &str = "sprintboard";

impl SprintboardConfig {
    /// Load from defaults, the config files in `dir` (if given), then the environment
    pub fn load(dir: Option<&Path>) -> Result<Self> {
        let config: Self = Self::figment(dir).extract()?;
        debug!(?config, "loaded configuration");
        Ok(config)
    }

    /// Build the layered figment without extracting
    pub fn figment(dir: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        if let Some(dir) = dir {
            let toml = dir.join(format!("{}.toml", CONFIG_FILE_STEM));
            let yaml = dir.join(format!("{}.yaml", CONFIG_FILE_STEM));
            let json = dir.join(format!("{}.json", CONFIG_FILE_STEM));
            debug!(dir = %dir.display(), "looking for config files");
            figment = figment
                .merge(Toml::file(toml))
                .merge(Yaml::file(yaml))
                .merge(Json::file(json));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).map(|key| key.as_str().to_lowercase().into()))
    }
}
