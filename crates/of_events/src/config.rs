//! # Query Configuration
//!
//! Knobs for the few query behaviours that rest on assumptions rather than on
//! the data itself.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let config = QueryConfig::load("config/queries.yaml")?;
//! let engine = QueryEngine::with_config(&collection, config);
//! ```
//!
//! `QueryConfig::from_env()` reads the file named by `OF_EVENTS_CONFIG_PATH`
//! and falls back to defaults when the variable is unset or blank.

use std::path::Path;
use std::{env, fs};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::EventField;

pub const CONFIG_PATH_ENV: &str = "OF_EVENTS_CONFIG_PATH";

/// Upper bound for `average_decimals`
pub const MAX_AVERAGE_DECIMALS: u32 = 6;

/// What counts as a successful pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassSuccessPolicy {
    /// Pass with an empty `outcome_name`. Every recorded outcome marks an
    /// incomplete pass, so a pass that lost possession without one still
    /// counts as successful.
    #[default]
    EmptyOutcome,
    /// Every pass, outcome ignored.
    AnyOutcome,
}

/// How to pick among event types sharing the highest count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// First key reaching the maximum count in first-seen order
    #[default]
    FirstSeen,
    /// Smallest name
    Lexicographic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryConfig {
    #[serde(default)]
    pub pass_success: PassSuccessPolicy,
    #[serde(default)]
    pub tie_break: TieBreak,
    /// Decimal places for averages (default: 1)
    #[serde(default = "default_average_decimals")]
    pub average_decimals: u32,
    /// Columns every record must carry at load time
    #[serde(default)]
    pub required_fields: Vec<EventField>,
}

fn default_average_decimals() -> u32 {
    1
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            pass_success: PassSuccessPolicy::default(),
            tie_break: TieBreak::default(),
            average_decimals: default_average_decimals(),
            required_fields: Vec::new(),
        }
    }
}

impl QueryConfig {
    /// Load from a file; `.yaml`/`.yml` are read as YAML, anything else as JSON.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            _ => Self::from_json(&content),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: QueryConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: QueryConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Config named by `OF_EVENTS_CONFIG_PATH`, or the default one.
    pub fn from_env() -> Result<Self, ConfigError> {
        let Ok(path) = env::var(CONFIG_PATH_ENV) else {
            return Ok(Self::default());
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(Self::default());
        }

        Self::load(path).inspect_err(|e| {
            log::warn!("Failed to load query config from {CONFIG_PATH_ENV}='{path}': {e}");
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.average_decimals > MAX_AVERAGE_DECIMALS {
            return Err(ConfigError::Validation(format!(
                "average_decimals must be 0-{}, got {}",
                MAX_AVERAGE_DECIMALS, self.average_decimals
            )));
        }

        for (idx, field) in self.required_fields.iter().enumerate() {
            if self.required_fields[..idx].contains(field) {
                return Err(ConfigError::Validation(format!(
                    "required_fields lists '{}' more than once",
                    field
                )));
            }
        }

        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}
