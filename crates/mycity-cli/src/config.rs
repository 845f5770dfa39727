//! Skill configuration.
//!
//! Reads `config/default.toml` (or the file given with `--config`) and then
//! applies `MYCITY_*` environment overrides.  A missing file means defaults;
//! a malformed one is an error.
//!
//! ```toml
//! application_id = "amzn1.ask.skill.boston-public-services"
//! directory = "data/boston.toml"
//!
//! [logging]
//! level = "info"
//! json = false
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Default configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Top-level settings for the `mycity` binary.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SkillConfig {
    /// Reject requests addressed to any other skill when set.
    pub application_id: Option<String>,
    /// City directory TOML file.
    pub directory: PathBuf,
    pub logging: LoggingConfig,
}

/// Settings for the tracing subscriber.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub level: String,
    /// Emit JSON lines instead of compact text.
    pub json: bool,
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            application_id: None,
            directory: PathBuf::from("data/boston.toml"),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
        }
    }
}

impl SkillConfig {
    /// Load configuration from `path` and the process environment.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse `path`, falling back to defaults if it does not exist.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", path.display()));
            }
        };

        toml::from_str(&content).with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Apply `MYCITY_*` overrides using `lookup` to read variables.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(id) = lookup("MYCITY_APPLICATION_ID") {
            self.application_id = (!id.is_empty()).then_some(id);
        }
        if let Some(dir) = lookup("MYCITY_DIRECTORY") {
            self.directory = PathBuf::from(dir);
        }
        if let Some(level) = lookup("MYCITY_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(json) = lookup("MYCITY_LOG_JSON") {
            self.logging.json = matches!(json.to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
