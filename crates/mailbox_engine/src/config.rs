//! Engine configuration, loaded from TOML (or JSON) with serde defaults for
//! every field so a partial file only overrides what it names.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use mailbox_core::SearchLimits;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("max_depth must be at least 1")]
    ZeroDepth,
}

/// Switches for the expensive parts of the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Probe mate-in-one for both sides at every evaluated node.
    pub mate_threats: bool,
    /// Also probe the opponent's mate-in-two. Far slower; off by default.
    pub mate_in_two: bool,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            mate_threats: true,
            mate_in_two: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Deepest iteration the search will start.
    pub max_depth: u8,
    /// Wall-clock budget per move in milliseconds; 0 means no limit.
    pub move_time_ms: u64,
    /// Nodes between clock reads inside the tree.
    pub node_check_interval: u64,
    pub eval: EvalConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            move_time_ms: 2_000,
            node_check_interval: 512,
            eval: EvalConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: EngineConfig = toml::from_str(text)?;
        cfg.validate()
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: EngineConfig = serde_json::from_str(text)?;
        cfg.validate()
    }

    /// Reads a config file; `.json` files are parsed as JSON, anything else as TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&text),
            _ => Self::from_toml_str(&text),
        }
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        Ok(self)
    }

    pub fn move_time(&self) -> Option<Duration> {
        (self.move_time_ms > 0).then(|| Duration::from_millis(self.move_time_ms))
    }

    /// Search limits for one move under this config.
    pub fn limits(&self) -> SearchLimits {
        match self.move_time() {
            Some(t) => SearchLimits::depth_and_time(self.max_depth, t),
            None => SearchLimits::depth(self.max_depth),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
