use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Runtime settings, read from YAML. Missing keys keep their defaults.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Line printed when `range` is given arguments that never iterate.
    pub range_diagnostic: String,
    /// `tracing` filter used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            range_diagnostic: "Error".to_string(),
            log_filter: "warn".to_string(),
        }
    }
}

impl RuntimeConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(source).context("Parsing runtime config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source =
            fs::read_to_string(path).with_context(|| format!("Reading {}", path.display()))?;
        Self::from_yaml_str(&source).with_context(|| format!("Loading {}", path.display()))
    }
}
