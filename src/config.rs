//! Aggregator configuration

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings shared by every fold an [`Aggregator`](crate::fold::Aggregator) runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    /// Name of the view being built, attached to log lines
    pub name: String,
    /// Emit a progress trace every N applied records (0 disables)
    pub progress_interval: u64,
}

impl AggregatorConfig {
    /// Create a config with the given view name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the progress interval
    pub fn with_progress_interval(mut self, every: u64) -> Self {
        self.progress_interval = every;
        self
    }

    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        let config: Self = serde_json::from_slice(&bytes).map_err(|e| {
            Error::Configuration(format!("{}: {}", path.as_ref().display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check the config for values a fold cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Configuration("view name must not be empty".to_string()));
        }
        Ok(())
    }
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            name: "view".to_string(),
            progress_interval: 0,
        }
    }
}
