//! Recycling pool configuration

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{RecyclerError, Result};

/// Number of instances created up front when no count is given
pub const DEFAULT_PREWARM_COUNT: usize = 5;

/// Number of instances created when a checkout finds nothing to reuse
pub const DEFAULT_GROWTH_COUNT: usize = 1;

/// Configuration for recycling pools
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Name of the pool, used in logs and summaries
    pub name: String,
    /// Instances created at construction
    pub prewarm_count: usize,
    /// Instances created on an exhausted checkout
    pub growth_count: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            prewarm_count: DEFAULT_PREWARM_COUNT,
            growth_count: DEFAULT_GROWTH_COUNT,
        }
    }
}

impl PoolConfig {
    /// Create a new configuration with custom name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set pre-warm count
    pub fn with_prewarm_count(mut self, count: usize) -> Self {
        self.prewarm_count = count;
        self
    }

    /// Set growth count
    pub fn with_growth_count(mut self, count: usize) -> Self {
        self.growth_count = count;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(RecyclerError::invalid_parameter(
                "name",
                "Pool name cannot be empty",
            ));
        }

        if self.growth_count == 0 {
            return Err(RecyclerError::invalid_parameter(
                "growth_count",
                "Growth count must be at least one",
            ));
        }

        Ok(())
    }

    /// Parse and validate a configuration from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| RecyclerError::from_io(e, &format!("reading {}", path.display())))?;
        Self::from_json_str(&text)
    }

    /// Write the configuration to a JSON file
    pub fn save_json_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)
            .map_err(|e| RecyclerError::from_io(e, &format!("writing {}", path.display())))
    }
}

/// Builder pattern for pool configuration
pub struct PoolConfigBuilder {
    config: PoolConfig,
}

impl PoolConfigBuilder {
    /// Create a new builder
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            config: PoolConfig::new(name),
        }
    }

    /// Set pre-warm count
    pub fn prewarm_count(mut self, count: usize) -> Self {
        self.config.prewarm_count = count;
        self
    }

    /// Skip pre-warming entirely
    pub fn no_prewarm(mut self) -> Self {
        self.config.prewarm_count = 0;
        self
    }

    /// Set growth count
    pub fn growth_count(mut self, count: usize) -> Self {
        self.config.growth_count = count;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<PoolConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
