//! Configuration loading and validation.

mod types;
mod validation;

pub use types::*;

use crate::drivers::Driver;
use crate::error::Result;
use std::path::Path;

impl GeneratorConfig {
    /// Load configuration from a YAML file.
    ///
    /// The result is not validated yet; callers apply overrides first and
    /// then call [`GeneratorConfig::validate`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: GeneratorConfig = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Validate the configuration and resolve the driver.
    pub fn validate(&self) -> Result<Driver> {
        validation::validate(self)
    }
}
