//! Configuration for crop export

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or parsing a config file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Configuration options for crop export
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CropConfig {
    /// Supersampling factor handed to the rasterizer. 4.0 gives roughly
    /// 384 DPI against the usual 96 DPI baseline.
    pub supersample: f64,

    /// File extension for the per-region output files
    pub extension: String,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            supersample: 4.0,
            extension: "png".to_string(),
        }
    }
}

impl CropConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Set the supersampling factor
    pub fn with_supersample(mut self, factor: f64) -> Self {
        self.supersample = factor;
        self
    }

    /// Set the output file extension
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }
}
