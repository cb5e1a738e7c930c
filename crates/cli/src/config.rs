//! Loading the suite configuration file

use serde::Deserialize;
use std::fs;
use std::path::Path;
use suite_core::{Dependency, Flags};
use thiserror::Error;

/// Errors loading `suite.toml`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(String),

    #[error("invalid config at '{path}': {message}")]
    Parse { path: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The suite configuration: the runtime dependency plus capability flags
#[derive(Debug, Clone, Deserialize)]
pub struct SuiteConfig {
    /// The external runtime package the whole suite builds against
    pub dependency: Dependency,

    /// Capability flags supplied for this run. Flags the catalog refers to
    /// but that are omitted here count as disabled.
    #[serde(default)]
    pub flags: Flags,
}

impl SuiteConfig {
    /// Load a configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let raw = fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}
