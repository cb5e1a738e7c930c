//! Parsing the metadata file an installed package exports

use semver::Version;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use suite_core::ResolveError;

/// File an installed package must carry at its root
pub const METADATA_FILE: &str = "package.toml";

/// The metadata an installed package exports to its consumers
#[derive(Debug, Clone, Deserialize)]
pub struct PackageMetadata {
    /// Package name as installed
    pub name: String,

    /// Installed version
    pub version: Version,

    /// Warning options the package asks all consumers to compile with
    #[serde(default, rename = "warn-options")]
    pub warn_options: Vec<String>,
}

impl PackageMetadata {
    /// Load `package.toml` from a package root directory
    pub fn load(root: &Path) -> Result<Self, ResolveError> {
        let path = root.join(METADATA_FILE);
        let raw = fs::read_to_string(&path)?;

        toml::from_str(&raw).map_err(|e| ResolveError::Metadata {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}
