//! Dependency declarations and the package-location seam

use semver::{Version, VersionReq};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// A required external package the whole suite builds against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Dependency {
    /// Package name (also used to derive the `<NAME>_DIR` lookup variable)
    pub name: String,

    /// Minimum acceptable version
    pub min_version: VersionReq,

    /// Whether a resolution failure aborts the whole configuration run
    #[serde(default = "default_required")]
    pub required: bool,

    /// Explicit package location, tried before any search path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

fn default_required() -> bool {
    true
}

impl Dependency {
    /// Declare a required dependency on `name` at `min_version` or newer
    pub fn required(name: impl Into<String>, min_version: VersionReq) -> Self {
        Self {
            name: name.into(),
            min_version,
            required: true,
            path: None,
        }
    }
}

/// A located and validated package, with its exported option set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedDependency {
    /// Package name as declared in its metadata
    pub name: String,

    /// Installed version
    pub version: Version,

    /// Package root directory
    pub root: PathBuf,

    /// Compiler-warning options the package exports for all of its consumers
    #[serde(default)]
    pub warn_options: Vec<String>,
}

/// Errors from locating an external package
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("package '{name}' not found in any search location")]
    NotFound {
        name: String,
        searched: Vec<PathBuf>,
    },

    #[error("package '{name}' is version {found}, but {required} is required")]
    VersionMismatch {
        name: String,
        found: Version,
        required: VersionReq,
    },

    #[error("invalid package metadata at '{path}': {message}")]
    Metadata { path: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The "locate external package" collaborator
///
/// Supplied by the enclosing build configuration; selection only uses the
/// success/failure outcome and the resolved package's exported options.
pub trait Resolver {
    /// Locate and validate `dep`, returning its root and exported options
    fn locate(&self, dep: &Dependency) -> Result<ResolvedDependency, ResolveError>;
}
