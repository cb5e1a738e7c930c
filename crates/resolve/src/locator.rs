//! Ordered directory search for an installed package

use crate::metadata::{METADATA_FILE, PackageMetadata};
use std::env;
use std::path::PathBuf;
use suite_core::{Dependency, ResolveError, ResolvedDependency, Resolver};
use tracing::{debug, info};

/// Environment variable consulted for an explicit package location,
/// e.g. `FERRITE_RT_DIR` for a package named `ferrite-rt`
pub fn package_dir_var(name: &str) -> String {
    let mut var: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    var.push_str("_DIR");
    var
}

/// Filesystem-based implementation of the package-location seam
///
/// Search order: the dependency's explicit `path`, then the `<NAME>_DIR`
/// environment variable, then `<prefix>/<name>` for each install prefix.
/// The first candidate carrying a `package.toml` wins; a version mismatch in
/// that candidate is an error, not a reason to keep searching.
pub struct PackageLocator {
    prefixes: Vec<PathBuf>,
}

impl PackageLocator {
    /// Locator with the standard install prefixes
    pub fn new() -> Self {
        Self {
            prefixes: vec![PathBuf::from("/usr/local"), PathBuf::from("/opt")],
        }
    }

    /// Locator searching only the given prefixes
    pub fn with_prefixes(prefixes: Vec<PathBuf>) -> Self {
        Self { prefixes }
    }

    /// Candidate package roots for `dep`, in search order
    fn candidates(&self, dep: &Dependency) -> Vec<PathBuf> {
        let mut out = Vec::new();

        if let Some(path) = &dep.path {
            out.push(path.clone());
        }

        if let Ok(dir) = env::var(package_dir_var(&dep.name)) {
            if !dir.is_empty() {
                out.push(PathBuf::from(dir));
            }
        }

        for prefix in &self.prefixes {
            out.push(prefix.join(&dep.name));
        }

        out
    }
}

impl Default for PackageLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver for PackageLocator {
    fn locate(&self, dep: &Dependency) -> Result<ResolvedDependency, ResolveError> {
        let candidates = self.candidates(dep);

        for root in &candidates {
            if !root.join(METADATA_FILE).is_file() {
                debug!(candidate = %root.display(), "no package metadata, skipping");
                continue;
            }

            let meta = PackageMetadata::load(root)?;

            if !dep.min_version.matches(&meta.version) {
                return Err(ResolveError::VersionMismatch {
                    name: dep.name.clone(),
                    found: meta.version,
                    required: dep.min_version.clone(),
                });
            }

            info!(
                package = %meta.name,
                version = %meta.version,
                root = %root.display(),
                "located package"
            );

            return Ok(ResolvedDependency {
                name: meta.name,
                version: meta.version,
                root: root.clone(),
                warn_options: meta.warn_options,
            });
        }

        Err(ResolveError::NotFound {
            name: dep.name.clone(),
            searched: candidates,
        })
    }
}
