//! Capability flags supplied by the enclosing build configuration

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// HDF5 support is available in the runtime build
pub const HDF5_ENABLED: &str = "hdf5Enabled";

/// The scripting-language bindings are built
pub const SCRIPTING_BINDINGS_ENABLED: &str = "scriptingBindingsEnabled";

/// A multi-node networking transport is built
pub const MULTI_NODE_NETWORKING_ENABLED: &str = "multiNodeNetworkingEnabled";

/// The flag names the built-in catalog refers to
pub const CANONICAL_FLAGS: &[&str] = &[
    HDF5_ENABLED,
    SCRIPTING_BINDINGS_ENABLED,
    MULTI_NODE_NETWORKING_ENABLED,
];

/// A set of named boolean capability flags
///
/// Flags are read-only for the duration of one configuration run. Looking up
/// a name that was never supplied yields `false`, never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Flags(BTreeMap<String, bool>);

impl Flags {
    /// Create an empty flag set (every lookup yields `false`)
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Set a flag by name
    pub fn set(&mut self, name: impl Into<String>, value: bool) {
        self.0.insert(name.into(), value);
    }

    /// Whether the named flag is present and true
    ///
    /// An absent flag is treated as disabled. This fail-closed default is
    /// load-bearing: units must not activate on flags nobody supplied.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.0.get(name).copied().unwrap_or(false)
    }

    /// The raw value of a flag, if it was supplied at all
    pub fn get(&self, name: &str) -> Option<bool> {
        self.0.get(name).copied()
    }

    /// Iterate over the supplied flags in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl FromIterator<(String, bool)> for Flags {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
