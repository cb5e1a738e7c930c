//! The static catalog of test-suite build units

use crate::flags::{HDF5_ENABLED, MULTI_NODE_NETWORKING_ENABLED, SCRIPTING_BINDINGS_ENABLED};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// An independently buildable subproject of the test suite
///
/// Declared once in the catalog; activated or skipped for a given run and
/// never mutated afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildUnit {
    /// Short unit name
    pub name: String,

    /// Subproject directory, relative to the suite root
    pub path: PathBuf,

    /// Capability flags that must all be enabled for this unit to build.
    /// Empty means unconditional.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<String>,
}

impl BuildUnit {
    /// Create a unit with no flag requirements
    pub fn unconditional(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            requires: Vec::new(),
        }
    }

    /// Create a unit gated on the given capability flags
    pub fn requiring(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        requires: &[&str],
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            requires: requires.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// The built-in suite catalog, in build order
///
/// Order here is the order units are handed to the build; selection must
/// preserve it.
pub fn default_catalog() -> Vec<BuildUnit> {
    vec![
        BuildUnit::unconditional("hello", "tutorials/hello"),
        BuildUnit::unconditional("tasklib", "tutorials/tasklib"),
        BuildUnit::unconditional("stencil", "examples/stencil"),
        BuildUnit::unconditional("circuit", "examples/circuit"),
        BuildUnit::requiring("checkpoint-hdf5", "tests/checkpoint_hdf5", &[HDF5_ENABLED]),
        BuildUnit::requiring("attach-hdf5", "tests/attach_hdf5", &[HDF5_ENABLED]),
        BuildUnit::requiring(
            "script-interop",
            "bindings/script_interop",
            &[SCRIPTING_BINDINGS_ENABLED],
        ),
        BuildUnit::requiring(
            "script-tasks",
            "bindings/script_tasks",
            &[SCRIPTING_BINDINGS_ENABLED],
        ),
        BuildUnit::requiring(
            "multi-node-ping",
            "tests/multi_node_ping",
            &[MULTI_NODE_NETWORKING_ENABLED],
        ),
        BuildUnit::requiring(
            "dist-checkpoint",
            "tests/dist_checkpoint",
            &[HDF5_ENABLED, MULTI_NODE_NETWORKING_ENABLED],
        ),
    ]
}
