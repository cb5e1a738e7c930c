//! suite-core: Core logic for suitecfg
//!
//! This crate provides the unit catalog, capability flags, and the selection
//! engine that decides which test-suite subprojects participate in a build.

mod catalog;
mod error;
mod flags;
mod resolve;
mod select;

pub use catalog::{BuildUnit, default_catalog};
pub use error::SelectError;
pub use flags::{
    CANONICAL_FLAGS, Flags, HDF5_ENABLED, MULTI_NODE_NETWORKING_ENABLED,
    SCRIPTING_BINDINGS_ENABLED,
};
pub use resolve::{Dependency, ResolveError, ResolvedDependency, Resolver};
pub use select::{Activation, BASE_WARN_OPTIONS, Selection, Skipped, select};

/// Result type for selection operations
pub type Result<T> = std::result::Result<T, SelectError>;
