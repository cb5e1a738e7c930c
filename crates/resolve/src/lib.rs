//! suite-resolve: locating the runtime package
//!
//! Implements the [`suite_core::Resolver`] seam: an ordered directory search
//! for the installed runtime, driven by the dependency declaration, the
//! environment, and a fixed set of install prefixes.

mod locator;
mod metadata;

pub use locator::{PackageLocator, package_dir_var};
pub use metadata::PackageMetadata;
