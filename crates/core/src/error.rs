//! Error types for suite-core

use crate::resolve::ResolveError;
use thiserror::Error;

/// Errors that can occur during unit selection
#[derive(Debug, Error)]
pub enum SelectError {
    /// The suite's external dependency could not be located or validated.
    /// Fatal: no units are activated and the configuration run must abort.
    #[error("unresolved dependency '{name}': {source}")]
    DependencyUnresolved {
        name: String,
        #[source]
        source: ResolveError,
    },
}
