//! Atom error types.

use thiserror::Error;

/// Errors surfaced by atom mounts and writes.
#[derive(Debug, Error)]
pub enum AtomError {
    /// The machine service could not be started.
    #[error("failed to start machine service for {atom}: {source}")]
    ServiceStart {
        atom: String,
        #[source]
        source: Box<dyn std::error::Error + 'static>,
    },
}
