//! Web extension error types

use thiserror::Error;

/// Failure reported by the runtime through a completion callback.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("Extension install failed: {id}: {reason}")]
    InstallFailed { id: String, reason: String },

    #[error("Action handler registration failed: {0}")]
    Registration(String),

    #[error("Runtime error: {0}")]
    Other(String),
}

#[derive(Error, Debug)]
pub enum WebExtError {
    #[error("Web extension support already initialized")]
    AlreadyInitialized,

    #[error("Web extension support not initialized")]
    NotInitialized,

    #[error("Override returned an invalid session id: {0:?}")]
    InvalidOverrideSession(String),

    #[error("Invalid extension URL: {0}")]
    InvalidUrl(String),

    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),

    #[error("State error: {0}")]
    State(#[from] axiom_state::StateError),
}
