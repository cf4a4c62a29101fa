//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("State error: {0}")]
    State(#[from] axiom_state::StateError),

    #[error("Web extension error: {0}")]
    WebExt(#[from] axiom_webext::WebExtError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
