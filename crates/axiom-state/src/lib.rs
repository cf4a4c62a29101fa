//! AXIOM Browser State
//!
//! Canonical application state for tabs and web extensions.
//! - Snapshots are immutable values; every change goes through an [`Action`]
//! - A single writer applies actions in dispatch order
//! - Subscribers observe whole snapshots, never deltas

mod action;
mod engine;
mod error;
mod extension;
mod reducer;
mod session;
mod state;
mod store;

pub use action::Action;
pub use engine::{BindingId, EngineBinding, EngineSession};
pub use error::StateError;
pub use extension::{ExtensionAction, ExtensionState};
pub use reducer::reduce;
pub use session::SessionState;
pub use state::BrowserState;
pub use store::{ActionLog, Middleware, Store};

pub type Result<T> = std::result::Result<T, StateError>;
