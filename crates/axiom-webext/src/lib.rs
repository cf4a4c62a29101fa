//! AXIOM Web Extension Support
//!
//! Keeps the web extension runtime and the browser state store in sync:
//! - Runtime lifecycle events become store actions, or host overrides
//! - Every bound session gets one action handler per installed extension
//! - Handlers are attached only when a session's engine binding changes

mod error;
mod handler;
mod overrides;
mod registry;
mod runtime;
mod support;

#[cfg(test)]
mod testing;

pub use error::{RuntimeError, WebExtError};
pub use handler::SessionActionHandler;
pub use overrides::{CloseTabOverride, NewTabOverride, Overrides, Resolution, SelectTabOverride};
pub use registry::SessionRegistry;
pub use runtime::{
    ActionHandler, Completion, WebExtension, WebExtensionDelegate, WebExtensionRuntime,
};
pub use support::{SupportConfig, WebExtensionSupport};

pub type Result<T> = std::result::Result<T, WebExtError>;
