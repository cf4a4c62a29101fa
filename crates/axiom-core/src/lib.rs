//! AXIOM Core
//!
//! Host-facing entry point. Owns the state store and the web extension
//! support that keeps it in sync with the extension runtime.

mod browser;
mod config;
mod error;

pub use browser::Browser;
pub use config::Config;
pub use error::CoreError;

// Re-export core components
pub use axiom_state::{
    Action, ActionLog, BrowserState, EngineBinding, EngineSession, ExtensionAction, ExtensionState,
    Middleware, SessionState, Store,
};
pub use axiom_webext::{
    ActionHandler, Completion, Overrides, Resolution, RuntimeError, WebExtError, WebExtension,
    WebExtensionDelegate, WebExtensionRuntime, WebExtensionSupport,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    init_logging_with("info");
}

/// Initialize logging, using `default_filter` when `RUST_LOG` is unset
pub fn init_logging_with(default_filter: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt().with_env_filter(filter).with_target(true).init();
}
