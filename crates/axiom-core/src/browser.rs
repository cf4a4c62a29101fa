//! Main browser state container
//!
//! The store owns all state; the extension runtime and the host UI only see
//! snapshots and dispatch actions.

use std::sync::Arc;

use axiom_state::{Action, BrowserState, SessionState, Store};
use axiom_webext::{Overrides, RuntimeError, WebExtensionRuntime, WebExtensionSupport};

use crate::config::Config;
use crate::Result;

/// Main browser instance
#[derive(Clone)]
pub struct Browser {
    config: Config,
    store: Store,
    web_extensions: WebExtensionSupport,
}

impl Browser {
    /// Create the store and extension support. Must be called within a
    /// Tokio runtime.
    pub fn new(config: Config, overrides: Overrides) -> Result<Self> {
        config.validate()?;

        let store = Store::new(BrowserState::default());
        let web_extensions =
            WebExtensionSupport::new(store.clone(), overrides, config.support_config());

        Ok(Self {
            config,
            store,
            web_extensions,
        })
    }

    /// Connect the extension runtime. Fails if called more than once.
    pub fn initialize(&self, runtime: Arc<dyn WebExtensionRuntime>) -> Result<()> {
        self.web_extensions.initialize(runtime)?;

        tracing::info!(
            restore_installed = self.config.restore_installed,
            "Browser initialized"
        );

        Ok(())
    }

    pub fn install_extension<F>(&self, id: &str, url: &str, on_error: F) -> Result<()>
    where
        F: FnOnce(String, RuntimeError) + Send + 'static,
    {
        Ok(self.web_extensions.install_extension(id, url, on_error)?)
    }

    // === Tab operations ===

    /// Open a tab and select it. Returns the new session id.
    pub fn create_tab(&self, url: impl Into<String>) -> String {
        let session = SessionState::new(url);
        let session_id = session.id.clone();

        self.store.dispatch(Action::AddSession { session });
        self.store.dispatch(Action::SelectSession {
            id: session_id.clone(),
        });

        tracing::info!(session_id = %session_id, "Created tab");
        session_id
    }

    pub fn select_tab(&self, session_id: &str) {
        self.store.dispatch(Action::SelectSession {
            id: session_id.to_string(),
        });
    }

    pub fn close_tab(&self, session_id: &str) {
        self.store.dispatch(Action::RemoveSession {
            id: session_id.to_string(),
        });
        tracing::info!(session_id = %session_id, "Closed tab");
    }

    /// Wait for every action dispatched so far to be applied.
    pub async fn settled(&self) -> Result<()> {
        Ok(self.store.settled().await?)
    }

    pub fn state(&self) -> Arc<BrowserState> {
        self.store.state()
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn web_extensions(&self) -> &WebExtensionSupport {
        &self.web_extensions
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
