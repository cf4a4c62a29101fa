//! Override resolution
//!
//! For each overridable lifecycle event the host may supply a substitute.
//! When present it runs instead of the default action, never in addition to
//! it. What the override does internally (including dispatching its own
//! actions) is not inspected.

use std::fmt;
use std::sync::Arc;

use axiom_state::{Action, EngineBinding, SessionState, Store};

use crate::error::WebExtError;
use crate::runtime::WebExtension;
use crate::Result;

/// Opens a tab for `url` backed by the engine session; returns its session id.
pub type NewTabOverride =
    Arc<dyn Fn(&Arc<dyn WebExtension>, &EngineBinding, &str) -> String + Send + Sync>;

/// Closes the session with the given id.
pub type CloseTabOverride = Arc<dyn Fn(&Arc<dyn WebExtension>, &str) + Send + Sync>;

/// Selects the session with the given id.
pub type SelectTabOverride = Arc<dyn Fn(&Arc<dyn WebExtension>, &str) + Send + Sync>;

/// Which path handled an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Override,
    Default,
}

impl Resolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Override => "override",
            Resolution::Default => "default",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, Default)]
pub struct Overrides {
    on_new_tab: Option<NewTabOverride>,
    on_close_tab: Option<CloseTabOverride>,
    on_select_tab: Option<SelectTabOverride>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_new_tab<F>(mut self, f: F) -> Self
    where
        F: Fn(&Arc<dyn WebExtension>, &EngineBinding, &str) -> String + Send + Sync + 'static,
    {
        self.on_new_tab = Some(Arc::new(f));
        self
    }

    pub fn on_close_tab<F>(mut self, f: F) -> Self
    where
        F: Fn(&Arc<dyn WebExtension>, &str) + Send + Sync + 'static,
    {
        self.on_close_tab = Some(Arc::new(f));
        self
    }

    pub fn on_select_tab<F>(mut self, f: F) -> Self
    where
        F: Fn(&Arc<dyn WebExtension>, &str) + Send + Sync + 'static,
    {
        self.on_select_tab = Some(Arc::new(f));
        self
    }

    /// Open a tab backed by `binding`. The default path adds the session and
    /// links the binding to it; an override is trusted to do both.
    pub fn open_tab(
        &self,
        store: &Store,
        extension: &Arc<dyn WebExtension>,
        binding: &EngineBinding,
        url: &str,
    ) -> Result<(String, Resolution)> {
        let (session_id, resolution) = match &self.on_new_tab {
            Some(f) => (f(extension, binding, url), Resolution::Override),
            None => {
                let session = SessionState::new(url);
                let session_id = session.id.clone();
                store.dispatch(Action::AddSession { session });
                store.dispatch(Action::LinkRuntimeSession {
                    session_id: session_id.clone(),
                    binding: binding.clone(),
                });
                (session_id, Resolution::Default)
            }
        };

        if session_id.trim().is_empty() {
            tracing::error!(
                extension_id = %extension.id(),
                "New tab override returned an empty session id"
            );
            return Err(WebExtError::InvalidOverrideSession(session_id));
        }

        tracing::debug!(
            extension_id = %extension.id(),
            session_id = %session_id,
            resolution = %resolution,
            "Opened tab"
        );

        Ok((session_id, resolution))
    }

    pub fn close_tab(
        &self,
        store: &Store,
        extension: &Arc<dyn WebExtension>,
        session_id: &str,
    ) -> Resolution {
        let resolution = match &self.on_close_tab {
            Some(f) => {
                f(extension, session_id);
                Resolution::Override
            }
            None => {
                store.dispatch(Action::RemoveSession {
                    id: session_id.to_string(),
                });
                Resolution::Default
            }
        };

        tracing::debug!(
            extension_id = %extension.id(),
            session_id = %session_id,
            resolution = %resolution,
            "Closed tab"
        );

        resolution
    }

    pub fn select_tab(
        &self,
        store: &Store,
        extension: &Arc<dyn WebExtension>,
        session_id: &str,
    ) -> Resolution {
        let resolution = match &self.on_select_tab {
            Some(f) => {
                f(extension, session_id);
                Resolution::Override
            }
            None => {
                store.dispatch(Action::SelectSession {
                    id: session_id.to_string(),
                });
                Resolution::Default
            }
        };

        tracing::debug!(
            extension_id = %extension.id(),
            session_id = %session_id,
            resolution = %resolution,
            "Selected tab"
        );

        resolution
    }
}

impl fmt::Debug for Overrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Overrides")
            .field("on_new_tab", &self.on_new_tab.is_some())
            .field("on_close_tab", &self.on_close_tab.is_some())
            .field("on_select_tab", &self.on_select_tab.is_some())
            .finish()
    }
}
