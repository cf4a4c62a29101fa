//! Web extension support
//!
//! Bridges the runtime and the store. Two inputs drive it:
//! - runtime lifecycle callbacks, translated into actions or host overrides
//! - store snapshots, diffed on engine bindings to attach per-session handlers
//!
//! The registry lock is held across every check-then-attach sequence, so
//! callbacks from different threads cannot register a handler twice.

use futures_util::StreamExt;
use parking_lot::Mutex;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, OnceLock};

use axiom_state::{Action, BrowserState, EngineBinding, ExtensionAction, ExtensionState, Store};

use crate::error::{RuntimeError, WebExtError};
use crate::handler::SessionActionHandler;
use crate::overrides::Overrides;
use crate::registry::SessionRegistry;
use crate::runtime::{WebExtension, WebExtensionDelegate, WebExtensionRuntime};
use crate::Result;

#[derive(Debug, Clone)]
pub struct SupportConfig {
    /// URL of sessions opened to host an action popup
    pub popup_url: String,
    /// Register extensions the runtime already has installed on startup
    pub restore_installed: bool,
}

impl Default for SupportConfig {
    fn default() -> Self {
        Self {
            popup_url: String::new(),
            restore_installed: true,
        }
    }
}

/// Keeps one runtime in sync with one store.
#[derive(Clone)]
pub struct WebExtensionSupport {
    inner: Arc<Inner>,
}

struct Inner {
    store: Store,
    overrides: Overrides,
    config: SupportConfig,
    registry: Mutex<SessionRegistry>,
    runtime: OnceLock<Arc<dyn WebExtensionRuntime>>,
}

impl WebExtensionSupport {
    pub fn new(store: Store, overrides: Overrides, config: SupportConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                overrides,
                config,
                registry: Mutex::new(SessionRegistry::new()),
                runtime: OnceLock::new(),
            }),
        }
    }

    /// Start observing the store and register the lifecycle delegate.
    ///
    /// Must be called within a Tokio runtime. The observer lives as long as
    /// the store does. Fails on a second call.
    pub fn initialize(&self, runtime: Arc<dyn WebExtensionRuntime>) -> Result<()> {
        if self.inner.runtime.set(runtime.clone()).is_err() {
            tracing::error!("Web extension support initialized twice");
            return Err(WebExtError::AlreadyInitialized);
        }

        let observer = Arc::clone(&self.inner);
        let snapshots = self.inner.store.subscribe();
        tokio::spawn(async move {
            let mut snapshots = std::pin::pin!(snapshots);
            while let Some(state) = snapshots.next().await {
                observer.process_snapshot(&state);
            }
            tracing::debug!("Snapshot observer stopped");
        });

        runtime.register_delegate(self.inner.clone());

        if self.inner.config.restore_installed {
            let inner = Arc::clone(&self.inner);
            runtime.list_installed_extensions(Box::new(move |result| match result {
                Ok(extensions) => {
                    tracing::info!(count = extensions.len(), "Restoring installed extensions");
                    for extension in extensions {
                        inner.register_installed(extension);
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to list installed extensions");
                }
            }));
        }

        tracing::info!("Web extension support initialized");

        Ok(())
    }

    /// Install an extension through the runtime.
    ///
    /// On success the extension is registered like an installed event. On
    /// failure `on_error` receives the extension id and the runtime error; the
    /// install is not retried.
    pub fn install_extension<F>(&self, id: &str, url: &str, on_error: F) -> Result<()>
    where
        F: FnOnce(String, RuntimeError) + Send + 'static,
    {
        let runtime = self.inner.runtime.get().ok_or(WebExtError::NotInitialized)?;

        url::Url::parse(url).map_err(|e| WebExtError::InvalidUrl(format!("{url}: {e}")))?;

        let inner = Arc::clone(&self.inner);
        let extension_id = id.to_string();
        runtime.install_extension(
            id,
            url,
            Box::new(move |result| match result {
                Ok(extension) => inner.register_installed(extension),
                Err(e) => {
                    tracing::warn!(
                        extension_id = %extension_id,
                        error = %e,
                        "Extension install failed"
                    );
                    on_error(extension_id, e);
                }
            }),
        );

        Ok(())
    }

    /// Extensions observed as installed, for diagnostics.
    pub fn installed_extensions(&self) -> Vec<Arc<dyn WebExtension>> {
        self.inner.registry.lock().extensions().cloned().collect()
    }

    pub fn is_installed(&self, extension_id: &str) -> bool {
        self.inner.registry.lock().extension(extension_id).is_some()
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.runtime.get().is_some()
    }

    pub fn store(&self) -> &Store {
        &self.inner.store
    }
}

impl Inner {
    /// Attach handlers for every session whose binding changed since the
    /// previous snapshot. Returns the number of handlers attached.
    fn process_snapshot(&self, state: &BrowserState) -> usize {
        let mut registry = self.registry.lock();
        let changed = registry.changed_bindings(state);
        if changed.is_empty() {
            return 0;
        }

        let mut attached = 0;
        for (session_id, binding) in &changed {
            for extension in registry.extensions() {
                if self.attach(extension, session_id, binding) {
                    attached += 1;
                }
            }
        }

        tracing::debug!(
            sessions = changed.len(),
            attached,
            "Processed binding changes"
        );

        attached
    }

    /// Caller must hold the registry lock. A panic in the runtime is
    /// contained to this extension and session.
    fn attach(
        &self,
        extension: &Arc<dyn WebExtension>,
        session_id: &str,
        binding: &EngineBinding,
    ) -> bool {
        let attempt = panic::catch_unwind(AssertUnwindSafe(|| {
            self.try_attach(extension, session_id, binding)
        }));

        match attempt {
            Ok(attached) => attached,
            Err(_) => {
                tracing::warn!(
                    extension_id = %extension.id(),
                    session_id = %session_id,
                    "Runtime panicked while attaching session action handler"
                );
                false
            }
        }
    }

    fn try_attach(
        &self,
        extension: &Arc<dyn WebExtension>,
        session_id: &str,
        binding: &EngineBinding,
    ) -> bool {
        if !extension.supports_actions() || extension.has_action_handler(binding) {
            return false;
        }

        let handler = Arc::new(SessionActionHandler::new(self.store.clone(), session_id));
        match extension.register_action_handler(binding, handler) {
            Ok(()) => {
                tracing::debug!(
                    extension_id = %extension.id(),
                    session_id = %session_id,
                    binding = %binding.id(),
                    "Attached session action handler"
                );
                true
            }
            Err(e) => {
                tracing::warn!(
                    extension_id = %extension.id(),
                    session_id = %session_id,
                    error = %e,
                    "Failed to attach session action handler"
                );
                false
            }
        }
    }

    fn register_installed(&self, extension: Arc<dyn WebExtension>) {
        let mut registry = self.registry.lock();

        self.store.dispatch(Action::InstallExtension {
            extension: ExtensionState::new(
                extension.id(),
                extension.url(),
                extension.supports_actions(),
            ),
        });
        let fresh = registry.insert_extension(extension.clone());

        tracing::info!(
            extension_id = %extension.id(),
            fresh,
            "Registered installed extension"
        );

        // Sessions bound before the install never produce another binding
        // change, so attach to them now.
        let state = self.store.state();
        for (session_id, binding) in state.bound_sessions() {
            self.attach(&extension, session_id, binding);
        }
    }
}

impl WebExtensionDelegate for Inner {
    fn on_new_tab(
        &self,
        extension: &Arc<dyn WebExtension>,
        engine_session: EngineBinding,
        url: &str,
    ) {
        let opened = self
            .overrides
            .open_tab(&self.store, extension, &engine_session, url);
        if let Err(e) = opened {
            tracing::warn!(
                extension_id = %extension.id(),
                error = %e,
                "New tab request was not applied"
            );
        }
    }

    fn on_close_tab(
        &self,
        extension: &Arc<dyn WebExtension>,
        engine_session: &EngineBinding,
    ) -> bool {
        let state = self.store.state();
        let Some(tab) = state.find_session_by_binding(engine_session) else {
            tracing::debug!(
                extension_id = %extension.id(),
                binding = %engine_session.id(),
                "No tab matches close request"
            );
            return false;
        };

        self.overrides.close_tab(&self.store, extension, &tab.id);
        true
    }

    fn on_installed(&self, extension: &Arc<dyn WebExtension>) {
        self.register_installed(extension.clone());
    }

    fn on_action_defined(&self, extension: &Arc<dyn WebExtension>, action: ExtensionAction) {
        self.store.dispatch(Action::UpdateExtensionAction {
            extension_id: extension.id().to_string(),
            action,
        });
    }

    fn on_toggle_action_popup(
        &self,
        extension: &Arc<dyn WebExtension>,
        engine_session: EngineBinding,
        _action: ExtensionAction,
    ) -> Option<EngineBinding> {
        let state = self.store.state();

        match state.popup_session(extension.id()) {
            Some(popup) if state.is_selected(&popup.id) => {
                self.overrides.close_tab(&self.store, extension, &popup.id);
                None
            }
            Some(popup) => {
                self.overrides.select_tab(&self.store, extension, &popup.id);
                None
            }
            None => {
                let popup_url = &self.config.popup_url;
                let (session_id, _) = self
                    .overrides
                    .open_tab(&self.store, extension, &engine_session, popup_url)
                    .ok()?;

                self.store.dispatch(Action::UpdateExtensionPopupSession {
                    extension_id: extension.id().to_string(),
                    session_id: Some(session_id),
                });

                Some(engine_session)
            }
        }
    }
}
