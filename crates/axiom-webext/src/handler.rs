//! Session-scoped action handler

use std::sync::Arc;

use axiom_state::{Action, ExtensionAction, Store};

use crate::runtime::{ActionHandler, WebExtension};

/// Records an extension's per-session action in the store.
pub struct SessionActionHandler {
    store: Store,
    session_id: String,
}

impl SessionActionHandler {
    pub fn new(store: Store, session_id: impl Into<String>) -> Self {
        Self {
            store,
            session_id: session_id.into(),
        }
    }
}

impl ActionHandler for SessionActionHandler {
    fn on_action(&self, extension: &Arc<dyn WebExtension>, action: ExtensionAction) {
        self.store.dispatch(Action::UpdateSessionExtensionAction {
            session_id: self.session_id.clone(),
            extension_id: extension.id().to_string(),
            action,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeExtension;
    use axiom_state::{BrowserState, SessionState};

    #[tokio::test]
    async fn test_action_is_scoped_to_session() {
        let store = Store::new(BrowserState::default());
        store
            .dispatch_and_wait(Action::AddSession {
                session: SessionState::with_id("tab", "https://example.com"),
            })
            .await
            .unwrap();

        let extension: Arc<dyn WebExtension> = FakeExtension::with_actions("ext");
        let handler = SessionActionHandler::new(store.clone(), "tab");
        handler.on_action(&extension, ExtensionAction::titled("Scoped"));
        assert!(handler
            .on_toggle_popup(&extension, ExtensionAction::default())
            .is_none());
        store.settled().await.unwrap();

        let state = store.state();
        assert_eq!(
            state.find_session("tab").unwrap().extension_actions["ext"],
            ExtensionAction::titled("Scoped")
        );
        assert!(state.extension("ext").is_none());
    }
}
