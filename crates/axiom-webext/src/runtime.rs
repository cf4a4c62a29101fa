//! Runtime interface
//!
//! What this crate consumes from the embedded web extension runtime. The
//! runtime owns extensions and engine sessions; it calls back into a single
//! [`WebExtensionDelegate`] for lifecycle events.

use std::fmt;
use std::sync::Arc;

use axiom_state::{EngineBinding, ExtensionAction};

use crate::error::RuntimeError;

/// Single-shot completion for asynchronous runtime calls. May be invoked
/// before the call that received it returns.
pub type Completion<T> = Box<dyn FnOnce(Result<T, RuntimeError>) + Send + 'static>;

/// An installed extension, as the runtime exposes it.
pub trait WebExtension: Send + Sync + fmt::Debug {
    fn id(&self) -> &str;

    fn url(&self) -> &str;

    /// Whether the extension declares toolbar actions.
    fn supports_actions(&self) -> bool;

    /// Register a handler for actions this extension defines in `session`.
    fn register_action_handler(
        &self,
        session: &EngineBinding,
        handler: Arc<dyn ActionHandler>,
    ) -> Result<(), RuntimeError>;

    fn has_action_handler(&self, session: &EngineBinding) -> bool;
}

/// Receives action updates for one extension.
pub trait ActionHandler: Send + Sync {
    fn on_action(&self, extension: &Arc<dyn WebExtension>, action: ExtensionAction);

    /// Returns the engine session the popup should render into, if any.
    fn on_toggle_popup(
        &self,
        _extension: &Arc<dyn WebExtension>,
        _action: ExtensionAction,
    ) -> Option<EngineBinding> {
        None
    }
}

/// Lifecycle callbacks the runtime delivers. Any thread may call them.
pub trait WebExtensionDelegate: Send + Sync {
    /// An extension asked for a new tab backed by `engine_session`.
    fn on_new_tab(
        &self,
        extension: &Arc<dyn WebExtension>,
        engine_session: EngineBinding,
        url: &str,
    );

    /// Returns `false` when no tab matches, so the runtime can fall back.
    fn on_close_tab(
        &self,
        extension: &Arc<dyn WebExtension>,
        engine_session: &EngineBinding,
    ) -> bool;

    fn on_installed(&self, extension: &Arc<dyn WebExtension>);

    /// The extension defined (or changed) its global action.
    fn on_action_defined(&self, extension: &Arc<dyn WebExtension>, action: ExtensionAction);

    /// Returns the engine session to keep rendering the popup into, or `None`
    /// when the toggle was fully handled.
    fn on_toggle_action_popup(
        &self,
        extension: &Arc<dyn WebExtension>,
        engine_session: EngineBinding,
        action: ExtensionAction,
    ) -> Option<EngineBinding>;
}

pub trait WebExtensionRuntime: Send + Sync {
    fn register_delegate(&self, delegate: Arc<dyn WebExtensionDelegate>);

    fn install_extension(
        &self,
        id: &str,
        url: &str,
        on_complete: Completion<Arc<dyn WebExtension>>,
    );

    fn list_installed_extensions(&self, on_complete: Completion<Vec<Arc<dyn WebExtension>>>);
}
