//! Action vocabulary
//!
//! Every state change is described by one of these values and applied by
//! [`crate::reduce`].

use crate::engine::EngineBinding;
use crate::extension::{ExtensionAction, ExtensionState};
use crate::session::SessionState;

#[derive(Debug, Clone)]
pub enum Action {
    /// Append a session
    AddSession { session: SessionState },
    RemoveSession { id: String },
    SelectSession { id: String },
    /// Attach the runtime's engine context to a session
    LinkRuntimeSession {
        session_id: String,
        binding: EngineBinding,
    },
    InstallExtension { extension: ExtensionState },
    /// Replace an extension's global action
    UpdateExtensionAction {
        extension_id: String,
        action: ExtensionAction,
    },
    /// Replace an extension's action for one session
    UpdateSessionExtensionAction {
        session_id: String,
        extension_id: String,
        action: ExtensionAction,
    },
    UpdateExtensionPopupSession {
        extension_id: String,
        session_id: Option<String>,
    },
}

impl Action {
    pub fn kind(&self) -> &'static str {
        match self {
            Action::AddSession { .. } => "add_session",
            Action::RemoveSession { .. } => "remove_session",
            Action::SelectSession { .. } => "select_session",
            Action::LinkRuntimeSession { .. } => "link_runtime_session",
            Action::InstallExtension { .. } => "install_extension",
            Action::UpdateExtensionAction { .. } => "update_extension_action",
            Action::UpdateSessionExtensionAction { .. } => "update_session_extension_action",
            Action::UpdateExtensionPopupSession { .. } => "update_extension_popup_session",
        }
    }
}
