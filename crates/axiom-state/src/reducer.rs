//! Reducer
//!
//! Pure function from (snapshot, action) to the next snapshot. Actions that
//! reference unknown sessions are no-ops rather than errors; the runtime and
//! the store evolve independently and may briefly disagree.

use crate::action::Action;
use crate::extension::ExtensionState;
use crate::state::BrowserState;

pub fn reduce(state: &BrowserState, action: &Action) -> BrowserState {
    let mut next = state.clone();

    match action {
        Action::AddSession { session } => {
            if next.find_session(&session.id).is_some() {
                tracing::debug!(session_id = %session.id, "Ignoring duplicate session");
                return next;
            }
            if next.selected_session_id.is_none() {
                next.selected_session_id = Some(session.id.clone());
            }
            next.sessions.push(session.clone());
        }

        Action::RemoveSession { id } => {
            let Some(index) = next.sessions.iter().position(|s| &s.id == id) else {
                return next;
            };
            next.sessions.remove(index);

            if next.is_selected(id) {
                next.selected_session_id = next
                    .sessions
                    .get(index.min(next.sessions.len().saturating_sub(1)))
                    .map(|s| s.id.clone());
            }

            for extension in next.extensions.values_mut() {
                if extension.popup_session_id.as_ref() == Some(id) {
                    extension.popup_session_id = None;
                }
            }
        }

        Action::SelectSession { id } => {
            if next.find_session(id).is_some() {
                next.selected_session_id = Some(id.clone());
            }
        }

        Action::LinkRuntimeSession {
            session_id,
            binding,
        } => {
            if let Some(session) = next.sessions.iter_mut().find(|s| &s.id == session_id) {
                session.engine_binding = Some(binding.clone());
            }
        }

        Action::InstallExtension { extension } => {
            let mut installed = extension.clone();
            if let Some(existing) = next.extensions.get(&extension.id) {
                installed.action = installed.action.or_else(|| existing.action.clone());
                installed.popup_session_id = installed
                    .popup_session_id
                    .or_else(|| existing.popup_session_id.clone());
            }
            next.extensions.insert(installed.id.clone(), installed);
        }

        Action::UpdateExtensionAction {
            extension_id,
            action,
        } => {
            next.extensions
                .entry(extension_id.clone())
                .or_insert_with(|| ExtensionState::placeholder(extension_id))
                .action = Some(action.clone());
        }

        Action::UpdateSessionExtensionAction {
            session_id,
            extension_id,
            action,
        } => {
            if let Some(session) = next.sessions.iter_mut().find(|s| &s.id == session_id) {
                session
                    .extension_actions
                    .insert(extension_id.clone(), action.clone());
            }
        }

        Action::UpdateExtensionPopupSession {
            extension_id,
            session_id,
        } => {
            next.extensions
                .entry(extension_id.clone())
                .or_insert_with(|| ExtensionState::placeholder(extension_id))
                .popup_session_id = session_id.clone();
        }
    }

    next
}
