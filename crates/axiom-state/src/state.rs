//! Browser state snapshot

use serde::Serialize;
use std::collections::HashMap;

use crate::engine::EngineBinding;
use crate::extension::{ExtensionAction, ExtensionState};
use crate::session::SessionState;

/// Point-in-time value of the whole browser state.
///
/// Snapshots are never mutated once published; the reducer produces a new one
/// for every action.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BrowserState {
    /// Sessions in display order
    pub sessions: Vec<SessionState>,
    /// Installed extensions keyed by id
    pub extensions: HashMap<String, ExtensionState>,
    /// At most one selected session
    pub selected_session_id: Option<String>,
}

impl BrowserState {
    pub fn find_session(&self, session_id: &str) -> Option<&SessionState> {
        self.sessions.iter().find(|s| s.id == session_id)
    }

    pub fn find_session_by_binding(&self, binding: &EngineBinding) -> Option<&SessionState> {
        self.sessions.iter().find(|s| s.is_bound_to(binding))
    }

    pub fn is_selected(&self, session_id: &str) -> bool {
        self.selected_session_id.as_deref() == Some(session_id)
    }

    pub fn extension(&self, extension_id: &str) -> Option<&ExtensionState> {
        self.extensions.get(extension_id)
    }

    /// The extension's popup session, if it is recorded and still exists.
    pub fn popup_session(&self, extension_id: &str) -> Option<&SessionState> {
        self.extension(extension_id)?
            .popup_session_id
            .as_deref()
            .and_then(|id| self.find_session(id))
    }

    /// Sessions that currently have an engine binding.
    pub fn bound_sessions(&self) -> impl Iterator<Item = (&str, &EngineBinding)> {
        self.sessions.iter().filter_map(|s| {
            s.engine_binding
                .as_ref()
                .map(|binding| (s.id.as_str(), binding))
        })
    }

    /// Global extension action with the session-scoped one layered on top.
    pub fn effective_action(
        &self,
        session_id: &str,
        extension_id: &str,
    ) -> Option<ExtensionAction> {
        let global = self.extension(extension_id).and_then(|e| e.action.as_ref());
        let scoped = self
            .find_session(session_id)
            .and_then(|s| s.extension_actions.get(extension_id));

        match (global, scoped) {
            (Some(global), Some(scoped)) => Some(global.with_override(scoped)),
            (Some(action), None) | (None, Some(action)) => Some(action.clone()),
            (None, None) => None,
        }
    }
}
