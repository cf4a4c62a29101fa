//! Session registry
//!
//! Tracks the installed extensions and the last-seen engine binding of every
//! session. The binding projection is what lets a snapshot pass skip sessions
//! whose binding did not change.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use axiom_state::{BrowserState, EngineBinding};

use crate::runtime::WebExtension;

#[derive(Default)]
pub struct SessionRegistry {
    /// Installed extensions keyed by id
    installed: BTreeMap<String, Arc<dyn WebExtension>>,
    /// Session id -> binding as of the last processed snapshot
    bindings: HashMap<String, Option<EngineBinding>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the extension was not tracked yet.
    pub fn insert_extension(&mut self, extension: Arc<dyn WebExtension>) -> bool {
        self.installed
            .insert(extension.id().to_string(), extension)
            .is_none()
    }

    pub fn extension(&self, extension_id: &str) -> Option<&Arc<dyn WebExtension>> {
        self.installed.get(extension_id)
    }

    pub fn extensions(&self) -> impl Iterator<Item = &Arc<dyn WebExtension>> {
        self.installed.values()
    }

    pub fn extension_count(&self) -> usize {
        self.installed.len()
    }

    /// Diff `state` against the last-seen projection and adopt it.
    ///
    /// Returns the sessions whose binding changed and is now present. New
    /// sessions count as changed; removed sessions are forgotten.
    pub fn changed_bindings(&mut self, state: &BrowserState) -> Vec<(String, EngineBinding)> {
        let mut changed = Vec::new();
        let mut next = HashMap::with_capacity(state.sessions.len());

        for session in &state.sessions {
            let current = session.engine_binding.clone();
            let previous = self.bindings.get(&session.id);

            if previous != Some(&current) {
                if let Some(binding) = &current {
                    changed.push((session.id.clone(), binding.clone()));
                }
            }
            next.insert(session.id.clone(), current);
        }

        self.bindings = next;
        changed
    }

    /// Sessions bound as of the last processed snapshot.
    pub fn bound_session_count(&self) -> usize {
        self.bindings.values().filter(|b| b.is_some()).count()
    }
}
