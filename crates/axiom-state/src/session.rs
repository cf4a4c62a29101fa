//! Session (tab) state

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

use crate::engine::EngineBinding;
use crate::extension::ExtensionAction;

#[derive(Debug, Clone, Serialize)]
pub struct SessionState {
    /// Unique identifier
    pub id: String,
    /// Content URL
    pub url: String,
    /// Engine context, linked once the runtime has created it
    #[serde(skip)]
    pub engine_binding: Option<EngineBinding>,
    /// Session-scoped extension actions, keyed by extension id
    pub extension_actions: HashMap<String, ExtensionAction>,
    /// When the session was created
    pub created_at: DateTime<Utc>,
}

impl SessionState {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), url)
    }

    pub fn with_id(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            engine_binding: None,
            extension_actions: HashMap::new(),
            created_at: Utc::now(),
        }
    }

    pub fn is_bound(&self) -> bool {
        self.engine_binding.is_some()
    }

    pub fn is_bound_to(&self, binding: &EngineBinding) -> bool {
        self.engine_binding.as_ref() == Some(binding)
    }
}
