//! Web extension state

use serde::{Deserialize, Serialize};

/// Toolbar action an extension declares (title, badge, enabled flag).
///
/// Every field is optional so a session-scoped action can override only the
/// fields it sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionAction {
    pub title: Option<String>,
    pub enabled: Option<bool>,
    pub badge_text: Option<String>,
    /// ARGB
    pub badge_text_color: Option<u32>,
    /// ARGB
    pub badge_background_color: Option<u32>,
}

impl ExtensionAction {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Layer `other` on top of `self`; fields set in `other` win.
    pub fn with_override(&self, other: &ExtensionAction) -> ExtensionAction {
        ExtensionAction {
            title: other.title.clone().or_else(|| self.title.clone()),
            enabled: other.enabled.or(self.enabled),
            badge_text: other.badge_text.clone().or_else(|| self.badge_text.clone()),
            badge_text_color: other.badge_text_color.or(self.badge_text_color),
            badge_background_color: other.badge_background_color.or(self.badge_background_color),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionState {
    /// Stable extension identifier
    pub id: String,
    /// Location the extension was installed from
    pub url: String,
    /// Whether the extension declares toolbar actions
    pub supports_actions: bool,
    /// Global action, absent until the runtime reports one
    pub action: Option<ExtensionAction>,
    /// Session currently hosting the action popup
    pub popup_session_id: Option<String>,
}

impl ExtensionState {
    pub fn new(id: impl Into<String>, url: impl Into<String>, supports_actions: bool) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            supports_actions,
            action: None,
            popup_session_id: None,
        }
    }

    /// Entry for an extension the store has not seen installed yet.
    pub(crate) fn placeholder(id: &str) -> Self {
        Self::new(id, "", false)
    }
}
