//! Runtime binding handles
//!
//! The runtime hands out stateful engine sessions with identity. The state
//! layer never looks inside them; it only needs to know whether two bindings
//! refer to the same engine context.

use std::fmt;
use std::sync::Arc;

/// An engine-level browsing context owned by the runtime.
pub trait EngineSession: Send + Sync + fmt::Debug {}

/// Comparable identity of an [`EngineBinding`], for logging and hashing.
///
/// Only meaningful while the binding it was taken from is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingId(usize);

impl fmt::Display for BindingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "engine-{:x}", self.0)
    }
}

/// Shared handle to an engine session. Equality is handle identity.
#[derive(Clone)]
pub struct EngineBinding(Arc<dyn EngineSession>);

impl EngineBinding {
    pub fn new(session: Arc<dyn EngineSession>) -> Self {
        Self(session)
    }

    pub fn id(&self) -> BindingId {
        BindingId(Arc::as_ptr(&self.0) as *const () as usize)
    }
}

impl<S: EngineSession + 'static> From<Arc<S>> for EngineBinding {
    fn from(session: Arc<S>) -> Self {
        Self(session)
    }
}

impl PartialEq for EngineBinding {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for EngineBinding {}

impl fmt::Debug for EngineBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EngineBinding").field(&self.id()).finish()
    }
}
