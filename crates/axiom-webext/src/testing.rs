//! In-memory runtime fakes for tests

use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use axiom_state::{EngineBinding, EngineSession};

use crate::error::RuntimeError;
use crate::runtime::{
    ActionHandler, Completion, WebExtension, WebExtensionDelegate, WebExtensionRuntime,
};

#[derive(Debug)]
pub(crate) struct FakeEngineSession;

impl EngineSession for FakeEngineSession {}

impl FakeEngineSession {
    pub(crate) fn binding() -> EngineBinding {
        EngineBinding::from(Arc::new(FakeEngineSession))
    }
}

pub(crate) struct FakeExtension {
    id: String,
    url: String,
    supports_actions: bool,
    handlers: Mutex<Vec<(EngineBinding, Arc<dyn ActionHandler>)>>,
    registrations: AtomicUsize,
    lookups: AtomicUsize,
    fail_registrations: AtomicBool,
    panic_on_lookup: AtomicBool,
}

impl FakeExtension {
    fn build(id: &str, supports_actions: bool) -> Arc<Self> {
        Arc::new(Self {
            id: id.to_string(),
            url: format!("resource://axiom/extensions/{id}/"),
            supports_actions,
            handlers: Mutex::new(Vec::new()),
            registrations: AtomicUsize::new(0),
            lookups: AtomicUsize::new(0),
            fail_registrations: AtomicBool::new(false),
            panic_on_lookup: AtomicBool::new(false),
        })
    }

    pub(crate) fn with_actions(id: &str) -> Arc<Self> {
        Self::build(id, true)
    }

    pub(crate) fn without_actions(id: &str) -> Arc<Self> {
        Self::build(id, false)
    }

    /// Total successful `register_action_handler` calls.
    pub(crate) fn registrations(&self) -> usize {
        self.registrations.load(Ordering::SeqCst)
    }

    /// Total `has_action_handler` calls.
    pub(crate) fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub(crate) fn handler_count(&self, binding: &EngineBinding) -> usize {
        self.handlers
            .lock()
            .iter()
            .filter(|(b, _)| b == binding)
            .count()
    }

    pub(crate) fn handler(&self, binding: &EngineBinding) -> Option<Arc<dyn ActionHandler>> {
        self.handlers
            .lock()
            .iter()
            .find(|(b, _)| b == binding)
            .map(|(_, handler)| handler.clone())
    }

    pub(crate) fn fail_registrations(&self) {
        self.fail_registrations.store(true, Ordering::SeqCst);
    }

    /// The next `has_action_handler` call panics.
    pub(crate) fn panic_on_next_lookup(&self) {
        self.panic_on_lookup.store(true, Ordering::SeqCst);
    }
}

impl fmt::Debug for FakeExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FakeExtension")
            .field("id", &self.id)
            .field("supports_actions", &self.supports_actions)
            .finish()
    }
}

impl WebExtension for FakeExtension {
    fn id(&self) -> &str {
        &self.id
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn supports_actions(&self) -> bool {
        self.supports_actions
    }

    fn register_action_handler(
        &self,
        session: &EngineBinding,
        handler: Arc<dyn ActionHandler>,
    ) -> Result<(), RuntimeError> {
        if self.fail_registrations.load(Ordering::SeqCst) {
            return Err(RuntimeError::Registration(format!(
                "{} rejected handler",
                self.id
            )));
        }
        self.handlers.lock().push((session.clone(), handler));
        self.registrations.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn has_action_handler(&self, session: &EngineBinding) -> bool {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.panic_on_lookup.swap(false, Ordering::SeqCst) {
            panic!("{} lookup failed", self.id);
        }
        self.handler_count(session) > 0
    }
}

#[derive(Default)]
pub(crate) struct FakeRuntime {
    delegate: Mutex<Option<Arc<dyn WebExtensionDelegate>>>,
    delegate_registrations: AtomicUsize,
    installed: Mutex<Vec<Arc<dyn WebExtension>>>,
    install_failure: Mutex<Option<String>>,
    list_failure: Mutex<Option<String>>,
}

impl FakeRuntime {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn with_installed(extensions: Vec<Arc<dyn WebExtension>>) -> Arc<Self> {
        let runtime = Self::default();
        *runtime.installed.lock() = extensions;
        Arc::new(runtime)
    }

    pub(crate) fn delegate(&self) -> Arc<dyn WebExtensionDelegate> {
        self.delegate
            .lock()
            .clone()
            .expect("no delegate registered")
    }

    pub(crate) fn delegate_registrations(&self) -> usize {
        self.delegate_registrations.load(Ordering::SeqCst)
    }

    pub(crate) fn fail_installs(&self, reason: &str) {
        *self.install_failure.lock() = Some(reason.to_string());
    }

    pub(crate) fn fail_listing(&self, reason: &str) {
        *self.list_failure.lock() = Some(reason.to_string());
    }
}

impl WebExtensionRuntime for FakeRuntime {
    fn register_delegate(&self, delegate: Arc<dyn WebExtensionDelegate>) {
        *self.delegate.lock() = Some(delegate);
        self.delegate_registrations.fetch_add(1, Ordering::SeqCst);
    }

    fn install_extension(
        &self,
        id: &str,
        _url: &str,
        on_complete: Completion<Arc<dyn WebExtension>>,
    ) {
        if let Some(reason) = self.install_failure.lock().clone() {
            on_complete(Err(RuntimeError::InstallFailed {
                id: id.to_string(),
                reason,
            }));
            return;
        }

        let extension: Arc<dyn WebExtension> = FakeExtension::with_actions(id);
        self.installed.lock().push(extension.clone());
        on_complete(Ok(extension));
    }

    fn list_installed_extensions(&self, on_complete: Completion<Vec<Arc<dyn WebExtension>>>) {
        if let Some(reason) = self.list_failure.lock().clone() {
            on_complete(Err(RuntimeError::Other(reason)));
            return;
        }
        let installed = self.installed.lock().clone();
        on_complete(Ok(installed));
    }
}
