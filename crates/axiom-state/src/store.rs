//! Single-writer state store
//!
//! Actions are queued and applied one at a time by a writer task, in dispatch
//! order. `dispatch` never waits for the reducer. Each applied action publishes
//! a new snapshot to every subscriber.

use futures_util::Stream;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};

use crate::action::Action;
use crate::error::StateError;
use crate::reducer::reduce;
use crate::state::BrowserState;
use crate::Result;

/// Hook that sees every action, in application order, before it is reduced.
pub trait Middleware: Send + Sync {
    fn on_action(&self, state: &BrowserState, action: &Action);
}

/// Middleware that records every applied action.
#[derive(Default)]
pub struct ActionLog {
    actions: Mutex<Vec<Action>>,
}

impl ActionLog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn actions(&self) -> Vec<Action> {
        self.actions.lock().clone()
    }

    pub fn kinds(&self) -> Vec<&'static str> {
        self.actions.lock().iter().map(Action::kind).collect()
    }

    pub fn count(&self, kind: &str) -> usize {
        self.actions
            .lock()
            .iter()
            .filter(|a| a.kind() == kind)
            .count()
    }

    pub fn clear(&self) {
        self.actions.lock().clear();
    }
}

impl Middleware for ActionLog {
    fn on_action(&self, _state: &BrowserState, action: &Action) {
        self.actions.lock().push(action.clone());
    }
}

enum Envelope {
    Action(Action),
    Barrier(oneshot::Sender<()>),
}

/// Handle to the store. Clones share the same writer and snapshots.
#[derive(Clone)]
pub struct Store {
    queue: mpsc::UnboundedSender<Envelope>,
    snapshots: watch::Receiver<Arc<BrowserState>>,
}

impl Store {
    /// Spawns the writer task; must be called within a Tokio runtime.
    pub fn new(initial: BrowserState) -> Self {
        Self::with_middleware(initial, Vec::new())
    }

    pub fn with_middleware(initial: BrowserState, middleware: Vec<Arc<dyn Middleware>>) -> Self {
        let (queue, inbox) = mpsc::unbounded_channel();
        let (publisher, snapshots) = watch::channel(Arc::new(initial));

        tokio::spawn(run_writer(inbox, publisher, middleware));

        Self { queue, snapshots }
    }

    /// Latest published snapshot.
    pub fn state(&self) -> Arc<BrowserState> {
        self.snapshots.borrow().clone()
    }

    /// Queue an action without waiting for it to be applied.
    pub fn dispatch(&self, action: Action) {
        let kind = action.kind();
        if self.queue.send(Envelope::Action(action)).is_err() {
            tracing::warn!(action = kind, "Dropping action, store is closed");
        }
    }

    /// Queue an action and wait until it has been applied.
    pub async fn dispatch_and_wait(&self, action: Action) -> Result<()> {
        self.dispatch(action);
        self.settled().await
    }

    /// Wait until every action dispatched before this call has been applied.
    pub async fn settled(&self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.queue
            .send(Envelope::Barrier(tx))
            .map_err(|_| StateError::Closed)?;
        rx.await.map_err(|_| StateError::Closed)
    }

    /// Stream of snapshots, starting with the current one.
    ///
    /// Snapshots published while the subscriber is busy are coalesced; the
    /// next item is always the latest total state.
    pub fn subscribe(&self) -> impl Stream<Item = Arc<BrowserState>> + Send + 'static {
        let mut rx = self.snapshots.clone();
        rx.mark_changed();

        futures_util::stream::unfold(rx, |mut rx| async move {
            rx.changed().await.ok()?;
            let state = rx.borrow_and_update().clone();
            Some((state, rx))
        })
    }
}

async fn run_writer(
    mut inbox: mpsc::UnboundedReceiver<Envelope>,
    publisher: watch::Sender<Arc<BrowserState>>,
    middleware: Vec<Arc<dyn Middleware>>,
) {
    while let Some(envelope) = inbox.recv().await {
        match envelope {
            Envelope::Action(action) => {
                let current = publisher.borrow().clone();
                for hook in &middleware {
                    hook.on_action(&current, &action);
                }

                tracing::trace!(action = action.kind(), "Applying action");
                publisher.send_replace(Arc::new(reduce(&current, &action)));
            }
            Envelope::Barrier(done) => {
                let _ = done.send(());
            }
        }
    }

    tracing::debug!("Store writer stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionState;
    use futures_util::StreamExt;

    fn add(id: &str) -> Action {
        Action::AddSession {
            session: SessionState::with_id(id, ""),
        }
    }

    #[tokio::test]
    async fn test_actions_apply_in_order() {
        let log = ActionLog::new();
        let store = Store::with_middleware(
            BrowserState::default(),
            vec![log.clone() as Arc<dyn Middleware>],
        );

        store.dispatch(add("a"));
        store.dispatch(add("b"));
        store.dispatch(Action::SelectSession {
            id: "b".to_string(),
        });
        store.dispatch(Action::RemoveSession {
            id: "a".to_string(),
        });
        store.settled().await.unwrap();

        let state = store.state();
        assert_eq!(state.sessions.len(), 1);
        assert_eq!(state.selected_session_id.as_deref(), Some("b"));
        assert_eq!(
            log.kinds(),
            vec!["add_session", "add_session", "select_session", "remove_session"]
        );
        assert_eq!(log.count("add_session"), 2);
    }

    #[tokio::test]
    async fn test_subscribe_starts_with_current_snapshot() {
        let store = Store::new(BrowserState::default());
        store.dispatch_and_wait(add("a")).await.unwrap();

        let mut snapshots = Box::pin(store.subscribe());
        let first = snapshots.next().await.unwrap();
        assert_eq!(first.sessions.len(), 1);

        store.dispatch(add("b"));
        let second = snapshots.next().await.unwrap();
        assert_eq!(second.sessions.len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_dispatchers_are_serialized() {
        let store = Store::new(BrowserState::default());

        let mut tasks = Vec::new();
        for worker in 0..4 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                for n in 0..25 {
                    store.dispatch(add(&format!("{worker}-{n}")));
                }
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }
        store.settled().await.unwrap();

        assert_eq!(store.state().sessions.len(), 100);
    }
}
