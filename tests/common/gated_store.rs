//! A thread store wrapper that can hold or fail individual requests.
//!
//! Holding a request lets a test observe panel state while the request is in
//! flight; the test then releases it and the request completes normally.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use parley::error::{ParleyError, Result};
use parley::store::{MemoryThreadStore, ThreadStore};
use parley::thread::{SharedThreadData, ThreadData};
use parley::types::{SuggestionAction, ThreadStatus};
use tokio::sync::Notify;

/// A store request a test can hold or fail
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Op {
    FetchThreads,
    FetchMessages(String),
    CreateThread,
    AddMessage,
    ResolveSuggestion,
}

/// A one-shot hold on a request.
#[derive(Debug, Default)]
pub struct Gate {
    entered: Notify,
    release: Notify,
}

impl Gate {
    /// Wait until the held request has started.
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    /// Let the held request continue.
    pub fn release(&self) {
        self.release.notify_one();
    }
}

pub struct GatedStore {
    inner: MemoryThreadStore,
    gates: Mutex<HashMap<Op, Arc<Gate>>>,
    failures: Mutex<HashMap<Op, String>>,
}

impl GatedStore {
    pub fn new(data: ThreadData) -> Self {
        Self {
            inner: MemoryThreadStore::from_data(data).with_author("editor"),
            gates: Mutex::new(HashMap::new()),
            failures: Mutex::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &MemoryThreadStore {
        &self.inner
    }

    /// Hold the next `op` request until the returned gate is released.
    pub fn gate(&self, op: Op) -> Arc<Gate> {
        let gate = Arc::new(Gate::default());
        self.gates.lock().insert(op, Arc::clone(&gate));
        gate
    }

    /// Fail every `op` request with a store error until cleared.
    pub fn fail(&self, op: Op, message: &str) {
        self.failures.lock().insert(op, message.to_string());
    }

    pub fn clear_failures(&self) {
        self.failures.lock().clear();
    }

    async fn checkpoint(&self, op: Op) -> Result<()> {
        let gate = self.gates.lock().remove(&op);
        if let Some(gate) = gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }

        let failure = self.failures.lock().get(&op).cloned();
        match failure {
            Some(message) => Err(ParleyError::Store(message)),
            None => Ok(()),
        }
    }
}

impl ThreadStore for GatedStore {
    fn data(&self) -> SharedThreadData {
        self.inner.data()
    }

    async fn fetch_threads(&self) -> Result<()> {
        self.checkpoint(Op::FetchThreads).await?;
        self.inner.fetch_threads().await
    }

    async fn fetch_messages(&self, thread_id: &str) -> Result<()> {
        self.checkpoint(Op::FetchMessages(thread_id.to_string()))
            .await?;
        self.inner.fetch_messages(thread_id).await
    }

    async fn create_thread(&self, subject: &str, text: &str) -> Result<String> {
        self.checkpoint(Op::CreateThread).await?;
        self.inner.create_thread(subject, text).await
    }

    async fn add_message(&self, thread_id: &str, text: &str, status: ThreadStatus) -> Result<()> {
        self.checkpoint(Op::AddMessage).await?;
        self.inner.add_message(thread_id, text, status).await
    }

    async fn resolve_suggestion(
        &self,
        thread_id: &str,
        action: SuggestionAction,
        commit_message: Option<&str>,
    ) -> Result<()> {
        self.checkpoint(Op::ResolveSuggestion).await?;
        self.inner
            .resolve_suggestion(thread_id, action, commit_message)
            .await
    }
}
