//! In-memory thread store.
//!
//! Keeps an authoritative copy of every thread and message, standing in for
//! the remote feedback service. Fetches copy from the authoritative side into
//! the [`SharedThreadData`] readers see, so callers observe the same
//! "visible only after refresh" behaviour as with a real backend.

use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use uuid::Uuid;

use crate::error::{ParleyError, Result};
use crate::thread::{Message, SharedThreadData, Thread, ThreadData};
use crate::types::{SuggestionAction, ThreadStatus};

use super::ThreadStore;

/// A request served by [`MemoryThreadStore`], recorded in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    FetchThreads,
    FetchMessages {
        thread_id: String,
    },
    CreateThread {
        subject: String,
        text: String,
    },
    AddMessage {
        thread_id: String,
        text: String,
        status: ThreadStatus,
    },
    ResolveSuggestion {
        thread_id: String,
        action: SuggestionAction,
        commit_message: Option<String>,
    },
}

pub struct MemoryThreadStore {
    /// What readers see; only changes on fetch.
    visible: SharedThreadData,
    /// Authoritative thread lists, messages stripped.
    threads: RwLock<ThreadData>,
    /// Authoritative message log per thread.
    messages: DashMap<String, Vec<Message>>,
    calls: Mutex<Vec<StoreCall>>,
    author: Option<String>,
}

impl MemoryThreadStore {
    pub fn new() -> Self {
        Self::from_data(ThreadData::default())
    }

    /// Seed the authoritative side. Nothing is visible until the first fetch.
    pub fn from_data(mut data: ThreadData) -> Self {
        let messages = DashMap::new();
        for thread in data
            .feedback_threads
            .iter_mut()
            .chain(data.suggestion_threads.iter_mut())
        {
            let log = std::mem::take(&mut thread.messages);
            thread.message_count = log.len();
            messages.insert(thread.thread_id.clone(), log);
        }

        Self {
            visible: SharedThreadData::default(),
            threads: RwLock::new(data),
            messages,
            calls: Mutex::new(Vec::new()),
            author: None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let data: ThreadData = serde_json::from_str(json)?;
        Ok(Self::from_data(data))
    }

    /// Username recorded on messages this store creates.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Requests served so far.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().clone()
    }

    /// Authoritative copy of a thread including its full message log.
    pub fn stored_thread(&self, thread_id: &str) -> Option<Thread> {
        let mut thread = self.threads.read().find(thread_id).cloned()?;
        thread.messages = self
            .messages
            .get(thread_id)
            .map(|log| log.value().clone())
            .unwrap_or_default();
        Some(thread)
    }

    fn record(&self, call: StoreCall) {
        self.calls.lock().push(call);
    }

    fn now_millis() -> i64 {
        jiff::Timestamp::now().as_millisecond()
    }

    fn append_message(
        &self,
        thread_id: &str,
        text: &str,
        updated_status: Option<ThreadStatus>,
    ) -> usize {
        let mut log = self.messages.entry(thread_id.to_string()).or_default();
        let message_id = log.len() as u64;
        log.push(Message {
            message_id,
            author_username: self.author.clone(),
            text: text.to_string(),
            updated_status,
            updated_subject: None,
            created_on: Self::now_millis(),
        });
        log.len()
    }
}

impl Default for MemoryThreadStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ThreadStore for MemoryThreadStore {
    fn data(&self) -> SharedThreadData {
        self.visible.clone()
    }

    async fn fetch_threads(&self) -> Result<()> {
        self.record(StoreCall::FetchThreads);
        let ThreadData {
            feedback_threads,
            suggestion_threads,
        } = self.threads.read().clone();
        self.visible
            .update(|data| data.replace_lists(feedback_threads, suggestion_threads));
        Ok(())
    }

    async fn fetch_messages(&self, thread_id: &str) -> Result<()> {
        self.record(StoreCall::FetchMessages {
            thread_id: thread_id.to_string(),
        });
        let log = self
            .messages
            .get(thread_id)
            .map(|log| log.value().clone())
            .ok_or_else(|| ParleyError::ThreadNotFound(thread_id.to_string()))?;

        if !self.visible.set_messages(thread_id, log) {
            tracing::debug!("Thread {thread_id} no longer listed; dropping fetched messages");
        }
        Ok(())
    }

    async fn create_thread(&self, subject: &str, text: &str) -> Result<String> {
        self.record(StoreCall::CreateThread {
            subject: subject.to_string(),
            text: text.to_string(),
        });

        let thread_id = Uuid::new_v4().simple().to_string();
        let mut thread = Thread::new(thread_id.clone(), subject);
        thread.original_author_username = self.author.clone();
        thread.last_updated = Self::now_millis();
        thread.summary = Some(text.to_string());

        self.messages.insert(thread_id.clone(), Vec::new());
        thread.message_count = self.append_message(&thread_id, text, None);
        self.threads.write().feedback_threads.push(thread);

        Ok(thread_id)
    }

    async fn add_message(&self, thread_id: &str, text: &str, status: ThreadStatus) -> Result<()> {
        self.record(StoreCall::AddMessage {
            thread_id: thread_id.to_string(),
            text: text.to_string(),
            status,
        });

        let previous = self
            .threads
            .read()
            .find(thread_id)
            .map(|t| t.status)
            .ok_or_else(|| ParleyError::ThreadNotFound(thread_id.to_string()))?;
        let updated_status = (previous != status).then_some(status);

        let count = self.append_message(thread_id, text, updated_status);
        let now = Self::now_millis();
        if let Some(thread) = self.threads.write().find_mut(thread_id) {
            thread.status = status;
            thread.message_count = count;
            thread.last_updated = now;
        }

        // Posting reloads the thread's messages, as the feedback service does.
        if let Some(log) = self.messages.get(thread_id).map(|log| log.value().clone()) {
            self.visible.set_messages(thread_id, log);
        }
        Ok(())
    }

    async fn resolve_suggestion(
        &self,
        thread_id: &str,
        action: SuggestionAction,
        commit_message: Option<&str>,
    ) -> Result<()> {
        self.record(StoreCall::ResolveSuggestion {
            thread_id: thread_id.to_string(),
            action,
            commit_message: commit_message.map(str::to_string),
        });

        let status = match action {
            SuggestionAction::Accept => ThreadStatus::Fixed,
            SuggestionAction::Reject => ThreadStatus::Ignored,
        };

        {
            let mut threads = self.threads.write();
            let thread = threads
                .find_mut(thread_id)
                .ok_or_else(|| ParleyError::ThreadNotFound(thread_id.to_string()))?;
            if thread.suggestion.is_none() {
                return Err(ParleyError::NoSuggestion(thread_id.to_string()));
            }
            if thread.status != ThreadStatus::Open {
                return Err(ParleyError::Store(format!(
                    "suggestion in thread {thread_id} is already resolved ({})",
                    thread.status
                )));
            }
            thread.status = status;
            thread.last_updated = Self::now_millis();
        }

        let text = match action {
            SuggestionAction::Accept => commit_message
                .filter(|m| !m.is_empty())
                .unwrap_or("Suggestion accepted."),
            SuggestionAction::Reject => "Suggestion rejected.",
        };
        let count = self.append_message(thread_id, text, Some(status));
        if let Some(thread) = self.threads.write().find_mut(thread_id) {
            thread.message_count = count;
        }
        Ok(())
    }
}
