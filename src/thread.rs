//! Thread, message and suggestion data shared between the store and the panel.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::exploration::ContentBlock;
use crate::types::ThreadStatus;

/// A single message posted to a thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: u64,
    #[serde(default)]
    pub author_username: Option<String>,
    pub text: String,
    /// Status the thread was set to by this message, if it changed.
    #[serde(default)]
    pub updated_status: Option<ThreadStatus>,
    #[serde(default)]
    pub updated_subject: Option<String>,
    /// Milliseconds since the Unix epoch.
    pub created_on: i64,
}

/// A proposed change to one state's content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub state_name: String,
    pub state_content: ContentBlock,
    /// Exploration version the suggestion was written against.
    pub exploration_version: u64,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Suggestion {
    /// The proposed replacement content.
    pub fn proposed_value(&self) -> &str {
        &self.state_content.value
    }
}

/// A discussion thread. Suggestion threads carry an embedded [`Suggestion`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thread {
    pub thread_id: String,
    pub status: ThreadStatus,
    pub subject: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub state_name: Option<String>,
    #[serde(default)]
    pub original_author_username: Option<String>,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub last_updated: i64,
    #[serde(default)]
    pub message_count: usize,
    #[serde(default)]
    pub suggestion: Option<Suggestion>,
    /// Lazily loaded; empty until the thread's messages are fetched.
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Thread {
    pub fn new(thread_id: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            thread_id: thread_id.into(),
            status: ThreadStatus::Open,
            subject: subject.into(),
            summary: None,
            state_name: None,
            original_author_username: None,
            last_updated: 0,
            message_count: 0,
            suggestion: None,
            messages: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: ThreadStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.state_name = Some(suggestion.state_name.clone());
        self.suggestion = Some(suggestion);
        self
    }

    pub fn is_suggestion_thread(&self) -> bool {
        self.suggestion.is_some()
    }
}

/// The thread lists as last fetched from the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThreadData {
    #[serde(default)]
    pub feedback_threads: Vec<Thread>,
    #[serde(default)]
    pub suggestion_threads: Vec<Thread>,
}

impl ThreadData {
    /// Iterate the merged pool: feedback threads first, then suggestion threads.
    pub fn iter(&self) -> impl Iterator<Item = &Thread> {
        self.feedback_threads
            .iter()
            .chain(self.suggestion_threads.iter())
    }

    pub fn find(&self, thread_id: &str) -> Option<&Thread> {
        self.iter().find(|t| t.thread_id == thread_id)
    }

    pub fn find_mut(&mut self, thread_id: &str) -> Option<&mut Thread> {
        self.feedback_threads
            .iter_mut()
            .chain(self.suggestion_threads.iter_mut())
            .find(|t| t.thread_id == thread_id)
    }

    pub fn len(&self) -> usize {
        self.feedback_threads.len() + self.suggestion_threads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace both lists, carrying over messages already loaded for threads
    /// that are still present so a refresh doesn't blank an open conversation.
    pub fn replace_lists(&mut self, feedback: Vec<Thread>, suggestions: Vec<Thread>) {
        let previous = std::mem::take(self);
        self.feedback_threads = feedback;
        self.suggestion_threads = suggestions;

        for thread in self
            .feedback_threads
            .iter_mut()
            .chain(self.suggestion_threads.iter_mut())
        {
            if thread.messages.is_empty()
                && let Some(old) = previous.find(&thread.thread_id)
            {
                thread.messages = old.messages.clone();
            }
        }
    }
}

/// Thread data shared between a store and any number of readers.
///
/// Locks are short-lived; never hold a guard across an `.await`.
#[derive(Debug, Clone, Default)]
pub struct SharedThreadData {
    inner: Arc<RwLock<ThreadData>>,
}

impl SharedThreadData {
    pub fn new(data: ThreadData) -> Self {
        Self {
            inner: Arc::new(RwLock::new(data)),
        }
    }

    pub fn snapshot(&self) -> ThreadData {
        self.inner.read().clone()
    }

    pub fn find(&self, thread_id: &str) -> Option<Thread> {
        self.inner.read().find(thread_id).cloned()
    }

    pub fn contains(&self, thread_id: &str) -> bool {
        self.inner.read().find(thread_id).is_some()
    }

    pub fn read<R>(&self, f: impl FnOnce(&ThreadData) -> R) -> R {
        f(&self.inner.read())
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut ThreadData) -> R) -> R {
        f(&mut self.inner.write())
    }

    /// Store fetched messages on a thread. Returns false if the thread is no
    /// longer in the pool (e.g. dropped by a refresh while the fetch ran).
    pub fn set_messages(&self, thread_id: &str, messages: Vec<Message>) -> bool {
        self.update(|data| match data.find_mut(thread_id) {
            Some(thread) => {
                thread.message_count = messages.len();
                thread.messages = messages;
                true
            }
            None => false,
        })
    }
}
