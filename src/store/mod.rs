//! Thread store interface.
//!
//! A store owns the thread/message data and talks to whatever service
//! persists it. The panel reads the store's [`SharedThreadData`] and asks the
//! store to refresh or mutate it.

pub mod memory;

use crate::error::Result;
use crate::thread::SharedThreadData;
use crate::types::{SuggestionAction, ThreadStatus};

pub use memory::{MemoryThreadStore, StoreCall};

/// Common interface for thread stores
pub trait ThreadStore: Send + Sync {
    /// The shared thread lists this store populates.
    fn data(&self) -> SharedThreadData;

    /// Refresh both thread lists.
    fn fetch_threads(&self) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Load a thread's messages into the shared data.
    fn fetch_messages(
        &self,
        thread_id: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Create a thread with an initial message. Returns the new thread ID.
    fn create_thread(
        &self,
        subject: &str,
        text: &str,
    ) -> impl std::future::Future<Output = Result<String>> + Send;

    /// Post a message, setting the thread to `status`.
    fn add_message(
        &self,
        thread_id: &str,
        text: &str,
        status: ThreadStatus,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Accept or reject the suggestion embedded in a thread.
    fn resolve_suggestion(
        &self,
        thread_id: &str,
        action: SuggestionAction,
        commit_message: Option<&str>,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
