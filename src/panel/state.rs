//! State types for the feedback panel

use std::sync::Arc;

use parking_lot::RwLock;

use crate::notice::Notice;
use crate::thread::{SharedThreadData, Thread};
use crate::types::ThreadStatus;

/// Loading message shown while the initial thread list is fetched
pub const LOADING_MESSAGE: &str = "Loading";

/// The message being composed for the active thread
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftMessage {
    /// Status the thread will be set to; defaults to the thread's own status
    pub status: Option<ThreadStatus>,
    pub text: String,
}

impl DraftMessage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A blank draft that keeps `status` as the thread's current status.
    pub fn for_status(status: Option<ThreadStatus>) -> Self {
        Self {
            status,
            text: String::new(),
        }
    }
}

/// UI-facing state owned by the panel
#[derive(Debug, Clone, Default)]
pub struct PanelState {
    pub active_thread_id: Option<String>,
    pub draft: DraftMessage,
    pub message_send_in_progress: bool,
    /// Empty when nothing is loading
    pub loading_message: String,
    pub notices: Vec<Notice>,
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        !self.loading_message.is_empty()
    }
}

/// Cloneable read access to a panel's state.
///
/// Renderers and tests hold a handle while the panel itself is busy in an
/// `.await`, so state changes made mid-operation are observable.
#[derive(Debug, Clone, Default)]
pub struct PanelHandle {
    state: Arc<RwLock<PanelState>>,
    threads: SharedThreadData,
}

impl PanelHandle {
    pub fn new(threads: SharedThreadData) -> Self {
        Self {
            state: Arc::new(RwLock::new(PanelState::new())),
            threads,
        }
    }

    pub fn snapshot(&self) -> PanelState {
        self.state.read().clone()
    }

    pub fn active_thread_id(&self) -> Option<String> {
        self.state.read().active_thread_id.clone()
    }

    /// The active thread as currently held in the shared thread data.
    pub fn active_thread(&self) -> Option<Thread> {
        let id = self.active_thread_id()?;
        self.threads.find(&id)
    }

    pub fn draft(&self) -> DraftMessage {
        self.state.read().draft.clone()
    }

    pub fn is_sending(&self) -> bool {
        self.state.read().message_send_in_progress
    }

    pub fn loading_message(&self) -> String {
        self.state.read().loading_message.clone()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.state.read().notices.clone()
    }

    pub fn threads(&self) -> &SharedThreadData {
        &self.threads
    }

    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut PanelState) -> R) -> R {
        f(&mut self.state.write())
    }

    pub(crate) fn push_notice(&self, notice: Notice) {
        self.update(|state| state.notices.push(notice));
    }
}

/// Marks a send as in flight for as long as it lives.
///
/// The flag is cleared on drop, so every way out of a send clears it: success,
/// error, timeout, or the send future being dropped mid-flight.
pub(crate) struct SendingGuard {
    handle: PanelHandle,
}

impl SendingGuard {
    pub(crate) fn start(handle: &PanelHandle) -> Self {
        handle.update(|state| state.message_send_in_progress = true);
        Self {
            handle: handle.clone(),
        }
    }
}

impl Drop for SendingGuard {
    fn drop(&mut self) {
        self.handle
            .update(|state| state.message_send_in_progress = false);
    }
}
