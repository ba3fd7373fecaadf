//! The feedback panel controller.
//!
//! Tracks the active thread and the message being drafted for it, and
//! coordinates thread creation, message sending and suggestion resolution
//! against a [`ThreadStore`] and an [`ExplorationDocument`].

mod state;

pub use state::{DraftMessage, LOADING_MESSAGE, PanelHandle, PanelState};

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::config::PanelConfig;
use crate::dialog::{Dialogs, SuggestionResolution, SuggestionReview};
use crate::error::{ParleyError, Result};
use crate::events::{EditorEvent, EditorEvents};
use crate::exploration::ExplorationDocument;
use crate::notice::Notice;
use crate::store::ThreadStore;
use crate::thread::{Suggestion, Thread, ThreadData};
use crate::types::{ButtonStyle, ThreadStatus};

use state::SendingGuard;

pub struct FeedbackPanel<S, D> {
    store: Arc<S>,
    document: Arc<D>,
    events: EditorEvents,
    config: PanelConfig,
    handle: PanelHandle,
    /// Runtime that background message fetches are spawned on.
    runtime: Option<Handle>,
}

impl<S, D> FeedbackPanel<S, D>
where
    S: ThreadStore + 'static,
    D: ExplorationDocument,
{
    /// Create a panel. If called inside a tokio runtime, that runtime is used
    /// for background message fetches; otherwise see [`Self::with_runtime`].
    pub fn new(store: Arc<S>, document: Arc<D>, config: PanelConfig) -> Self {
        let handle = PanelHandle::new(store.data());
        Self {
            store,
            document,
            events: EditorEvents::new(),
            config,
            handle,
            runtime: Handle::try_current().ok(),
        }
    }

    /// Spawn background message fetches on `runtime`. Needed when the panel
    /// is driven from a thread that is not inside a tokio runtime.
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Broadcast on an existing channel instead of a private one.
    pub fn with_events(mut self, events: EditorEvents) -> Self {
        self.events = events;
        self
    }

    pub fn handle(&self) -> PanelHandle {
        self.handle.clone()
    }

    pub fn events(&self) -> &EditorEvents {
        &self.events
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn document(&self) -> &Arc<D> {
        &self.document
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn state(&self) -> PanelState {
        self.handle.snapshot()
    }

    pub fn active_thread(&self) -> Option<Thread> {
        self.handle.active_thread()
    }

    /// The merged thread pool as last fetched.
    pub fn threads(&self) -> ThreadData {
        self.handle.threads().snapshot()
    }

    pub fn draft(&self) -> DraftMessage {
        self.handle.draft()
    }

    pub fn set_draft_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.handle.update(|state| state.draft.text = text);
    }

    pub fn set_draft_status(&mut self, status: Option<ThreadStatus>) {
        self.handle.update(|state| state.draft.status = status);
    }

    /// Remove and return all pending notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.handle
            .update(|state| std::mem::take(&mut state.notices))
    }

    /// Initial load: fetch the thread list behind a loading message.
    ///
    /// The loading message stays up for the configured delay after the fetch
    /// settles, whether or not it succeeded.
    pub async fn load(&mut self) -> Result<()> {
        self.clear_active_thread();
        self.handle
            .update(|state| state.loading_message = LOADING_MESSAGE.to_string());

        let result = self.store.fetch_threads().await;
        if let Err(e) = &result {
            tracing::warn!("Failed to load feedback threads: {e}");
        }

        tokio::time::sleep(self.config.loading_delay()).await;
        self.handle.update(|state| state.loading_message.clear());
        result
    }

    pub fn clear_active_thread(&mut self) {
        self.handle.update(|state| {
            state.active_thread_id = None;
            state.draft = DraftMessage::new();
        });
    }

    /// Make `thread_id` the active thread and start loading its messages.
    ///
    /// The message fetch runs in the background on the panel's runtime (see
    /// [`Self::with_runtime`]); the returned handle can be
    /// awaited or ignored. Fetched messages land on their own thread, so a
    /// fetch that finishes after another thread was selected is harmless.
    pub fn select_thread(&mut self, thread_id: &str) -> Result<JoinHandle<Result<()>>> {
        let status = self
            .handle
            .threads()
            .read(|data| data.find(thread_id).map(|t| t.status))
            .ok_or_else(|| ParleyError::ThreadNotFound(thread_id.to_string()))?;

        let runtime = self
            .runtime
            .clone()
            .or_else(|| Handle::try_current().ok())
            .ok_or(ParleyError::NoRuntime)?;

        let store = Arc::clone(&self.store);
        let id = thread_id.to_string();
        let fetch = runtime.spawn(async move {
            let result = store.fetch_messages(&id).await;
            if let Err(e) = &result {
                tracing::warn!("Failed to fetch messages for thread {id}: {e}");
            }
            result
        });

        self.handle.update(|state| {
            let switching = state.active_thread_id.as_deref() != Some(thread_id);
            state.active_thread_id = Some(thread_id.to_string());
            state.draft.status = Some(status);
            if switching {
                state.draft.text.clear();
            }
        });
        tracing::debug!("Selected thread {thread_id}");

        Ok(fetch)
    }

    /// Create a thread. The new thread shows up on the next list refresh.
    pub async fn create_thread(&mut self, subject: &str, text: &str) -> Result<String> {
        if subject.is_empty() {
            return self.reject(ParleyError::MissingSubject);
        }
        if text.is_empty() {
            return self.reject(ParleyError::MissingMessage);
        }

        let thread_id = self.store.create_thread(subject, text).await?;
        tracing::debug!("Created thread {thread_id}");
        self.clear_active_thread();
        Ok(thread_id)
    }

    /// Post `text` to a thread, setting the thread's status to `status`.
    pub async fn send_message(
        &mut self,
        thread_id: Option<&str>,
        text: &str,
        status: Option<ThreadStatus>,
    ) -> Result<()> {
        let Some(thread_id) = thread_id else {
            return self.reject(ParleyError::NoActiveThread);
        };
        let Some(status) = status else {
            return self.reject(ParleyError::invalid_status("null".to_string()));
        };

        let result = {
            let _sending = SendingGuard::start(&self.handle);
            let send = self.store.add_message(thread_id, text, status);
            match self.config.send_timeout() {
                Some(limit) => tokio::time::timeout(limit, send)
                    .await
                    .unwrap_or_else(|_| Err(ParleyError::Timeout(limit.as_secs()))),
                None => send.await,
            }
        };

        match result {
            Ok(()) => {
                self.reset_draft();
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to send message to thread {thread_id}: {e}");
                self.surface_failure("Failed to send message", &e);
                Err(e)
            }
        }
    }

    /// Send the current draft to the active thread.
    pub async fn send_draft(&mut self) -> Result<()> {
        let PanelState {
            active_thread_id,
            draft,
            ..
        } = self.handle.snapshot();
        self.send_message(active_thread_id.as_deref(), &draft.text, draft.status)
            .await
    }

    /// Accept or reject the suggestion in `thread_id`.
    ///
    /// On acceptance the suggested content is written to the exploration
    /// document and editors are told to refresh before the thread list is
    /// re-fetched. A store failure is logged and returned; nothing is rolled
    /// back. Once the store has resolved the suggestion the thread list is
    /// refreshed even if patching the document failed; that failure is
    /// returned afterwards.
    pub async fn resolve_suggestion(
        &mut self,
        thread_id: &str,
        resolution: SuggestionResolution,
    ) -> Result<()> {
        let suggestion = self.suggestion_for(thread_id)?;

        if let Err(e) = self
            .store
            .resolve_suggestion(thread_id, resolution.action(), resolution.commit_message())
            .await
        {
            tracing::error!("Error resolving suggestion in thread {thread_id}: {e}");
            self.surface_failure("Error resolving suggestion", &e);
            return Err(e);
        }

        let patched = match resolution {
            SuggestionResolution::Accept { .. } => self.apply_suggestion(&suggestion),
            SuggestionResolution::Reject => Ok(()),
        };

        self.store.fetch_threads().await?;
        self.select_thread(thread_id)?;
        patched
    }

    /// A suggestion can be acted on only while its thread is open and the
    /// document is still at the version the suggestion was written against.
    pub fn is_suggestion_valid(&self, thread: &Thread) -> bool {
        match &thread.suggestion {
            Some(suggestion) => {
                thread.status == ThreadStatus::Open
                    && suggestion.exploration_version == self.document.version()
            }
            None => false,
        }
    }

    pub fn view_suggestion_button_style(&self, thread: &Thread) -> ButtonStyle {
        if self.is_suggestion_valid(thread) {
            ButtonStyle::Primary
        } else {
            ButtonStyle::Default
        }
    }

    /// Current and proposed content for reviewing a suggestion.
    pub fn suggestion_review(&self, thread_id: &str) -> Result<SuggestionReview> {
        let thread = self
            .handle
            .threads()
            .find(thread_id)
            .ok_or_else(|| ParleyError::ThreadNotFound(thread_id.to_string()))?;
        let suggestion = thread
            .suggestion
            .as_ref()
            .ok_or_else(|| ParleyError::NoSuggestion(thread_id.to_string()))?;
        let state = self
            .document
            .state(&suggestion.state_name)
            .ok_or_else(|| ParleyError::StateNotFound(suggestion.state_name.clone()))?;

        Ok(SuggestionReview {
            thread_id: thread.thread_id.clone(),
            state_name: suggestion.state_name.clone(),
            old_content: state.primary_content().unwrap_or_default().to_string(),
            new_content: suggestion.proposed_value().to_string(),
            is_valid: self.is_suggestion_valid(&thread),
        })
    }

    /// Prompt for a new thread. Returns the new thread's ID, or `None` if the
    /// dialog was dismissed.
    pub async fn show_create_thread_dialog(
        &mut self,
        dialogs: &dyn Dialogs,
    ) -> Result<Option<String>> {
        let Some(result) = dialogs.create_thread().await else {
            tracing::debug!("Create thread dialog dismissed");
            return Ok(None);
        };
        self.create_thread(&result.subject, &result.text)
            .await
            .map(Some)
    }

    /// Review the active thread's suggestion. Returns the chosen resolution,
    /// or `None` if the dialog was dismissed.
    pub async fn show_suggestion_dialog(
        &mut self,
        dialogs: &dyn Dialogs,
    ) -> Result<Option<SuggestionResolution>> {
        let Some(thread_id) = self.handle.active_thread_id() else {
            return self.reject(ParleyError::NoActiveThread);
        };
        let review = self.suggestion_review(&thread_id)?;

        let Some(resolution) = dialogs.review_suggestion(&review).await else {
            tracing::debug!("Suggestion dialog dismissed for thread {thread_id}");
            return Ok(None);
        };
        self.resolve_suggestion(&thread_id, resolution.clone())
            .await?;
        Ok(Some(resolution))
    }

    fn suggestion_for(&self, thread_id: &str) -> Result<Suggestion> {
        self.handle
            .threads()
            .find(thread_id)
            .ok_or_else(|| ParleyError::ThreadNotFound(thread_id.to_string()))?
            .suggestion
            .ok_or_else(|| ParleyError::NoSuggestion(thread_id.to_string()))
    }

    /// Write the suggested content into the document and tell editors.
    /// Skipped when the state already holds the suggested content.
    fn apply_suggestion(&self, suggestion: &Suggestion) -> Result<()> {
        let state_name = &suggestion.state_name;
        let Some(state) = self.document.state(state_name) else {
            tracing::error!("Cannot apply suggestion: state {state_name} not found");
            return Err(ParleyError::StateNotFound(state_name.clone()));
        };

        if state.primary_content() == Some(suggestion.proposed_value()) {
            tracing::debug!("State {state_name} already has the suggested content");
            return Ok(());
        }

        let patched = state.with_primary_content(suggestion.proposed_value());
        if let Err(e) = self.document.set_state(state_name, patched) {
            tracing::error!("Failed to apply suggestion to state {state_name}: {e}");
            return Err(e);
        }
        self.events.emit(EditorEvent::RefreshStateEditor);
        Ok(())
    }

    /// Blank the draft text and point its status back at the active thread.
    fn reset_draft(&self) {
        let status = self.handle.active_thread().map(|t| t.status);
        self.handle
            .update(|state| state.draft = DraftMessage::for_status(status));
    }

    fn reject<T>(&self, err: ParleyError) -> Result<T> {
        tracing::warn!("{err}");
        self.handle.push_notice(Notice::warning(err.to_string()));
        Err(err)
    }

    fn surface_failure(&self, context: &str, err: &ParleyError) {
        if self.config.surface_collaborator_failures {
            self.handle
                .push_notice(Notice::error(format!("{context}: {err}")));
        }
    }
}
