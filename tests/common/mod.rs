#![allow(dead_code)]

pub mod gated_store;
pub mod mock_data;

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use parley::config::PanelConfig;
use parley::dialog::{CreateThreadResult, Dialogs, SuggestionResolution, SuggestionReview};
use parley::exploration::MemoryExploration;
use parley::panel::FeedbackPanel;

pub use gated_store::{Gate, GatedStore, Op};
pub use mock_data::{FIXTURE_VERSION, ThreadBuilder, fixture_exploration, fixture_threads};

pub type TestPanel = FeedbackPanel<GatedStore, MemoryExploration>;

/// Config with no loading delay, so `load()` returns as soon as the fetch does
pub fn quick_config() -> PanelConfig {
    PanelConfig {
        loading_delay_ms: 0,
        ..Default::default()
    }
}

/// A panel over the fixture threads and exploration. Nothing is loaded yet.
pub fn fixture_panel(config: PanelConfig) -> TestPanel {
    FeedbackPanel::new(
        Arc::new(GatedStore::new(fixture_threads())),
        Arc::new(fixture_exploration()),
        config,
    )
}

/// A fixture panel with the thread list already loaded.
pub async fn loaded_panel() -> TestPanel {
    let mut panel = fixture_panel(quick_config());
    panel.load().await.expect("fixture load should succeed");
    panel
}

/// Dialogs that answer from a script. An exhausted script dismisses.
#[derive(Default)]
pub struct ScriptedDialogs {
    create: Mutex<VecDeque<Option<CreateThreadResult>>>,
    review: Mutex<VecDeque<Option<SuggestionResolution>>>,
    reviews_shown: Mutex<Vec<SuggestionReview>>,
}

impl ScriptedDialogs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_create(self, result: Option<CreateThreadResult>) -> Self {
        self.create.lock().push_back(result);
        self
    }

    pub fn on_review(self, result: Option<SuggestionResolution>) -> Self {
        self.review.lock().push_back(result);
        self
    }

    /// Reviews the suggestion dialog was opened with
    pub fn reviews_shown(&self) -> Vec<SuggestionReview> {
        self.reviews_shown.lock().clone()
    }
}

#[async_trait]
impl Dialogs for ScriptedDialogs {
    async fn create_thread(&self) -> Option<CreateThreadResult> {
        self.create.lock().pop_front().flatten()
    }

    async fn review_suggestion(&self, review: &SuggestionReview) -> Option<SuggestionResolution> {
        self.reviews_shown.lock().push(review.clone());
        self.review.lock().pop_front().flatten()
    }
}
