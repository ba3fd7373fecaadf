#[macro_use]
mod macros;

pub mod config;
pub mod dialog;
pub mod error;
pub mod events;
pub mod exploration;
pub mod formatting;
pub mod notice;
pub mod panel;
pub mod store;
pub mod thread;
pub mod types;

#[cfg(test)]
pub(crate) mod test_guards;

pub use config::PanelConfig;
pub use dialog::{CreateThreadResult, Dialogs, SuggestionResolution, SuggestionReview};
pub use error::{ParleyError, Result};
pub use events::{EditorEvent, EditorEvents};
pub use exploration::{ContentBlock, ExplorationDocument, ExplorationState, MemoryExploration};
pub use formatting::format_abbreviated_datetime;
pub use notice::{Notice, NoticeLevel};
pub use panel::{DraftMessage, FeedbackPanel, PanelHandle, PanelState};
pub use store::{MemoryThreadStore, StoreCall, ThreadStore};
pub use thread::{Message, SharedThreadData, Suggestion, Thread, ThreadData};
pub use types::{
    ButtonStyle, STATUS_CHOICES, StatusChoice, SuggestionAction, ThreadStatus, VALID_STATUSES,
};
