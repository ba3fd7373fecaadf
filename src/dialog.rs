//! Modal prompts the panel opens, and the results they resolve with.

use async_trait::async_trait;

use crate::types::SuggestionAction;

/// Values entered in the "start new thread" dialog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateThreadResult {
    pub subject: String,
    pub text: String,
}

impl CreateThreadResult {
    pub fn new(subject: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            text: text.into(),
        }
    }
}

/// The reviewer's decision on a suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionResolution {
    Accept { commit_message: String },
    Reject,
}

impl SuggestionResolution {
    pub fn accept(commit_message: impl Into<String>) -> Self {
        SuggestionResolution::Accept {
            commit_message: commit_message.into(),
        }
    }

    /// Build a resolution from a wire action name. Commit messages only
    /// apply to acceptance and are dropped for rejection.
    pub fn from_action(action: SuggestionAction, commit_message: Option<String>) -> Self {
        match action {
            SuggestionAction::Accept => SuggestionResolution::Accept {
                commit_message: commit_message.unwrap_or_default(),
            },
            SuggestionAction::Reject => SuggestionResolution::Reject,
        }
    }

    pub fn action(&self) -> SuggestionAction {
        match self {
            SuggestionResolution::Accept { .. } => SuggestionAction::Accept,
            SuggestionResolution::Reject => SuggestionAction::Reject,
        }
    }

    pub fn commit_message(&self) -> Option<&str> {
        match self {
            SuggestionResolution::Accept { commit_message } => Some(commit_message),
            SuggestionResolution::Reject => None,
        }
    }
}

/// What the suggestion review dialog shows: current content next to the
/// proposed content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionReview {
    pub thread_id: String,
    pub state_name: String,
    pub old_content: String,
    pub new_content: String,
    /// Stale suggestions can be viewed but only rejected.
    pub is_valid: bool,
}

/// Opens modal dialogs. `None` means the user dismissed the dialog.
#[async_trait]
pub trait Dialogs: Send + Sync {
    async fn create_thread(&self) -> Option<CreateThreadResult>;

    async fn review_suggestion(&self, review: &SuggestionReview) -> Option<SuggestionResolution>;
}
