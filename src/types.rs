use serde::{Deserialize, Serialize};

use crate::error::ParleyError;

/// Review status of a feedback or suggestion thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ThreadStatus {
    #[default]
    Open,
    Fixed,
    Ignored,
    Compliment,
    NotActionable,
}

enum_display_fromstr!(ThreadStatus, ParleyError::invalid_status, {
    Open => "open",
    Fixed => "fixed",
    Ignored => "ignored",
    Compliment => "compliment",
    NotActionable => "not_actionable",
});

/// A selectable status with its display text, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChoice {
    pub status: ThreadStatus,
    pub text: &'static str,
}

pub const STATUS_CHOICES: &[StatusChoice] = &[
    StatusChoice {
        status: ThreadStatus::Open,
        text: "Open",
    },
    StatusChoice {
        status: ThreadStatus::Fixed,
        text: "Fixed",
    },
    StatusChoice {
        status: ThreadStatus::Ignored,
        text: "Ignored",
    },
    StatusChoice {
        status: ThreadStatus::Compliment,
        text: "Compliment",
    },
    StatusChoice {
        status: ThreadStatus::NotActionable,
        text: "Not Actionable",
    },
];

pub const VALID_STATUSES: &[&str] = &["open", "fixed", "ignored", "compliment", "not_actionable"];

impl ThreadStatus {
    /// Display text shown next to a thread in the list.
    pub fn human_readable(&self) -> &'static str {
        STATUS_CHOICES
            .iter()
            .find(|choice| choice.status == *self)
            .map(|choice| choice.text)
            .unwrap_or("Open")
    }

    /// CSS class for the status label.
    pub fn label_class(&self) -> &'static str {
        match self {
            ThreadStatus::Open => "label label-info",
            ThreadStatus::Compliment => "label label-success",
            _ => "label label-default",
        }
    }
}

/// How a reviewer resolves an embedded suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionAction {
    Accept,
    Reject,
}

enum_display_fromstr!(SuggestionAction, ParleyError::invalid_action, {
    Accept => "accept",
    Reject => "reject",
});

/// Button emphasis for the "view suggestion" control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Primary,
    Default,
}

impl std::fmt::Display for ButtonStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ButtonStyle::Primary => write!(f, "primary"),
            ButtonStyle::Default => write!(f, "default"),
        }
    }
}
