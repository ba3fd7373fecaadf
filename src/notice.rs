//! User-visible notices (warnings raised by panel operations).

use std::time::Instant;

/// A notice shown to the user
#[derive(Debug, Clone)]
pub struct Notice {
    /// The message to display
    pub message: String,
    /// The severity level of the notice
    pub level: NoticeLevel,
    /// When the notice was raised
    pub timestamp: Instant,
}

/// Severity level for notices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Warning,
    Error,
}

impl Notice {
    pub fn new(message: String, level: NoticeLevel) -> Self {
        Self {
            message,
            level,
            timestamp: Instant::now(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message.into(), NoticeLevel::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message.into(), NoticeLevel::Error)
    }

    /// CSS class used when rendering the notice.
    pub fn css_class(&self) -> &'static str {
        match self.level {
            NoticeLevel::Warning => "alert alert-warning",
            NoticeLevel::Error => "alert alert-danger",
        }
    }
}
