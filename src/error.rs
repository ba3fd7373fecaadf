use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParleyError {
    // Validation errors (user input, checked before any store call)
    #[error("missing subject: please specify a thread subject")]
    MissingSubject,

    #[error("missing message: please specify a message")]
    MissingMessage,

    #[error("no active thread: cannot add message to thread with ID: null")]
    NoActiveThread,

    #[error("invalid message status: '{0}'")]
    InvalidStatus(String),

    #[error("invalid suggestion action '{0}', expected 'accept' or 'reject'")]
    InvalidAction(String),

    // Lookup errors
    #[error("thread '{0}' not found")]
    ThreadNotFound(String),

    #[error("thread '{0}' has no suggestion")]
    NoSuggestion(String),

    #[error("state '{0}' not found in exploration")]
    StateNotFound(String),

    // Collaborator failures
    #[error("thread store error: {0}")]
    Store(String),


    #[error("no tokio runtime available to fetch messages")]
    NoRuntime,

    #[error("operation timed out after {0}s")]
    Timeout(u64),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ParleyError {
    /// True for user-input errors that are reported before any collaborator call.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ParleyError::MissingSubject
                | ParleyError::MissingMessage
                | ParleyError::NoActiveThread
                | ParleyError::InvalidStatus(_)
                | ParleyError::InvalidAction(_)
        )
    }

    pub fn invalid_status(s: String) -> Self {
        ParleyError::InvalidStatus(s)
    }

    pub fn invalid_action(s: String) -> Self {
        ParleyError::InvalidAction(s)
    }
}

pub type Result<T> = std::result::Result<T, ParleyError>;
