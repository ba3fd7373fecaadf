//! Mock data builders for threads, messages and explorations.

use parley::exploration::{ContentBlock, ExplorationState, MemoryExploration};
use parley::thread::{Message, Suggestion, Thread, ThreadData};
use parley::types::ThreadStatus;

/// Exploration version the fixture suggestion was written against
pub const FIXTURE_VERSION: u64 = 3;

/// Builder for creating test threads
pub struct ThreadBuilder {
    thread: Thread,
}

impl ThreadBuilder {
    /// Create a new open thread with the given ID and subject
    pub fn new(id: &str, subject: &str) -> Self {
        Self {
            thread: Thread::new(id, subject),
        }
    }

    /// Set the thread status
    pub fn status(mut self, status: ThreadStatus) -> Self {
        self.thread.status = status;
        self
    }

    /// Append a message from `author`
    pub fn message(mut self, author: &str, text: &str) -> Self {
        let id = self.thread.messages.len() as u64;
        self.thread.messages.push(message(id, author, text));
        self
    }

    /// Embed a suggestion replacing `state_name`'s content
    pub fn suggestion(mut self, state_name: &str, value: &str, version: u64) -> Self {
        self.thread = self.thread.with_suggestion(Suggestion {
            state_name: state_name.to_string(),
            state_content: ContentBlock::text(value),
            exploration_version: version,
            author_name: Some("learner".to_string()),
            description: Some(format!("Improve {state_name}")),
        });
        self
    }

    /// Build the thread
    pub fn build(self) -> Thread {
        self.thread
    }
}

pub fn message(id: u64, author: &str, text: &str) -> Message {
    Message {
        message_id: id,
        author_username: Some(author.to_string()),
        text: text.to_string(),
        updated_status: None,
        updated_subject: None,
        created_on: 1_700_000_000_000 + id as i64 * 60_000,
    }
}

/// Two feedback threads and one suggestion thread.
///
/// - `t1`: open, "Typo", two messages
/// - `t2`: fixed, "Broken link", one message
/// - `s1`: open suggestion replacing "Intro" with "New intro text"
pub fn fixture_threads() -> ThreadData {
    ThreadData {
        feedback_threads: vec![
            ThreadBuilder::new("t1", "Typo")
                .message("alice", "There is a typo in the intro")
                .message("bob", "Which word?")
                .build(),
            ThreadBuilder::new("t2", "Broken link")
                .status(ThreadStatus::Fixed)
                .message("carol", "The second link 404s")
                .build(),
        ],
        suggestion_threads: vec![
            ThreadBuilder::new("s1", "Intro")
                .suggestion("Intro", "New intro text", FIXTURE_VERSION)
                .message("learner", "Suggested a clearer intro")
                .build(),
        ],
    }
}

/// An exploration at [`FIXTURE_VERSION`] with an "Intro" and an "End" state.
pub fn fixture_exploration() -> MemoryExploration {
    MemoryExploration::new(FIXTURE_VERSION)
        .with_state("Intro", ExplorationState::with_text("Old intro text"))
        .with_state("End", ExplorationState::with_text("Thanks for playing"))
}
