//! The exploration document the panel patches when a suggestion is accepted.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::{ParleyError, Result};

/// One block of state content, e.g. `{"type": "text", "value": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

impl ContentBlock {
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            value: value.into(),
        }
    }
}

/// A single exploration state. Fields other than `content` are kept as-is so
/// a copy-on-write update never drops data the panel doesn't know about.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExplorationState {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ExplorationState {
    pub fn with_text(value: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::text(value)],
            extra: serde_json::Map::new(),
        }
    }

    /// The displayed content (first block), if any.
    pub fn primary_content(&self) -> Option<&str> {
        self.content.first().map(|block| block.value.as_str())
    }

    /// Return a copy with the first content block's value replaced.
    pub fn with_primary_content(&self, value: &str) -> Self {
        let mut next = self.clone();
        match next.content.first_mut() {
            Some(block) => block.value = value.to_string(),
            None => next.content.push(ContentBlock::text(value)),
        }
        next
    }
}

/// Read/write access to the exploration being edited.
pub trait ExplorationDocument: Send + Sync {
    /// Current version of the exploration.
    fn version(&self) -> u64;

    /// A copy of the named state, if present.
    fn state(&self, state_name: &str) -> Option<ExplorationState>;

    /// Replace the named state wholesale.
    fn set_state(&self, state_name: &str, state: ExplorationState) -> Result<()>;
}

/// Serializable form of an exploration, used to seed [`MemoryExploration`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExplorationData {
    pub version: u64,
    #[serde(default)]
    pub states: HashMap<String, ExplorationState>,
}

/// An in-memory exploration document.
#[derive(Debug, Default)]
pub struct MemoryExploration {
    data: RwLock<ExplorationData>,
    writes: RwLock<Vec<String>>,
}

impl MemoryExploration {
    pub fn new(version: u64) -> Self {
        Self::from_data(ExplorationData {
            version,
            states: HashMap::new(),
        })
    }

    pub fn from_data(data: ExplorationData) -> Self {
        Self {
            data: RwLock::new(data),
            writes: RwLock::new(Vec::new()),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let data: ExplorationData = serde_json::from_str(json)?;
        Ok(Self::from_data(data))
    }

    pub fn with_state(self, state_name: impl Into<String>, state: ExplorationState) -> Self {
        self.data.write().states.insert(state_name.into(), state);
        self
    }

    pub fn set_version(&self, version: u64) {
        self.data.write().version = version;
    }

    /// Names of states written through [`ExplorationDocument::set_state`], in order.
    pub fn writes(&self) -> Vec<String> {
        self.writes.read().clone()
    }
}

impl ExplorationDocument for MemoryExploration {
    fn version(&self) -> u64 {
        self.data.read().version
    }

    fn state(&self, state_name: &str) -> Option<ExplorationState> {
        self.data.read().states.get(state_name).cloned()
    }

    fn set_state(&self, state_name: &str, state: ExplorationState) -> Result<()> {
        let mut data = self.data.write();
        if !data.states.contains_key(state_name) {
            return Err(ParleyError::StateNotFound(state_name.to_string()));
        }
        data.states.insert(state_name.to_string(), state);
        self.writes.write().push(state_name.to_string());
        Ok(())
    }
}
