//! Notifications the panel broadcasts to other editor views.

use tokio::sync::broadcast;

/// Capacity of the broadcast buffer. Slow receivers that fall further behind
/// see `RecvError::Lagged` and should simply refresh.
const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorEvent {
    /// Exploration state content changed underneath the state editor.
    RefreshStateEditor,
}

/// Broadcast channel for [`EditorEvent`]s.
#[derive(Debug, Clone)]
pub struct EditorEvents {
    sender: broadcast::Sender<EditorEvent>,
}

impl EditorEvents {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EditorEvent> {
        self.sender.subscribe()
    }

    /// Send to all current subscribers. Having none is not an error.
    pub fn emit(&self, event: EditorEvent) {
        match self.sender.send(event) {
            Ok(receivers) => tracing::debug!("Broadcast {event:?} to {receivers} receiver(s)"),
            Err(_) => tracing::debug!("No subscribers for {event:?}"),
        }
    }
}

impl Default for EditorEvents {
    fn default() -> Self {
        Self::new()
    }
}
