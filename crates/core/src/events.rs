//! Upload cycle notifications.
//!
//! Every visible state change of the orchestrator is also broadcast as an
//! [`UploadEvent`], so a front end can render without polling.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Upload event types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UploadEvent {
    SelectionChanged {
        count: usize,
        label: String,
    },
    /// Selector and submit controls toggled together.
    ControlsChanged {
        enabled: bool,
    },
    ValidationRejected {
        message: String,
    },
    CycleStarted {
        cycle_id: Uuid,
        file_count: usize,
    },
    ProgressTick {
        cycle_id: Uuid,
        percent: u8,
        status: String,
    },
    CycleSucceeded {
        cycle_id: Uuid,
        result_bytes: usize,
    },
    CycleFailed {
        cycle_id: Uuid,
        message: String,
    },
    ResultDownloaded {
        resource_id: Uuid,
        path: PathBuf,
    },
    ResultReleased {
        resource_id: Uuid,
    },
}

impl UploadEvent {
    /// Whether this event ends a submission cycle.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::CycleSucceeded { .. } | Self::CycleFailed { .. } | Self::ValidationRejected { .. }
        )
    }
}

/// Fan-out sender for upload events.
#[derive(Debug, Clone)]
pub struct EventBroadcaster {
    sender: broadcast::Sender<UploadEvent>,
}

impl EventBroadcaster {
    /// Create a new broadcaster with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn emit(&self, event: UploadEvent) {
        // No receivers is fine
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<UploadEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBroadcaster {
    fn default() -> Self {
        Self::new(256)
    }
}
