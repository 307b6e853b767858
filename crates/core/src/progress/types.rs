//! Types for the progress module.

use serde::{Deserialize, Serialize};

/// What the progress indicator currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    /// Displayed percentage, 0 to 100.
    pub percent: u8,
    /// Text next to the bar.
    pub status: String,
    /// Whether the indicator is shown at all.
    pub visible: bool,
}

impl ProgressState {
    /// Shown, empty indicator at the start of a cycle.
    pub fn started() -> Self {
        Self {
            percent: 0,
            status: processing_status(0),
            visible: true,
        }
    }

    /// Advance by `step` without passing `cap`. Returns false when nothing moved.
    pub fn advance(&mut self, step: u8, cap: u8) -> bool {
        if step == 0 || self.percent >= cap {
            return false;
        }
        self.percent = self.percent.saturating_add(step).min(cap);
        self.status = processing_status(self.percent);
        true
    }

    /// Pin to 100% once the response has arrived.
    pub fn complete(&mut self) {
        self.percent = 100;
        self.status = "Processing complete!".to_string();
        self.visible = true;
    }

    /// Drop back to 0% after a failed cycle.
    pub fn fail(&mut self) {
        self.percent = 0;
        self.status = "Processing failed".to_string();
        self.visible = true;
    }
}

fn processing_status(percent: u8) -> String {
    format!("Processing files... ({}%)", percent)
}
