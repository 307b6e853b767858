//! Types for the upload orchestrator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::progress::ProgressState;

/// Shown when submitting with nothing selected.
pub const VALIDATION_MESSAGE: &str = "Please select PDF files to process";

/// Shown after a successful cycle.
pub const SUCCESS_MESSAGE: &str = "TDS data processing completed successfully!";

/// Where the orchestrator is within a submission cycle.
///
/// `Idle` is the only resting phase; how the last cycle ended is kept
/// separately as an [`OutcomeKind`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Uploading,
}

impl CyclePhase {
    pub fn can_transition_to(self, next: CyclePhase) -> bool {
        use CyclePhase::*;
        matches!(
            (self, next),
            (Idle, Validating)
                | (Validating, Idle)
                | (Validating, Submitting)
                | (Submitting, Uploading)
                | (Submitting, Idle)
                | (Uploading, Idle)
        )
    }
}

/// How a cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Rejected,
    Succeeded,
    Failed,
}

/// Style of the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Success,
    Error,
}

/// The status line under the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::Error
    }
}

/// Timing and bookkeeping of a cycle that reached the network stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleReport {
    pub cycle_id: Uuid,
    pub file_count: usize,
    /// Ticks that moved the simulated progress.
    pub progress_ticks: u32,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CycleReport {
    pub fn duration_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }
}

/// Result of [`submit`](super::UploadOrchestrator::submit).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CycleOutcome {
    /// Nothing was selected; no request was sent.
    Rejected { message: String },
    Succeeded {
        report: CycleReport,
        result_bytes: usize,
    },
    Failed {
        report: CycleReport,
        message: String,
    },
}

impl CycleOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Self::Rejected { .. } => OutcomeKind::Rejected,
            Self::Succeeded { .. } => OutcomeKind::Succeeded,
            Self::Failed { .. } => OutcomeKind::Failed,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    pub fn report(&self) -> Option<&CycleReport> {
        match self {
            Self::Rejected { .. } => None,
            Self::Succeeded { report, .. } | Self::Failed { report, .. } => Some(report),
        }
    }
}

/// Snapshot of everything a front end displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadView {
    pub count_label: String,
    pub selected_count: usize,
    pub selector_enabled: bool,
    pub submit_enabled: bool,
    pub progress: ProgressState,
    pub status: Option<StatusMessage>,
    pub download_visible: bool,
    pub phase: CyclePhase,
    pub last_outcome: Option<OutcomeKind>,
}
