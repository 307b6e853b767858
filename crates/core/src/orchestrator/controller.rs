//! Upload orchestrator implementation.
//!
//! Drives one submission cycle at a time:
//! validate -> disable controls -> build request -> tick progress while the
//! request is in flight -> stop ticking -> publish result or error -> re-enable controls.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::endpoint::{EndpointError, ExtractionEndpoint, UploadRequest};
use crate::events::{EventBroadcaster, UploadEvent};
use crate::progress::{ProgressSimulator, ProgressState};
use crate::result::{ResultError, ResultResource};
use crate::selector::{CandidateFile, FileSelector};

use super::types::{
    CycleOutcome, CyclePhase, CycleReport, OutcomeKind, StatusMessage, UploadView,
    SUCCESS_MESSAGE, VALIDATION_MESSAGE,
};

/// Owns the selection, the indicators and the result of the current page.
pub struct UploadOrchestrator {
    endpoint: Arc<dyn ExtractionEndpoint>,
    simulator: ProgressSimulator,
    events: EventBroadcaster,
    output_filename: String,
    output_dir: PathBuf,

    // Page state
    selector: FileSelector,
    controls_enabled: bool,
    phase: CyclePhase,
    status: Option<StatusMessage>,
    progress: Arc<RwLock<ProgressState>>,
    result: Option<ResultResource>,
    last_outcome: Option<OutcomeKind>,
}

impl UploadOrchestrator {
    /// Create an orchestrator in the idle, nothing-selected state.
    pub fn new(config: &Config, endpoint: Arc<dyn ExtractionEndpoint>) -> Self {
        Self {
            endpoint,
            simulator: ProgressSimulator::new(config.progress.clone()),
            events: EventBroadcaster::default(),
            output_filename: config.output.filename.clone(),
            output_dir: config.output.directory.clone(),
            selector: FileSelector::new(),
            controls_enabled: true,
            phase: CyclePhase::Idle,
            status: None,
            progress: Arc::new(RwLock::new(ProgressState::default())),
            result: None,
            last_outcome: None,
        }
    }

    /// Use an existing broadcaster, e.g. one shared with a renderer.
    pub fn with_events(mut self, events: EventBroadcaster) -> Self {
        self.events = events;
        self
    }

    pub fn events(&self) -> &EventBroadcaster {
        &self.events
    }

    /// Shared handle to the progress indicator, for live observers.
    pub fn progress_handle(&self) -> Arc<RwLock<ProgressState>> {
        Arc::clone(&self.progress)
    }

    pub fn endpoint(&self) -> &Arc<dyn ExtractionEndpoint> {
        &self.endpoint
    }

    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    pub fn selected(&self) -> &[CandidateFile] {
        self.selector.selected()
    }

    pub fn has_result(&self) -> bool {
        self.result.is_some()
    }

    /// Replace the selection with the PDF subset of `files`.
    pub fn select_files(&mut self, files: Vec<CandidateFile>) -> usize {
        let count = self.selector.select(files);
        self.events.emit(UploadEvent::SelectionChanged {
            count,
            label: self.selector.count_label(),
        });
        count
    }

    /// Run one submission cycle to completion.
    ///
    /// Never fails: every outcome is reported through the status line and
    /// the returned [`CycleOutcome`], and controls are always re-enabled.
    pub async fn submit(&mut self) -> CycleOutcome {
        self.transition(CyclePhase::Validating);

        if !self.selector.can_submit() {
            info!("Submission rejected: no PDF files selected");
            let message = VALIDATION_MESSAGE.to_string();
            self.status = Some(StatusMessage::error(message.clone()));
            self.events.emit(UploadEvent::ValidationRejected {
                message: message.clone(),
            });
            self.transition(CyclePhase::Idle);
            return self.record(CycleOutcome::Rejected { message });
        }

        let cycle_id = Uuid::new_v4();
        let started_at = Utc::now();
        let file_count = self.selector.count();

        self.set_controls_enabled(false);
        self.release_result();
        self.status = None;
        *self.progress.write().await = ProgressState::started();
        self.transition(CyclePhase::Submitting);

        info!(cycle_id = %cycle_id, files = file_count, "Upload cycle started");
        self.events.emit(UploadEvent::CycleStarted {
            cycle_id,
            file_count,
        });

        let (response, progress_ticks) = self.send(cycle_id).await;

        let report = CycleReport {
            cycle_id,
            file_count,
            progress_ticks,
            started_at,
            finished_at: Utc::now(),
        };
        let outcome = match response {
            Ok(body) => self.finish_success(report, body).await,
            Err(e) => self.finish_failure(report, e).await,
        };

        self.set_controls_enabled(true);
        self.transition(CyclePhase::Idle);
        self.record(outcome)
    }

    /// Save the current result: the explicit download action.
    ///
    /// Safe to call any number of times; only the first call after a
    /// successful cycle writes a file.
    pub async fn download(&mut self, dir: Option<&Path>) -> Result<PathBuf, ResultError> {
        let dir = dir.unwrap_or(self.output_dir.as_path()).to_path_buf();
        let resource = self.result.as_mut().ok_or(ResultError::NoResult)?;

        let path = resource.save_to(&dir).await?;
        let resource_id = resource.id();
        self.events.emit(UploadEvent::ResultDownloaded {
            resource_id,
            path: path.clone(),
        });
        self.events.emit(UploadEvent::ResultReleased { resource_id });
        Ok(path)
    }

    /// Current display state.
    pub async fn view(&self) -> UploadView {
        UploadView {
            count_label: self.selector.count_label(),
            selected_count: self.selector.count(),
            selector_enabled: self.controls_enabled,
            submit_enabled: self.controls_enabled && self.selector.can_submit(),
            progress: self.progress.read().await.clone(),
            status: self.status.clone(),
            download_visible: self.result.is_some(),
            phase: self.phase,
            last_outcome: self.last_outcome,
        }
    }

    /// Build the request, then run it with the ticker alive only while it is in flight.
    async fn send(&mut self, cycle_id: Uuid) -> (Result<Bytes, EndpointError>, u32) {
        let request = match UploadRequest::from_selection(cycle_id, self.selector.selected()).await
        {
            Ok(request) => request,
            Err(e) => return (Err(e), 0),
        };

        let ticker = self.simulator.start(
            cycle_id,
            Arc::clone(&self.progress),
            self.events.clone(),
        );
        self.transition(CyclePhase::Uploading);

        let response = self.endpoint.process(request).await;
        let ticks = ticker.stop().await;
        debug!(cycle_id = %cycle_id, ticks = ticks, "Progress ticker stopped");

        (response, ticks)
    }

    async fn finish_success(&mut self, report: CycleReport, body: Bytes) -> CycleOutcome {
        let result_bytes = body.len();
        self.progress.write().await.complete();
        self.result = Some(ResultResource::new(body, self.output_filename.clone()));
        self.status = Some(StatusMessage::success(SUCCESS_MESSAGE));

        info!(
            cycle_id = %report.cycle_id,
            result_bytes = result_bytes,
            duration_ms = report.duration_ms(),
            "Upload cycle succeeded"
        );
        self.events.emit(UploadEvent::CycleSucceeded {
            cycle_id: report.cycle_id,
            result_bytes,
        });

        CycleOutcome::Succeeded {
            report,
            result_bytes,
        }
    }

    async fn finish_failure(&mut self, report: CycleReport, error: EndpointError) -> CycleOutcome {
        let message = error.user_message();
        self.progress.write().await.fail();
        self.status = Some(StatusMessage::error(format!("Error: {}", message)));

        warn!(
            cycle_id = %report.cycle_id,
            duration_ms = report.duration_ms(),
            "Upload cycle failed: {}",
            error
        );
        self.events.emit(UploadEvent::CycleFailed {
            cycle_id: report.cycle_id,
            message: message.clone(),
        });

        CycleOutcome::Failed { report, message }
    }

    fn set_controls_enabled(&mut self, enabled: bool) {
        if self.controls_enabled != enabled {
            self.controls_enabled = enabled;
            self.events.emit(UploadEvent::ControlsChanged { enabled });
        }
    }

    /// Drop the previous cycle's result before a new one starts.
    fn release_result(&mut self) {
        if let Some(mut resource) = self.result.take() {
            let resource_id = resource.id();
            if resource.release() {
                debug!(resource_id = %resource_id, "Superseded result released");
            }
            self.events.emit(UploadEvent::ResultReleased { resource_id });
        }
    }

    fn transition(&mut self, next: CyclePhase) {
        if self.phase.can_transition_to(next) {
            debug!(from = ?self.phase, to = ?next, "Cycle phase transition");
            self.phase = next;
        } else {
            warn!(from = ?self.phase, to = ?next, "Ignoring invalid cycle phase transition");
        }
    }

    fn record(&mut self, outcome: CycleOutcome) -> CycleOutcome {
        self.last_outcome = Some(outcome.kind());
        outcome
    }
}
