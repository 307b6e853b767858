//! Upload orchestrator.
//!
//! Owns the page-level state of the upload form and runs submission cycles:
//!
//! ```text
//! Idle -> Validating -> Idle                      (nothing selected)
//! Idle -> Validating -> Submitting -> Uploading -> Idle (succeeded | failed)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tds_upload_core::{CandidateFile, Config, HttpExtractionEndpoint, UploadOrchestrator};
//!
//! let config = Config::default();
//! let endpoint = Arc::new(HttpExtractionEndpoint::new(config.endpoint.clone())?);
//! let mut orchestrator = UploadOrchestrator::new(&config, endpoint);
//!
//! orchestrator.select_files(vec![CandidateFile::from_path("/data/form16.pdf")]);
//! let outcome = orchestrator.submit().await;
//! if outcome.is_success() {
//!     let saved = orchestrator.download(None).await?;
//!     println!("Saved {}", saved.display());
//! }
//! ```

mod controller;
mod types;

pub use controller::UploadOrchestrator;
pub use types::{
    CycleOutcome, CyclePhase, CycleReport, OutcomeKind, StatusKind, StatusMessage, UploadView,
    SUCCESS_MESSAGE, VALIDATION_MESSAGE,
};
