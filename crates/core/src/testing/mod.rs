//! Testing utilities and mock implementations.
//!
//! This module provides a mock extraction endpoint and fixtures, allowing
//! full upload cycles to be exercised without a running service.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tds_upload_core::testing::{fixtures, MockEndpoint};
//! use tds_upload_core::UploadOrchestrator;
//!
//! let endpoint = Arc::new(MockEndpoint::new());
//! let mut orchestrator = UploadOrchestrator::new(&fixtures::fast_config(), endpoint.clone());
//! orchestrator.select_files(vec![fixtures::pdf("a.pdf")]);
//! orchestrator.submit().await;
//! ```

mod mock_endpoint;

pub use mock_endpoint::{MockEndpoint, MockResponse};

/// Test fixtures and helper functions.
pub mod fixtures {
    use bytes::Bytes;

    use crate::config::{Config, ProgressConfig};
    use crate::selector::CandidateFile;

    /// Minimal bytes that look like a PDF header.
    pub const PDF_BYTES: &[u8] = b"%PDF-1.4\n%mock\n";

    /// Body a successful extraction returns.
    pub fn csv_body() -> Bytes {
        Bytes::from_static(b"deductor,tan,amount\nAcme Ltd,MUMA12345B,15000\n")
    }

    /// Default config with a 5 ms progress interval.
    pub fn fast_config() -> Config {
        Config {
            progress: ProgressConfig {
                interval_ms: 5,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// In-memory PDF candidate.
    pub fn pdf(name: &str) -> CandidateFile {
        CandidateFile::in_memory(name, PDF_BYTES)
    }

    /// In-memory candidate with arbitrary name and text content.
    pub fn file(name: &str) -> CandidateFile {
        CandidateFile::in_memory(name, Bytes::from(format!("contents of {}", name)))
    }
}
