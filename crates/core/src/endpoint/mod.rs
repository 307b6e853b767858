//! Extraction service client.
//!
//! One multipart POST per submission, a repeated `files` field whose part
//! file names are the relative paths, and the raw body back on success.
//! The service itself (PDF parsing, CSV generation) lives elsewhere.

mod error;
mod http;
mod traits;
mod types;

pub use error::{EndpointError, GENERIC_FAILURE_MESSAGE};
pub use http::HttpExtractionEndpoint;
pub use traits::ExtractionEndpoint;
pub use types::{ErrorPayload, ServiceHealth, UploadPart, UploadRequest, FILES_FIELD, PDF_MIME};
