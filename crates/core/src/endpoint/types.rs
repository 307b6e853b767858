//! Types for the endpoint module.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tokio::fs;
use uuid::Uuid;

use crate::selector::{CandidateFile, FileContent};

use super::error::EndpointError;

/// Multipart field carrying each file.
pub const FILES_FIELD: &str = "files";

/// Content type declared for every part.
pub const PDF_MIME: &str = "application/pdf";

/// One file inside an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPart {
    /// Sent as the part's file name so the service can rebuild the tree.
    pub relative_path: String,
    pub data: Bytes,
}

/// The payload of one submission, built when the cycle starts.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub cycle_id: Uuid,
    pub parts: Vec<UploadPart>,
}

impl UploadRequest {
    /// Load every selected file into memory, in selection order.
    pub async fn from_selection(
        cycle_id: Uuid,
        files: &[CandidateFile],
    ) -> Result<Self, EndpointError> {
        let mut parts = Vec::with_capacity(files.len());
        for file in files {
            let data = match &file.content {
                FileContent::Memory(bytes) => bytes.clone(),
                FileContent::Disk(path) => {
                    fs::read(path)
                        .await
                        .map(Bytes::from)
                        .map_err(|source| EndpointError::FileRead {
                            path: path.clone(),
                            source,
                        })?
                }
            };
            let relative_path = if file.relative_path.is_empty() {
                file.name.clone()
            } else {
                file.relative_path.clone()
            };
            parts.push(UploadPart {
                relative_path,
                data,
            });
        }
        Ok(Self { cycle_id, parts })
    }

    pub fn total_bytes(&self) -> usize {
        self.parts.iter().map(|p| p.data.len()).sum()
    }
}

/// Body of a failed response: `{"error": "..."}`, field optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ErrorPayload {
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorPayload {
    /// Pull the message out of a raw body. Empty or non-JSON bodies yield `None`.
    pub fn message_from_body(body: &[u8]) -> Option<String> {
        serde_json::from_slice::<ErrorPayload>(body)
            .ok()
            .and_then(|p| p.error)
            .filter(|m| !m.trim().is_empty())
    }
}

/// Answer of the status endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServiceHealth {
    pub status: String,
}

impl ServiceHealth {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}
