use std::path::{Path, PathBuf};

use bytes::Bytes;
use chrono::{DateTime, Utc};
use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

use super::error::ResultError;

/// Response body of a successful cycle, ready for one download.
#[derive(Debug)]
pub struct ResultResource {
    id: Uuid,
    filename: String,
    data: Option<Bytes>,
    size_bytes: usize,
    created_at: DateTime<Utc>,
}

impl ResultResource {
    pub fn new(data: Bytes, filename: impl Into<String>) -> Self {
        let resource = Self {
            id: Uuid::new_v4(),
            filename: filename.into(),
            size_bytes: data.len(),
            data: Some(data),
            created_at: Utc::now(),
        };
        debug!(resource_id = %resource.id, size_bytes = resource.size_bytes, "Result resource created");
        resource
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Suggested file name for the download.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Size of the body, also known after release.
    pub fn size_bytes(&self) -> usize {
        self.size_bytes
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_released(&self) -> bool {
        self.data.is_none()
    }

    /// Borrow the body while it is still held.
    pub fn data(&self) -> Option<&Bytes> {
        self.data.as_ref()
    }

    /// Free the body. Returns true only on the call that actually released it.
    pub fn release(&mut self) -> bool {
        if self.data.take().is_some() {
            debug!(resource_id = %self.id, "Result resource released");
            true
        } else {
            false
        }
    }

    /// Write the body to `dir/filename`, then release it.
    ///
    /// On a write failure the body is kept so the download can be retried.
    pub async fn save_to(&mut self, dir: &Path) -> Result<PathBuf, ResultError> {
        let data = self.data.as_ref().ok_or(ResultError::Released)?;
        let path = dir.join(&self.filename);

        fs::create_dir_all(dir).await.map_err(|source| ResultError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        fs::write(&path, data).await.map_err(|source| ResultError::Io {
            path: path.clone(),
            source,
        })?;

        info!(
            resource_id = %self.id,
            path = %path.display(),
            size_bytes = self.size_bytes,
            "Result saved"
        );
        self.release();
        Ok(path)
    }
}
