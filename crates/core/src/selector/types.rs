//! Types for the selector module.

use bytes::Bytes;
use std::path::{Path, PathBuf};

/// Where a candidate file's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// Bytes already held in memory.
    Memory(Bytes),
    /// A file on disk, read when the upload request is built.
    Disk(PathBuf),
}

/// A file the user picked, before PDF filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    /// Base file name (e.g., "a.pdf").
    pub name: String,
    /// Path relative to the chosen root, `/`-separated (e.g., "reports/2024/a.pdf").
    pub relative_path: String,
    /// File content.
    pub content: FileContent,
}

impl CandidateFile {
    /// Create an in-memory candidate picked on its own.
    pub fn in_memory(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        let name = name.into();
        Self {
            relative_path: name.clone(),
            name,
            content: FileContent::Memory(data.into()),
        }
    }

    /// Create an on-disk candidate picked on its own. The relative path is the file name.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            relative_path: name.clone(),
            name,
            content: FileContent::Disk(path.to_path_buf()),
        }
    }

    /// Override the relative path (directory picks).
    pub fn with_relative_path(mut self, relative_path: impl Into<String>) -> Self {
        self.relative_path = relative_path.into();
        self
    }

    /// Whether this candidate survives the PDF filter.
    pub fn is_pdf(&self) -> bool {
        super::is_pdf(&self.name)
    }
}
