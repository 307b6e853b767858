//! Error types for the result module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when downloading a result.
#[derive(Debug, Error)]
pub enum ResultError {
    /// No successful cycle has produced a result yet.
    #[error("No result is available to download")]
    NoResult,

    /// The result was already saved and its data freed.
    #[error("Result has already been downloaded and released")]
    Released,

    /// Writing the file failed. The result is kept.
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
