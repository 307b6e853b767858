//! Turn command-line paths into candidate files.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use tds_upload_core::{scan_directory, CandidateFile};

/// Expand files and directories into candidates, in argument order.
///
/// Directories are walked the way a folder picker reports them, with
/// relative paths rooted at the directory's own name. Nothing is filtered
/// here; the selector drops non-PDF entries.
pub async fn collect_candidates(paths: &[PathBuf]) -> Result<Vec<CandidateFile>> {
    let mut candidates = Vec::new();

    for path in paths {
        let metadata = tokio::fs::metadata(path)
            .await
            .with_context(|| format!("Cannot read {:?}", path))?;

        if metadata.is_dir() {
            let found = scan_directory(path)
                .await
                .with_context(|| format!("Failed to scan directory {:?}", path))?;
            candidates.extend(found);
        } else if metadata.is_file() {
            candidates.push(CandidateFile::from_path(path));
        } else {
            bail!("{:?} is neither a file nor a directory", path);
        }
    }

    Ok(candidates)
}
