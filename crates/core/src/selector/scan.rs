//! Directory scanning, producing candidates with root-relative paths.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use super::types::{CandidateFile, FileContent};

/// Recursively list every regular file under `root`.
///
/// Relative paths start with the root directory's own name, the way a
/// directory picker reports them (`reports/2024/a.pdf`). Results are sorted
/// by relative path. Nothing is filtered here; that is the selector's job.
pub async fn scan_directory(root: &Path) -> io::Result<Vec<CandidateFile>> {
    let root_name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut found = Vec::new();
    let mut pending: Vec<(PathBuf, String)> = vec![(root.to_path_buf(), root_name)];

    while let Some((dir, prefix)) = pending.pop() {
        let mut entries = fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            let relative = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{}/{}", prefix, name)
            };

            let file_type = entry.file_type().await?;
            if file_type.is_dir() {
                pending.push((entry.path(), relative));
            } else if file_type.is_file() {
                found.push(CandidateFile {
                    name,
                    relative_path: relative,
                    content: FileContent::Disk(entry.path()),
                });
            }
        }
    }

    found.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    debug!(root = %root.display(), files = found.len(), "Scanned directory");
    Ok(found)
}
