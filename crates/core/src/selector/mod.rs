//! File selection: keeps only PDF files and tracks whether submission is possible.
//!
//! A selection is replaced wholesale every time the user picks files; there is
//! no incremental add/remove. An empty selection is a valid state.

mod scan;
mod types;

pub use scan::scan_directory;
pub use types::{CandidateFile, FileContent};

use tracing::debug;

/// Whether a file name has a `.pdf` extension, ignoring case.
pub fn is_pdf(name: &str) -> bool {
    name.to_lowercase().ends_with(".pdf")
}

/// Keep the PDF files, in their original order.
pub fn filter_pdfs(files: Vec<CandidateFile>) -> Vec<CandidateFile> {
    files.into_iter().filter(CandidateFile::is_pdf).collect()
}

/// The current set of selected PDF files.
#[derive(Debug, Clone, Default)]
pub struct FileSelector {
    selected: Vec<CandidateFile>,
}

impl FileSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection with the PDF subset of `files`. Returns the new count.
    pub fn select(&mut self, files: Vec<CandidateFile>) -> usize {
        let offered = files.len();
        self.selected = filter_pdfs(files);
        debug!(
            offered = offered,
            selected = self.selected.len(),
            "File selection replaced"
        );
        self.selected.len()
    }

    pub fn selected(&self) -> &[CandidateFile] {
        &self.selected
    }

    pub fn count(&self) -> usize {
        self.selected.len()
    }

    pub fn can_submit(&self) -> bool {
        !self.selected.is_empty()
    }

    /// Human-readable selection summary.
    pub fn count_label(&self) -> String {
        match self.selected.len() {
            0 => "No PDF files selected".to_string(),
            n => format!("{} PDF files selected", n),
        }
    }
}
