//! Print upload events as terminal lines.

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::warn;

use tds_upload_core::UploadEvent;

/// Text for an event, or `None` when the event has no line of its own.
///
/// The final status and the saved path are printed by the caller once the
/// cycle is over.
pub fn line_for(event: &UploadEvent) -> Option<String> {
    match event {
        UploadEvent::SelectionChanged { label, .. } => Some(label.clone()),
        UploadEvent::CycleStarted { file_count, .. } => {
            Some(format!("Uploading {} file(s)...", file_count))
        }
        UploadEvent::ProgressTick { percent, status, .. } => {
            Some(format!("[{:>3}%] {}", percent, status))
        }
        UploadEvent::ControlsChanged { .. }
        | UploadEvent::ValidationRejected { .. }
        | UploadEvent::CycleSucceeded { .. }
        | UploadEvent::CycleFailed { .. }
        | UploadEvent::ResultDownloaded { .. }
        | UploadEvent::ResultReleased { .. } => None,
    }
}

/// Print events until every sender is gone.
pub fn spawn(mut rx: broadcast::Receiver<UploadEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    if let Some(line) = line_for(&event) {
                        println!("{}", line);
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Event renderer lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use uuid::Uuid;

    #[test]
    fn test_progress_line() {
        let event = UploadEvent::ProgressTick {
            cycle_id: Uuid::new_v4(),
            percent: 35,
            status: "Processing files... (35%)".to_string(),
        };
        assert_eq!(
            line_for(&event).as_deref(),
            Some("[ 35%] Processing files... (35%)")
        );
    }

    #[test]
    fn test_selection_line() {
        let selection = UploadEvent::SelectionChanged {
            count: 2,
            label: "2 files selected".to_string(),
        };
        assert_eq!(line_for(&selection).as_deref(), Some("2 files selected"));
    }

    #[test]
    fn test_terminal_and_result_events_are_silent() {
        let failed = UploadEvent::CycleFailed {
            cycle_id: Uuid::new_v4(),
            message: "bad pdf".to_string(),
        };
        assert!(line_for(&failed).is_none());
        assert!(line_for(&UploadEvent::ControlsChanged { enabled: true }).is_none());

        let saved = UploadEvent::ResultDownloaded {
            resource_id: Uuid::new_v4(),
            path: PathBuf::from("out/tds_data_output.csv"),
        };
        assert!(line_for(&saved).is_none());
    }

    #[tokio::test]
    async fn test_renderer_stops_when_senders_drop() {
        let (tx, rx) = broadcast::channel(8);
        let handle = spawn(rx);
        tx.send(UploadEvent::ControlsChanged { enabled: false }).unwrap();
        drop(tx);
        tokio::time::timeout(std::time::Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
    }
}
