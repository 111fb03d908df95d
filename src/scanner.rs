//! Simulated scanner hardware and remote sync.
//!
//! Nothing here touches workflow state. Each task waits out its simulated
//! latency and then reports what the UI should apply, so an abandoned task
//! leaves no partial changes behind.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Local;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::{AppError, Result};

/// Where a scan comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanSource {
    /// Live camera scan.
    Camera,
    /// QR code decoded from an uploaded image.
    ImageUpload(PathBuf),
}

impl ScanSource {
    /// Status text while the scan is in flight.
    pub fn busy_label(&self) -> &'static str {
        match self {
            Self::Camera => "Scanning...",
            Self::ImageUpload(_) => "Processing...",
        }
    }
}

/// Scan progress message from async task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanProgress {
    Started,
    Decoded { roll_number: String },
    Failed(String),
}

/// Sync progress message from async task.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncProgress {
    Started,
    Progress { percent: f32, message: String },
    /// Remote store acknowledged; apply the sync now.
    Ready,
}

/// Resolve the roll number a scan produces.
///
/// An uploaded image whose file stem is a roster roll number decodes to that
/// student. Anything else resolves to a roster entry picked by `entropy`.
pub fn pick_roll(source: &ScanSource, roster: &[String], entropy: u32) -> Result<String> {
    if let ScanSource::ImageUpload(path) = source
        && let Some(roll) = decode_file_stem(path, roster)
    {
        return Ok(roll);
    }

    if roster.is_empty() {
        return Err(AppError::validation("No students on the roster"));
    }

    let index = entropy as usize % roster.len();
    Ok(roster[index].clone())
}

fn decode_file_stem(path: &Path, roster: &[String]) -> Option<String> {
    let stem = path.file_stem()?.to_str()?.trim();
    roster.iter().find(|roll| roll.as_str() == stem).cloned()
}

/// Run a simulated scan in background and report via channel.
pub async fn run_scan_background(
    source: ScanSource,
    roster: Vec<String>,
    delay: Duration,
    tx: mpsc::UnboundedSender<ScanProgress>,
) {
    let _ = tx.send(ScanProgress::Started);
    debug!("Simulated scan started: {source:?}");

    tokio::time::sleep(delay).await;

    let entropy = Local::now().timestamp_subsec_nanos();
    match pick_roll(&source, &roster, entropy) {
        Ok(roll_number) => {
            info!("Simulated scan decoded roll number {roll_number}");
            let _ = tx.send(ScanProgress::Decoded { roll_number });
        }
        Err(e) => {
            warn!("Simulated scan failed: {e}");
            let _ = tx.send(ScanProgress::Failed(e.to_string()));
        }
    }
}

/// Run a simulated remote sync in background and report progress via channel.
pub async fn run_sync_background(delay: Duration, tx: mpsc::UnboundedSender<SyncProgress>) {
    let _ = tx.send(SyncProgress::Started);

    let _ = tx.send(SyncProgress::Progress {
        percent: 0.1,
        message: "Connecting to Google Sheets...".to_string(),
    });
    tokio::time::sleep(delay / 2).await;

    let _ = tx.send(SyncProgress::Progress {
        percent: 0.6,
        message: "Uploading pending records...".to_string(),
    });
    tokio::time::sleep(delay - delay / 2).await;

    info!("Simulated remote sync acknowledged");
    let _ = tx.send(SyncProgress::Ready);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<String> {
        ["2025001", "2025002", "2025003"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_pick_roll_camera_uses_entropy() {
        let roster = roster();
        assert_eq!(pick_roll(&ScanSource::Camera, &roster, 0).unwrap(), "2025001");
        assert_eq!(pick_roll(&ScanSource::Camera, &roster, 4).unwrap(), "2025002");
    }

    #[test]
    fn test_pick_roll_decodes_file_stem() {
        let source = ScanSource::ImageUpload(PathBuf::from("/tmp/qr/2025003.png"));
        assert_eq!(pick_roll(&source, &roster(), 0).unwrap(), "2025003");
    }

    #[test]
    fn test_pick_roll_unknown_stem_falls_back_to_roster() {
        let source = ScanSource::ImageUpload(PathBuf::from("photo.jpg"));
        let roll = pick_roll(&source, &roster(), 7).unwrap();
        assert!(roster().contains(&roll));
    }

    #[test]
    fn test_pick_roll_empty_roster() {
        assert!(pick_roll(&ScanSource::Camera, &[], 1).is_err());
    }

    #[tokio::test]
    async fn test_scan_background_reports_decoded_roll() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let source = ScanSource::ImageUpload(PathBuf::from("2025002.png"));

        run_scan_background(source, roster(), Duration::ZERO, tx).await;

        assert_eq!(rx.recv().await, Some(ScanProgress::Started));
        assert_eq!(
            rx.recv().await,
            Some(ScanProgress::Decoded {
                roll_number: "2025002".to_string()
            })
        );
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_scan_background_reports_failure() {
        let (tx, mut rx) = mpsc::unbounded_channel();

        run_scan_background(ScanSource::Camera, Vec::new(), Duration::ZERO, tx).await;

        assert_eq!(rx.recv().await, Some(ScanProgress::Started));
        assert!(matches!(rx.recv().await, Some(ScanProgress::Failed(_))));
    }

    #[tokio::test]
    async fn test_sync_background_ends_ready() {
        let (tx, mut rx) = mpsc::unbounded_channel();

        run_sync_background(Duration::from_millis(2), tx).await;

        let mut messages = Vec::new();
        while let Some(msg) = rx.recv().await {
            messages.push(msg);
        }
        assert_eq!(messages.first(), Some(&SyncProgress::Started));
        assert_eq!(messages.last(), Some(&SyncProgress::Ready));
        assert_eq!(messages.len(), 4);
    }
}
