//! System status counters and sync results.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Scanner status counters.
///
/// `pending_sync_count` and `total_scans_today` are running counters: they are
/// bumped on scan and reset on sync, not recomputed from the record log.
/// Use [`SyncSummary`] for figures derived from the records themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    pub is_online: bool,
    pub last_sync_time: DateTime<Utc>,
    pub pending_sync_count: u32,
    pub total_scans_today: u32,
    pub google_sheets_connected: bool,
}

impl SystemStatus {
    /// Label for the last sync: "Today, HH:MM" on the current local date,
    /// otherwise the full local date and time.
    pub fn last_sync_label(&self, now: DateTime<Local>) -> String {
        let last = self.last_sync_time.with_timezone(&Local);
        if last.date_naive() == now.date_naive() {
            format!("Today, {}", last.format("%H:%M"))
        } else {
            last.format("%Y-%m-%d %H:%M").to_string()
        }
    }

    pub fn connection_label(&self) -> &'static str {
        if self.is_online { "Online" } else { "Offline" }
    }
}

/// Counts derived fresh from the record log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncSummary {
    pub total: usize,
    pub synced: usize,
    pub pending: usize,
}

/// Result of a successful manual sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOutcome {
    pub records_synced: usize,
    pub last_sync_time: DateTime<Utc>,
}

impl SyncOutcome {
    /// Get summary message.
    pub fn summary(&self) -> String {
        match self.records_synced {
            0 => "Nothing to sync".to_string(),
            1 => "Synced 1 record".to_string(),
            n => format!("Synced {n} records"),
        }
    }
}
