//! Attendance records and record filters.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Arrival status assigned at scan time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Late,
}

impl AttendanceStatus {
    /// Status for a scan at the given local hour. Scans after `late_after_hour` are late.
    pub fn for_hour(hour: u32, late_after_hour: u32) -> Self {
        if hour > late_after_hour { Self::Late } else { Self::Present }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Late => "Late",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Largest record id accepted from seed data.
pub const MAX_RECORD_ID: u64 = i64::MAX as u64;

/// One attendance event. `name` is copied from the roster when the record is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: u64,
    pub roll_number: String,
    pub name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: AttendanceStatus,
    pub synced: bool,
}

impl AttendanceRecord {
    /// Human-readable sync label.
    pub fn sync_label(&self) -> &'static str {
        if self.synced { "Synced" } else { "Pending" }
    }
}

/// Record list filter by sync state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordFilter {
    #[default]
    All,
    Synced,
    Pending,
}

impl RecordFilter {
    pub const ALL: [RecordFilter; 3] = [RecordFilter::All, RecordFilter::Synced, RecordFilter::Pending];

    pub fn accepts(&self, record: &AttendanceRecord) -> bool {
        match self {
            Self::All => true,
            Self::Synced => record.synced,
            Self::Pending => !record.synced,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::All => "All Records",
            Self::Synced => "Synced",
            Self::Pending => "Pending Sync",
        }
    }
}
