//! Attendance recording and sync workflow.
//!
//! [`AttendanceWorkflow`] owns the roster, the record log (most recent first),
//! and the status counters. Every operation is synchronous and applies its
//! mutation in one step, so callers that simulate latency should wait first
//! and invoke the operation last.
//!
//! # Example
//!
//! ```ignore
//! use attendance_scanner::seed::SeedData;
//! use attendance_scanner::workflow::{AttendanceWorkflow, ScanOutcome};
//!
//! let mut workflow = AttendanceWorkflow::from_seed(SeedData::builtin()?);
//! if let ScanOutcome::Success { record, .. } = workflow.process_scan("2025003") {
//!     println!("{} is {}", record.name, record.status);
//! }
//! ```

mod error;

#[cfg(test)]
mod tests;

pub use error::{Result, WorkflowError};

use chrono::{DateTime, Local, NaiveDateTime, Timelike, Utc};
use tracing::{debug, info};

use crate::models::{
    AttendanceRecord, AttendanceStatus, RecordFilter, Student, SyncOutcome, SyncSummary, SystemStatus,
};
use crate::seed::SeedData;

/// Local hour after which a scan counts as late.
pub const DEFAULT_LATE_AFTER_HOUR: u32 = 9;

/// Result of processing a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Attendance recorded for a known student.
    Success { student: Student, record: AttendanceRecord },
    /// Roll number not on the roster. Nothing was recorded.
    NotFound { roll_number: String },
}

impl ScanOutcome {
    /// Convert into a `Result`, mapping `NotFound` to [`WorkflowError::StudentNotFound`].
    pub fn into_result(self) -> Result<(Student, AttendanceRecord)> {
        match self {
            Self::Success { student, record } => Ok((student, record)),
            Self::NotFound { roll_number } => Err(WorkflowError::StudentNotFound(roll_number)),
        }
    }
}

/// In-memory attendance state and the operations that mutate it.
#[derive(Debug, Clone)]
pub struct AttendanceWorkflow {
    students: Vec<Student>,
    records: Vec<AttendanceRecord>,
    status: SystemStatus,
    next_id: u64,
    late_after_hour: u32,
}

impl AttendanceWorkflow {
    /// Create a workflow from an initial roster, record log, and status.
    ///
    /// New record ids continue from the largest existing id. The counter
    /// saturates at `u64::MAX` instead of wrapping.
    pub fn new(students: Vec<Student>, records: Vec<AttendanceRecord>, status: SystemStatus) -> Self {
        let next_id = records
            .iter()
            .map(|r| r.id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .unwrap_or(u64::MAX);
        Self {
            students,
            records,
            status,
            next_id,
            late_after_hour: DEFAULT_LATE_AFTER_HOUR,
        }
    }

    /// Create a workflow from loaded seed data.
    pub fn from_seed(seed: SeedData) -> Self {
        Self::new(seed.students, seed.attendance_records, seed.system_status)
    }

    /// Override the hour after which scans are marked late.
    pub fn with_late_after_hour(mut self, hour: u32) -> Self {
        self.late_after_hour = hour;
        self
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// Record log, most recent first.
    pub fn records(&self) -> &[AttendanceRecord] {
        &self.records
    }

    pub fn status(&self) -> &SystemStatus {
        &self.status
    }

    pub fn is_online(&self) -> bool {
        self.status.is_online
    }

    /// Look up a student by exact roll number.
    pub fn student(&self, roll_number: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.roll_number == roll_number)
    }

    /// Record attendance for `roll_number` at the current local time.
    pub fn process_scan(&mut self, roll_number: &str) -> ScanOutcome {
        self.process_scan_at(roll_number, Local::now().naive_local())
    }

    /// Record attendance for `roll_number` at the given local time.
    pub fn process_scan_at(&mut self, roll_number: &str, now: NaiveDateTime) -> ScanOutcome {
        let Some(student) = self.student(roll_number).cloned() else {
            debug!("Scan rejected, unknown roll number {roll_number}");
            return ScanOutcome::NotFound {
                roll_number: roll_number.to_string(),
            };
        };

        let record = AttendanceRecord {
            id: self.next_id,
            roll_number: student.roll_number.clone(),
            name: student.name.clone(),
            date: now.date(),
            time: now.time().with_nanosecond(0).unwrap_or(now.time()),
            status: AttendanceStatus::for_hour(now.hour(), self.late_after_hour),
            synced: self.status.is_online,
        };

        self.next_id = self.next_id.saturating_add(1);
        self.records.insert(0, record.clone());
        self.status.total_scans_today += 1;
        if !self.status.is_online {
            self.status.pending_sync_count += 1;
        }

        info!(
            "Recorded {} ({}) as {} [{}]",
            record.name,
            record.roll_number,
            record.status,
            record.sync_label()
        );

        ScanOutcome::Success { student, record }
    }

    /// Mark every pending record as synced, stamped with the current time.
    pub fn manual_sync(&mut self) -> Result<SyncOutcome> {
        self.manual_sync_at(Utc::now())
    }

    /// Mark every pending record as synced, stamped with `now`.
    ///
    /// Fails with [`WorkflowError::Offline`] while offline. With nothing pending
    /// and a zero pending counter this is a no-op and `last_sync_time` is kept.
    pub fn manual_sync_at(&mut self, now: DateTime<Utc>) -> Result<SyncOutcome> {
        if !self.status.is_online {
            return Err(WorkflowError::Offline);
        }

        let mut records_synced = 0;
        for record in self.records.iter_mut().filter(|r| !r.synced) {
            record.synced = true;
            records_synced += 1;
        }

        if records_synced > 0 || self.status.pending_sync_count > 0 {
            self.status.pending_sync_count = 0;
            self.status.last_sync_time = now;
        }

        info!("Manual sync complete: {records_synced} records synced");

        Ok(SyncOutcome {
            records_synced,
            last_sync_time: self.status.last_sync_time,
        })
    }

    /// Flip the online flag and return the new value. Counters are left alone.
    pub fn toggle_online(&mut self) -> bool {
        self.status.is_online = !self.status.is_online;
        info!("Connection status: {}", self.status.connection_label());
        self.status.is_online
    }

    /// Totals counted fresh from the record log.
    pub fn compute_summary(&self) -> SyncSummary {
        let total = self.records.len();
        let synced = self.records.iter().filter(|r| r.synced).count();
        SyncSummary {
            total,
            synced,
            pending: total - synced,
        }
    }

    /// Students whose name, roll number, or class contains `query`, ignoring case.
    /// An empty query matches everyone. Roster order is preserved.
    pub fn filter_students<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a Student> + Clone + use<'a> {
        let needle = query.trim().to_lowercase();
        self.students.iter().filter(move |s| s.matches(&needle))
    }

    /// Records accepted by `filter`, most recent first.
    pub fn filter_records(&self, filter: RecordFilter) -> impl Iterator<Item = &AttendanceRecord> + Clone + '_ {
        self.records.iter().filter(move |r| filter.accepts(r))
    }
}
