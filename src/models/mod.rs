//! Data models for students, attendance records, and scanner status.

pub mod attendance;
pub mod status;
pub mod student;

pub use attendance::{AttendanceRecord, AttendanceStatus, MAX_RECORD_ID, RecordFilter};
pub use status::{SyncOutcome, SyncSummary, SystemStatus};
pub use student::Student;
