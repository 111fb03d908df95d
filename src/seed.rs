//! Sample roster and attendance data loaded at startup.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{AppError, Result};
use crate::models::{AttendanceRecord, MAX_RECORD_ID, Student, SystemStatus};

const BUILTIN_SEED: &str = include_str!("../data/sample_data.json");

/// Initial in-memory dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedData {
    pub students: Vec<Student>,
    pub attendance_records: Vec<AttendanceRecord>,
    pub system_status: SystemStatus,
}

impl SeedData {
    /// The dataset bundled with the application.
    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN_SEED)
    }

    /// Load a dataset from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let seed = Self::parse(&content)?;
        info!(
            "Loaded seed data from {:?}: {} students, {} records",
            path,
            seed.students.len(),
            seed.attendance_records.len()
        );
        Ok(seed)
    }

    /// Load from `path` when given, otherwise the bundled dataset.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::builtin(),
        }
    }

    /// Parse and validate a JSON dataset.
    pub fn parse(content: &str) -> Result<Self> {
        let seed: SeedData = serde_json::from_str(content)?;
        seed.validate()?;
        Ok(seed)
    }

    /// Check roster and record integrity.
    pub fn validate(&self) -> Result<()> {
        let mut rolls = HashSet::new();
        for student in &self.students {
            if student.roll_number.trim().is_empty() {
                return Err(AppError::validation(format!(
                    "Student '{}' has an empty roll number",
                    student.name
                )));
            }
            if !rolls.insert(student.roll_number.as_str()) {
                return Err(AppError::validation(format!(
                    "Duplicate roll number: {}",
                    student.roll_number
                )));
            }
        }

        let mut ids = HashSet::new();
        for record in &self.attendance_records {
            if record.id == 0 {
                return Err(AppError::validation("Record ids must start at 1"));
            }
            if record.id > MAX_RECORD_ID {
                return Err(AppError::validation(format!(
                    "Record id {} exceeds the maximum of {MAX_RECORD_ID}",
                    record.id
                )));
            }
            if !ids.insert(record.id) {
                return Err(AppError::validation(format!("Duplicate record id: {}", record.id)));
            }
            if !rolls.contains(record.roll_number.as_str()) {
                return Err(AppError::validation(format!(
                    "Record {} references unknown roll number {}",
                    record.id, record.roll_number
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_seed_loads() {
        let seed = SeedData::builtin().unwrap();
        assert_eq!(seed.students.len(), 5);
        assert_eq!(seed.attendance_records.len(), 5);
        assert!(seed.system_status.is_online);
        assert_eq!(seed.system_status.pending_sync_count, 2);
        assert_eq!(seed.system_status.total_scans_today, 4);
        assert_eq!(seed.students[2].name, "Arjun Singh");
    }

    #[test]
    fn test_duplicate_roll_rejected() {
        let mut seed = SeedData::builtin().unwrap();
        seed.students[1].roll_number = seed.students[0].roll_number.clone();
        assert!(matches!(seed.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_duplicate_record_id_rejected() {
        let mut seed = SeedData::builtin().unwrap();
        seed.attendance_records[1].id = seed.attendance_records[0].id;
        assert!(seed.validate().is_err());
    }

    #[test]
    fn test_out_of_range_record_id_rejected() {
        let mut seed = SeedData::builtin().unwrap();
        seed.attendance_records[0].id = u64::MAX;
        assert!(matches!(seed.validate(), Err(AppError::Validation(_))));

        seed.attendance_records[0].id = MAX_RECORD_ID;
        assert!(seed.validate().is_ok());
    }

    #[test]
    fn test_orphan_record_rejected() {
        let mut seed = SeedData::builtin().unwrap();
        seed.attendance_records[0].roll_number = "9999999".to_string();
        assert!(seed.validate().is_err());
    }

    #[test]
    fn test_malformed_json_is_data_error() {
        assert!(matches!(SeedData::parse("{ not json"), Err(AppError::Json(_))));
    }

    #[test]
    fn test_from_file_roundtrip() {
        let seed = SeedData::builtin().unwrap();
        let path = std::env::temp_dir().join("attendance_scanner_seed_test.json");
        std::fs::write(&path, serde_json::to_string_pretty(&seed).unwrap()).unwrap();

        let loaded = SeedData::load(Some(&path)).unwrap();
        assert_eq!(loaded.students, seed.students);
        assert_eq!(loaded.attendance_records, seed.attendance_records);

        std::fs::remove_file(&path).ok();
    }
}
