//! Unit tests for the attendance workflow.

use chrono::{NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};

use super::{AttendanceWorkflow, ScanOutcome, WorkflowError};
use crate::models::{AttendanceStatus, RecordFilter, SyncSummary};
use crate::seed::SeedData;

fn seeded() -> AttendanceWorkflow {
    AttendanceWorkflow::from_seed(SeedData::builtin().unwrap())
}

fn offline() -> AttendanceWorkflow {
    let mut workflow = seeded();
    workflow.toggle_online();
    workflow
}

fn at(hour: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 8, 8)
        .unwrap()
        .and_hms_opt(hour, min, 5)
        .unwrap()
}

#[test]
fn test_scan_known_student_offline_before_ten() {
    let mut workflow = offline();
    let before = workflow.status().clone();

    let outcome = workflow.process_scan_at("2025003", at(8, 45));

    let ScanOutcome::Success { student, record } = outcome else {
        panic!("expected success");
    };
    assert_eq!(student.name, "Arjun Singh");
    assert_eq!(record.roll_number, "2025003");
    assert_eq!(record.name, "Arjun Singh");
    assert_eq!(record.status, AttendanceStatus::Present);
    assert!(!record.synced);
    assert_eq!(record.date, NaiveDate::from_ymd_opt(2025, 8, 8).unwrap());

    let after = workflow.status();
    assert_eq!(after.pending_sync_count, before.pending_sync_count + 1);
    assert_eq!(after.total_scans_today, before.total_scans_today + 1);
}

#[test]
fn test_scan_online_is_synced_and_leaves_pending_counter() {
    let mut workflow = seeded();
    let pending_before = workflow.status().pending_sync_count;

    let (_, record) = workflow.process_scan_at("2025001", at(9, 10)).into_result().unwrap();

    assert!(record.synced);
    assert_eq!(workflow.status().pending_sync_count, pending_before);
    assert_eq!(workflow.status().total_scans_today, 5);
}

#[test]
fn test_scan_marks_late_only_after_nine() {
    let mut workflow = seeded();

    let (_, nine) = workflow.process_scan_at("2025001", at(9, 59)).into_result().unwrap();
    let (_, ten) = workflow.process_scan_at("2025002", at(10, 0)).into_result().unwrap();

    assert_eq!(nine.status, AttendanceStatus::Present);
    assert_eq!(ten.status, AttendanceStatus::Late);
}

#[test]
fn test_late_after_hour_is_configurable() {
    let mut workflow = seeded().with_late_after_hour(7);
    let (_, record) = workflow.process_scan_at("2025001", at(8, 0)).into_result().unwrap();
    assert_eq!(record.status, AttendanceStatus::Late);
}

#[test]
fn test_scan_unknown_roll_changes_nothing() {
    let mut workflow = seeded();
    let records_before = workflow.records().to_vec();
    let status_before = workflow.status().clone();

    let outcome = workflow.process_scan_at("9999999", at(8, 0));

    assert_eq!(
        outcome,
        ScanOutcome::NotFound {
            roll_number: "9999999".to_string()
        }
    );
    assert_eq!(workflow.records(), records_before.as_slice());
    assert_eq!(workflow.status(), &status_before);
}

#[test]
fn test_not_found_maps_to_error() {
    let mut workflow = seeded();
    let err = workflow.process_scan_at("abc", at(8, 0)).into_result().unwrap_err();
    assert_eq!(err, WorkflowError::StudentNotFound("abc".to_string()));
}

#[test]
fn test_roll_lookup_is_exact() {
    let mut workflow = seeded();
    assert!(matches!(
        workflow.process_scan_at("202500", at(8, 0)),
        ScanOutcome::NotFound { .. }
    ));
    assert!(matches!(
        workflow.process_scan_at(" 2025001", at(8, 0)),
        ScanOutcome::NotFound { .. }
    ));
}

#[test]
fn test_new_records_go_first_with_increasing_ids() {
    let mut workflow = seeded();

    let mut ids = Vec::new();
    for roll in ["2025005", "2025004", "2025005"] {
        let (_, record) = workflow.process_scan_at(roll, at(8, 30)).into_result().unwrap();
        assert_eq!(workflow.records()[0], record);
        ids.push(record.id);
    }

    assert_eq!(ids, vec![6, 7, 8]);

    let mut all: Vec<_> = workflow.records().iter().map(|r| r.id).collect();
    all.sort_unstable();
    all.dedup();
    assert_eq!(all.len(), workflow.records().len());
}

#[test]
fn test_ids_continue_from_max_not_count() {
    let mut seed = SeedData::builtin().unwrap();
    // Gaps in the seed ids: count + 1 would collide with 6.
    seed.attendance_records.truncate(2);
    seed.attendance_records[0].id = 6;
    seed.attendance_records[1].id = 2;
    let mut workflow = AttendanceWorkflow::from_seed(seed);

    let (_, record) = workflow.process_scan_at("2025001", at(8, 0)).into_result().unwrap();
    assert_eq!(record.id, 7);
}

#[test]
fn test_id_counter_does_not_wrap() {
    let mut seed = SeedData::builtin().unwrap();
    seed.attendance_records.truncate(1);
    seed.attendance_records[0].id = u64::MAX;
    let mut workflow = AttendanceWorkflow::from_seed(seed);

    let (_, record) = workflow.process_scan_at("2025001", at(8, 0)).into_result().unwrap();
    assert_ne!(record.id, 0);
    let (_, record) = workflow.process_scan_at("2025002", at(8, 1)).into_result().unwrap();
    assert_ne!(record.id, 0);
}

#[test]
fn test_empty_log_starts_at_one() {
    let mut seed = SeedData::builtin().unwrap();
    seed.attendance_records.clear();
    let mut workflow = AttendanceWorkflow::from_seed(seed);

    let (_, record) = workflow.process_scan_at("2025002", at(8, 0)).into_result().unwrap();
    assert_eq!(record.id, 1);
}

#[test]
fn test_sync_offline_fails_without_mutation() {
    let mut workflow = offline();
    workflow.process_scan_at("2025001", at(8, 0));
    let records_before = workflow.records().to_vec();
    let status_before = workflow.status().clone();

    assert_eq!(workflow.manual_sync(), Err(WorkflowError::Offline));
    assert_eq!(workflow.records(), records_before.as_slice());
    assert_eq!(workflow.status(), &status_before);
}

#[test]
fn test_sync_online_flips_pending_records() {
    let mut workflow = seeded();
    assert_eq!(
        workflow.compute_summary(),
        SyncSummary {
            total: 5,
            synced: 3,
            pending: 2
        }
    );

    let now = Utc.with_ymd_and_hms(2025, 8, 8, 10, 0, 0).unwrap();
    let outcome = workflow.manual_sync_at(now).unwrap();

    assert_eq!(outcome.records_synced, 2);
    assert_eq!(outcome.last_sync_time, now);
    assert_eq!(workflow.status().last_sync_time, now);
    assert_eq!(workflow.status().pending_sync_count, 0);
    assert!(workflow.records().iter().all(|r| r.synced));
    assert_eq!(
        workflow.compute_summary(),
        SyncSummary {
            total: 5,
            synced: 5,
            pending: 0
        }
    );
}

#[test]
fn test_second_sync_is_noop() {
    let mut workflow = seeded();
    let first = Utc.with_ymd_and_hms(2025, 8, 8, 10, 0, 0).unwrap();
    let second = Utc.with_ymd_and_hms(2025, 8, 8, 11, 0, 0).unwrap();

    workflow.manual_sync_at(first).unwrap();
    let records_before = workflow.records().to_vec();
    let status_before = workflow.status().clone();

    let outcome = workflow.manual_sync_at(second).unwrap();

    assert_eq!(outcome.records_synced, 0);
    assert_eq!(outcome.last_sync_time, first);
    assert_eq!(workflow.records(), records_before.as_slice());
    assert_eq!(workflow.status(), &status_before);
}

#[test]
fn test_offline_scans_then_reconnect_and_sync() {
    let mut workflow = offline();
    workflow.process_scan_at("2025001", at(8, 0));
    workflow.process_scan_at("2025002", at(8, 1));
    assert_eq!(workflow.status().pending_sync_count, 4);
    assert_eq!(workflow.compute_summary().pending, 4);

    assert!(workflow.toggle_online());
    let outcome = workflow.manual_sync().unwrap();

    assert_eq!(outcome.records_synced, 4);
    assert_eq!(workflow.compute_summary().pending, 0);
}

#[test]
fn test_toggle_online_only_flips_flag() {
    let mut workflow = seeded();
    let before = workflow.status().clone();

    assert!(!workflow.toggle_online());
    assert!(!workflow.is_online());
    assert_eq!(workflow.status().pending_sync_count, before.pending_sync_count);
    assert_eq!(workflow.status().total_scans_today, before.total_scans_today);
    assert_eq!(workflow.status().last_sync_time, before.last_sync_time);

    assert!(workflow.toggle_online());
    assert_eq!(workflow.status(), &before);
}

#[test]
fn test_pending_counter_can_drift_from_summary() {
    // Running counter, not a recount of the log.
    let mut seed = SeedData::builtin().unwrap();
    seed.system_status.pending_sync_count = 7;
    let workflow = AttendanceWorkflow::from_seed(seed);

    assert_eq!(workflow.status().pending_sync_count, 7);
    assert_eq!(workflow.compute_summary().pending, 2);
}

#[test]
fn test_summary_totals_always_add_up() {
    let mut workflow = offline();
    for (i, roll) in ["2025001", "2025002", "nope", "2025003"].iter().enumerate() {
        workflow.process_scan_at(roll, at(8, i as u32));
        let summary = workflow.compute_summary();
        assert_eq!(summary.total, summary.synced + summary.pending);
        assert_eq!(summary.total, workflow.records().len());
    }
}

#[test]
fn test_filter_students_case_insensitive() {
    let workflow = seeded();

    let names: Vec<_> = workflow.filter_students("PRIYA").map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Priya Patel"]);

    let by_class: Vec<_> = workflow
        .filter_students("10b")
        .map(|s| s.roll_number.as_str())
        .collect();
    assert_eq!(by_class, vec!["2025003", "2025004"]);

    let by_roll = workflow.filter_students("005").count();
    assert_eq!(by_roll, 1);

    assert_eq!(workflow.filter_students("").count(), 5);
    assert_eq!(workflow.filter_students("zzz").count(), 0);
}

#[test]
fn test_filter_students_is_restartable() {
    let workflow = seeded();
    let matches = workflow.filter_students("10a");
    let first: Vec<_> = matches.clone().collect();
    let second: Vec<_> = matches.collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn test_filter_records_preserves_order() {
    let mut workflow = offline();
    workflow.process_scan_at("2025005", at(8, 0));

    let all: Vec<_> = workflow.filter_records(RecordFilter::All).map(|r| r.id).collect();
    assert_eq!(all, vec![6, 1, 2, 3, 4, 5]);

    let pending: Vec<_> = workflow.filter_records(RecordFilter::Pending).map(|r| r.id).collect();
    assert_eq!(pending, vec![6, 3, 4]);

    let synced: Vec<_> = workflow.filter_records(RecordFilter::Synced).map(|r| r.id).collect();
    assert_eq!(synced, vec![1, 2, 5]);
}

#[test]
fn test_scan_time_truncated_to_seconds() {
    let mut workflow = seeded();
    let now = at(8, 0).with_nanosecond(123_456_789).unwrap();
    let (_, record) = workflow.process_scan_at("2025001", now).into_result().unwrap();
    assert_eq!(record.time.nanosecond(), 0);
    assert_eq!(record.time.second(), 5);
}
