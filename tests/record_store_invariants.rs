//! Record Store Invariant Tests
//!
//! Behaviour the HTTP layer relies on:
//! - Identifiers are unique keys
//! - Reads are snapshots
//! - Listings are newest first
//! - Statistics agree with the stored records
//! - Concurrent writers never lose records

use std::sync::Arc;
use std::thread;

use aarstore::records::{
    MissionType, Record, RecordError, RecordIdGenerator, RecordStore, ReportStatus, SearchFilter,
};

fn record(id: &str, operation: &str, unit: &str, mission: MissionType) -> Record {
    Record {
        id: id.to_string(),
        operation_name: operation.to_string(),
        unit_designation: unit.to_string(),
        mission_type: mission.into(),
        ..Default::default()
    }
}

// =============================================================================
// Identity
// =============================================================================

/// A second create with the same id is rejected and leaves the first intact.
#[test]
fn test_duplicate_id_rejected() {
    let store = RecordStore::new();
    store
        .create(record("AAR-1", "First", "1st BN", MissionType::Training))
        .unwrap();

    let err = store
        .create(record("AAR-1", "Second", "2nd BN", MissionType::Combat))
        .unwrap_err();
    assert!(matches!(err, RecordError::AlreadyExists(ref id) if id == "AAR-1"));

    assert_eq!(store.len(), 1);
    assert_eq!(store.get_by_id("AAR-1").unwrap().operation_name, "First");
}

/// Updating an unknown id never inserts it.
#[test]
fn test_update_unknown_is_not_upsert() {
    let store = RecordStore::new();
    let err = store
        .update(record("AAR-404", "Ghost", "", MissionType::Other))
        .unwrap_err();

    assert!(matches!(err, RecordError::NotFound(_)));
    assert!(store.is_empty());
}

// =============================================================================
// Snapshots
// =============================================================================

/// Mutating a returned record does not change the stored one.
#[test]
fn test_reads_are_snapshots() {
    let store = RecordStore::with_sample_data();
    let mut copy = store.get_by_id("AAR-20251005-0001").unwrap();
    copy.status = ReportStatus::Archived;
    copy.attachments.clear();

    let stored = store.get_by_id("AAR-20251005-0001").unwrap();
    assert_eq!(stored.status, ReportStatus::Approved);
    assert_eq!(stored.attachments.len(), 3);

    let mut listed = store.get_all();
    listed[0].operation_name.clear();
    assert!(!store.get_all()[0].operation_name.is_empty());
}

/// Update keeps the creation and submission instants of the stored record.
#[test]
fn test_update_preserves_creation_times() {
    let store = RecordStore::new();
    let created = store
        .create(record("AAR-2", "Op", "Unit", MissionType::Combat))
        .unwrap();

    let mut changed = created.clone();
    changed.status = ReportStatus::Submitted;
    changed.created_at = chrono::DateTime::default();
    let updated = store.update(changed).unwrap();

    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.submitted_date, created.submitted_date);
    assert!(updated.updated_at >= created.updated_at);
    assert_eq!(updated.status, ReportStatus::Submitted);
}

// =============================================================================
// Ordering and search
// =============================================================================

/// Seed data lists newest first and new records go to the top.
#[test]
fn test_newest_first() {
    let store = RecordStore::with_sample_data();
    let ids: Vec<_> = store.get_all().into_iter().map(|r| r.id).collect();
    assert_eq!(
        ids,
        ["AAR-20251005-0001", "AAR-20250920-0002", "AAR-20250815-0004"]
    );

    store
        .create(record("AAR-NEW", "Fresh", "Unit", MissionType::Other))
        .unwrap();
    assert_eq!(store.get_all()[0].id, "AAR-NEW");
}

/// Search results are a subset of get_all in the same order.
#[test]
fn test_search_is_ordered_subset() {
    let store = RecordStore::with_sample_data();
    let all: Vec<_> = store.get_all().into_iter().map(|r| r.id).collect();

    let found: Vec<_> = store
        .search("", "", "Training Exercise")
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(found.len(), 2);

    let positions: Vec<_> = found
        .iter()
        .map(|id| all.iter().position(|a| a == id).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

/// Name and unit match case-insensitively; mission type must match exactly.
#[test]
fn test_search_matching_rules() {
    let store = RecordStore::with_sample_data();

    assert_eq!(store.search("IRON", "", "").len(), 1);
    assert_eq!(store.search("", "marine expeditionary", "").len(), 1);
    assert!(store.search("", "", "security cooperation").is_empty());
    assert_eq!(store.search("", "", "Security Cooperation").len(), 1);
    assert!(store.search("Iron", "3rd Infantry", "").is_empty());

    let filter = SearchFilter::new("", "", "");
    assert_eq!(store.search_with(&filter).len(), 3);
}

// =============================================================================
// Statistics
// =============================================================================

/// Counts always sum to the total.
#[test]
fn test_stats_agree_with_records() {
    let store = RecordStore::with_sample_data();
    store
        .create(record("AAR-X", "Op X", "Unit", MissionType::Humanitarian))
        .unwrap();

    let stats = store.get_stats();
    assert_eq!(stats.total, 4);
    assert_eq!(stats.by_mission_type.values().sum::<usize>(), 4);
    assert_eq!(stats.by_status.values().sum::<usize>(), 4);
    assert_eq!(stats.status_count(ReportStatus::Draft), 1);
    assert_eq!(stats.status_count(ReportStatus::Approved), 3);
    assert_eq!(stats.mission_type_count("humanitarian assistance"), 0);
    assert_eq!(stats.mission_type_count(MissionType::Humanitarian.as_str()), 1);
}

#[test]
fn test_empty_store_stats() {
    let stats = RecordStore::new().get_stats();
    assert_eq!(stats.total, 0);
    assert!(stats.by_mission_type.is_empty());
    assert!(stats.by_status.is_empty());
}

// =============================================================================
// Concurrency
// =============================================================================

/// Parallel creates with generated ids all land.
#[test]
fn test_concurrent_creates() {
    let store = Arc::new(RecordStore::new());
    let ids = Arc::new(RecordIdGenerator::starting_at(0));

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let store = Arc::clone(&store);
            let ids = Arc::clone(&ids);
            thread::spawn(move || {
                for n in 0..50 {
                    let id = ids.next_id();
                    let op = format!("Op {}-{}", t, n);
                    store
                        .create(record(&id, &op, "Unit", MissionType::Training))
                        .unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.len(), 400);
    assert_eq!(store.get_stats().total, 400);
}

/// Readers running alongside writers always see whole records.
#[test]
fn test_concurrent_status_updates() {
    let store = Arc::new(RecordStore::with_sample_data());
    let id = "AAR-20250920-0002";

    let writers: Vec<_> = ReportStatus::ALL
        .iter()
        .copied()
        .map(|status| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..25 {
                    let mut r = store.get_by_id(id).unwrap();
                    r.status = status;
                    store.update(r).unwrap();
                }
            })
        })
        .collect();

    let reader = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for _ in 0..100 {
                let r = store.get_by_id(id).unwrap();
                assert_eq!(r.attachments.len(), 5);
                assert_eq!(store.get_stats().total, 3);
            }
        })
    };

    for handle in writers {
        handle.join().unwrap();
    }
    reader.join().unwrap();

    assert_eq!(store.len(), 3);
}
