//! # Record Store
//!
//! One `RwLock` guards the whole map. Every public method takes the lock
//! exactly once: shared for reads, exclusive for `create` and `update`.
//! Nothing here performs I/O, and no method calls another while locked.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::errors::{RecordError, RecordResult};
use super::model::Record;
use super::sample;
use super::stats::RecordStats;

/// Filters for [`RecordStore::search_with`]. An empty field is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFilter {
    /// Case-insensitive substring of the operation name
    pub operation_name: String,
    /// Case-insensitive substring of the unit designation
    pub unit: String,
    /// Exact, case-sensitive mission type
    pub mission_type: String,
}

impl SearchFilter {
    pub fn new(
        operation_name: impl Into<String>,
        unit: impl Into<String>,
        mission_type: impl Into<String>,
    ) -> Self {
        Self {
            operation_name: operation_name.into(),
            unit: unit.into(),
            mission_type: mission_type.into(),
        }
    }

    /// True when no filter is set
    pub fn is_empty(&self) -> bool {
        self.operation_name.is_empty() && self.unit.is_empty() && self.mission_type.is_empty()
    }

    fn matches(&self, record: &Record, operation_name_lower: &str, unit_lower: &str) -> bool {
        if !self.operation_name.is_empty()
            && !record
                .operation_name
                .to_lowercase()
                .contains(operation_name_lower)
        {
            return false;
        }
        if !self.unit.is_empty() && !record.unit_designation.to_lowercase().contains(unit_lower) {
            return false;
        }
        if !self.mission_type.is_empty() && record.mission_type != self.mission_type {
            return false;
        }
        true
    }
}

/// In-memory AAR store
#[derive(Debug, Default)]
pub struct RecordStore {
    records: RwLock<HashMap<String, Record>>,
}

impl RecordStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with the demo records
    pub fn with_sample_data() -> Self {
        let now = Utc::now();
        let records = sample::sample_records(now)
            .into_iter()
            .map(|r| (r.id.clone(), r))
            .collect();
        Self {
            records: RwLock::new(records),
        }
    }

    // Mutations never panic mid-way, so a poisoned map is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Record>> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Record>> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert a new record.
    ///
    /// Stamps `created_at`, `updated_at` and `submitted_date` with the same
    /// instant and returns the stored copy.
    pub fn create(&self, mut record: Record) -> RecordResult<Record> {
        let mut records = self.write();

        if records.contains_key(&record.id) {
            return Err(RecordError::AlreadyExists(record.id));
        }

        let now = Utc::now();
        record.created_at = now;
        record.updated_at = now;
        record.submitted_date = now;

        records.insert(record.id.clone(), record.clone());
        debug!(id = %record.id, total = records.len(), "record created");
        Ok(record)
    }

    /// Look up a record. The returned value is a snapshot.
    pub fn get_by_id(&self, id: &str) -> RecordResult<Record> {
        self.read()
            .get(id)
            .cloned()
            .ok_or_else(|| RecordError::NotFound(id.to_string()))
    }

    /// Replace a record wholesale.
    ///
    /// Refreshes `updated_at`; the stored `created_at` and `submitted_date`
    /// are carried over regardless of what the caller passed.
    pub fn update(&self, mut record: Record) -> RecordResult<Record> {
        let mut records = self.write();

        let existing = match records.get_mut(&record.id) {
            Some(existing) => existing,
            None => return Err(RecordError::NotFound(record.id)),
        };

        record.created_at = existing.created_at;
        record.submitted_date = existing.submitted_date;
        record.updated_at = Utc::now();

        *existing = record.clone();
        debug!(id = %record.id, "record updated");
        Ok(record)
    }

    /// All records, newest submission first
    pub fn get_all(&self) -> Vec<Record> {
        let mut records: Vec<Record> = self.read().values().cloned().collect();
        sort_newest_first(&mut records);
        records
    }

    /// Records matching every non-empty filter, newest submission first.
    ///
    /// With all three filters empty this returns the same as [`get_all`](Self::get_all).
    pub fn search(&self, operation_name: &str, unit: &str, mission_type: &str) -> Vec<Record> {
        self.search_with(&SearchFilter::new(operation_name, unit, mission_type))
    }

    pub fn search_with(&self, filter: &SearchFilter) -> Vec<Record> {
        let operation_name_lower = filter.operation_name.to_lowercase();
        let unit_lower = filter.unit.to_lowercase();

        let mut results: Vec<Record> = self
            .read()
            .values()
            .filter(|r| filter.matches(r, &operation_name_lower, &unit_lower))
            .cloned()
            .collect();
        sort_newest_first(&mut results);
        results
    }

    /// Totals by mission type and status
    pub fn get_stats(&self) -> RecordStats {
        let records = self.read();
        RecordStats::tally(
            records
                .values()
                .map(|r| (r.mission_type.as_str(), r.status)),
        )
    }

    /// Whether a record with this id is stored
    pub fn contains(&self, id: &str) -> bool {
        self.read().contains_key(id)
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// Ties on submitted_date fall back to id so listing order is deterministic.
fn sort_newest_first(records: &mut [Record]) {
    records.sort_by(|a, b| {
        b.submitted_date
            .cmp(&a.submitted_date)
            .then_with(|| a.id.cmp(&b.id))
    });
}
