//! # Record Statistics

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::model::ReportStatus;

/// Aggregate counts over the store at one instant.
///
/// Groupings only contain values that currently have at least one record.
/// Use the accessors to read a count; an absent key reads as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordStats {
    pub total: usize,
    pub by_mission_type: BTreeMap<String, usize>,
    pub by_status: BTreeMap<ReportStatus, usize>,
}

impl RecordStats {
    pub(crate) fn tally<'a>(records: impl IntoIterator<Item = (&'a str, ReportStatus)>) -> Self {
        let mut stats = Self::default();
        for (mission_type, status) in records {
            stats.total += 1;
            *stats
                .by_mission_type
                .entry(mission_type.to_string())
                .or_insert(0) += 1;
            *stats.by_status.entry(status).or_insert(0) += 1;
        }
        stats
    }

    /// Number of records with exactly this mission type
    pub fn mission_type_count(&self, mission_type: &str) -> usize {
        self.by_mission_type.get(mission_type).copied().unwrap_or(0)
    }

    /// Number of records in this status
    pub fn status_count(&self, status: ReportStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}
