//! # Record Identifiers
//!
//! Identifiers look like `AAR-20251107-0042`: the UTC date of creation and a
//! four-digit sequence.

use std::sync::atomic::{AtomicU32, Ordering};

use chrono::{DateTime, Utc};

const SEQUENCE_MODULUS: u32 = 10_000;

/// Issues record identifiers.
///
/// The sequence starts at `unix_seconds % 10000` and advances by one per id,
/// so a single generator does not repeat a value until it has issued 10000.
#[derive(Debug)]
pub struct RecordIdGenerator {
    next: AtomicU32,
}

impl RecordIdGenerator {
    /// Seed from the current time
    pub fn new() -> Self {
        Self::starting_at((Utc::now().timestamp().rem_euclid(SEQUENCE_MODULUS as i64)) as u32)
    }

    /// Seed with an explicit first sequence number
    pub fn starting_at(sequence: u32) -> Self {
        Self {
            next: AtomicU32::new(sequence % SEQUENCE_MODULUS),
        }
    }

    /// Identifier for a record created now
    pub fn next_id(&self) -> String {
        self.next_id_at(Utc::now())
    }

    /// Identifier for a record created at `at`
    pub fn next_id_at(&self, at: DateTime<Utc>) -> String {
        let sequence = self
            .next
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| {
                Some((n + 1) % SEQUENCE_MODULUS)
            })
            .unwrap_or_default();
        format_id(at, sequence)
    }
}

impl Default for RecordIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn format_id(at: DateTime<Utc>, sequence: u32) -> String {
    format!("AAR-{}-{:04}", at.format("%Y%m%d"), sequence)
}
