//! # AAR Data Model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a closed-set field receives an unknown value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind}: {value}")]
pub struct UnknownValue {
    pub kind: &'static str,
    pub value: String,
}

/// Handling caveat printed on every page of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Classification {
    #[default]
    #[serde(rename = "UNCLASSIFIED")]
    Unclassified,
    #[serde(rename = "CUI")]
    Cui,
    #[serde(rename = "CONFIDENTIAL")]
    Confidential,
    #[serde(rename = "SECRET")]
    Secret,
}

impl Classification {
    pub const ALL: [Classification; 4] = [
        Classification::Unclassified,
        Classification::Cui,
        Classification::Confidential,
        Classification::Secret,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Unclassified => "UNCLASSIFIED",
            Classification::Cui => "CUI",
            Classification::Confidential => "CONFIDENTIAL",
            Classification::Secret => "SECRET",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Classification {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownValue {
                kind: "classification",
                value: s.to_string(),
            })
    }
}

/// Workflow state of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum ReportStatus {
    #[default]
    Draft,
    Submitted,
    #[serde(rename = "Under Review")]
    UnderReview,
    Approved,
    Archived,
}

impl ReportStatus {
    pub const ALL: [ReportStatus; 5] = [
        ReportStatus::Draft,
        ReportStatus::Submitted,
        ReportStatus::UnderReview,
        ReportStatus::Approved,
        ReportStatus::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Draft => "Draft",
            ReportStatus::Submitted => "Submitted",
            ReportStatus::UnderReview => "Under Review",
            ReportStatus::Approved => "Approved",
            ReportStatus::Archived => "Archived",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportStatus {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| UnknownValue {
                kind: "status",
                value: s.to_string(),
            })
    }
}

/// Canonical mission types offered by the entry form.
///
/// Records store the mission type as a plain string; search matches it
/// exactly, so values outside this list stay representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissionType {
    Training,
    Combat,
    Humanitarian,
    Security,
    Other,
}

impl MissionType {
    pub const ALL: [MissionType; 5] = [
        MissionType::Training,
        MissionType::Combat,
        MissionType::Humanitarian,
        MissionType::Security,
        MissionType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MissionType::Training => "Training Exercise",
            MissionType::Combat => "Combat Operations",
            MissionType::Humanitarian => "Humanitarian Assistance",
            MissionType::Security => "Security Cooperation",
            MissionType::Other => "Other",
        }
    }
}

impl fmt::Display for MissionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<MissionType> for String {
    fn from(mission_type: MissionType) -> Self {
        mission_type.as_str().to_string()
    }
}

/// An After Action Report
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    // Identification
    pub id: String,
    pub classification: Classification,
    pub operation_name: String,
    /// Date-Time Group, e.g. "071430ZNOV25"
    pub dtg: String,
    pub unit_designation: String,

    // Operational details
    pub mission_type: String,
    pub location: String,
    pub duration_start: String,
    pub duration_end: String,
    pub personnel_count: u32,

    // Narrative
    pub executive_summary: String,
    pub key_events: String,
    pub what_went_well: String,
    pub needs_improvement: String,
    pub lessons_learned: String,
    pub recommendations: String,
    pub commanders_assessment: String,

    // Administrative
    pub prepared_by: String,
    pub reviewed_by: String,
    pub status: ReportStatus,

    #[serde(default)]
    pub attachments: Vec<Attachment>,

    // Store-assigned
    pub submitted_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record {
    /// Find an attachment by its original filename
    pub fn attachment(&self, filename: &str) -> Option<&Attachment> {
        self.attachments.iter().find(|a| a.filename == filename)
    }
}

/// Metadata for a file held in object storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
    pub aar_id: String,
    pub filename: String,
    /// Full object key, `aars/<aar-id>/attachments/<filename>`
    pub storage_key: String,
    pub file_size: u64,
    pub content_type: String,
    pub uploaded_at: DateTime<Utc>,
}
