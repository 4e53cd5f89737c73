//! Dashboard HTTP Routes
//!
//! Aggregate counts, the most recent reports, and the liveness check.

use axum::{extract::State, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::state::AppState;
use crate::records::{Record, RecordStats, ReportStatus};

/// Listing entry without the narrative sections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSummary {
    pub id: String,
    pub operation_name: String,
    pub unit_designation: String,
    pub mission_type: String,
    pub status: ReportStatus,
    pub submitted_date: DateTime<Utc>,
    pub attachment_count: usize,
}

impl From<&Record> for RecordSummary {
    fn from(record: &Record) -> Self {
        Self {
            id: record.id.clone(),
            operation_name: record.operation_name.clone(),
            unit_designation: record.unit_designation.clone(),
            mission_type: record.mission_type.clone(),
            status: record.status,
            submitted_date: record.submitted_date,
            attachment_count: record.attachments.len(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub stats: RecordStats,
    pub recent: Vec<RecordSummary>,
}

/// Create dashboard routes
pub fn dashboard_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn dashboard_handler(State(state): State<AppState>) -> Json<DashboardResponse> {
    let stats = state.store.get_stats();
    let recent = state.store.get_all().iter().map(RecordSummary::from).collect();

    Json(DashboardResponse { stats, recent })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::sample::sample_records;

    #[test]
    fn test_summary_from_record() {
        let record = sample_records(Utc::now()).remove(1);
        let summary = RecordSummary::from(&record);

        assert_eq!(summary.id, "AAR-20250920-0002");
        assert_eq!(summary.attachment_count, 5);
        assert_eq!(summary.status, ReportStatus::Approved);
    }
}
