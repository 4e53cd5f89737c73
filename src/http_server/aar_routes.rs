//! AAR HTTP Routes
//!
//! Create, browse, view, status changes, attachment download and PDF reports.

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{Multipart, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::{get, post},
    Form, Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use super::errors::ApiError;
use super::state::AppState;
use crate::file_storage::{attachment_key, sanitize_filename};
use crate::records::{
    Attachment, Classification, Record, RecordError, ReportStatus, SearchFilter,
};

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Serialize, Deserialize)]
pub struct RecordListResponse {
    pub records: Vec<Record>,
    pub total: usize,
    pub filter: SearchFilter,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateResponse {
    pub id: String,
    pub attachments: usize,
}

#[derive(Debug, Deserialize)]
pub struct ViewQuery {
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub file: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub id: String,
    pub status: ReportStatus,
}

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub aar_id: String,
}

/// A file part from the create form, not yet stored
struct PendingUpload {
    filename: String,
    content_type: String,
    data: Bytes,
}

// ==================
// AAR Routes
// ==================

/// Create AAR routes
pub fn aar_routes(state: AppState) -> Router {
    Router::new()
        .route("/list", get(list_handler))
        .route("/create", post(create_handler))
        .route("/view", get(view_handler))
        .route("/status", post(update_status_handler))
        .route("/download", get(download_handler))
        .route("/generate-report", post(generate_report_handler))
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

fn field(fields: &mut HashMap<String, String>, name: &str) -> String {
    fields.remove(name).map(|v| v.trim().to_string()).unwrap_or_default()
}

/// Build a record from the text fields of the create form
fn record_from_form(id: String, mut fields: HashMap<String, String>) -> Result<Record, ApiError> {
    let personnel_count: u32 = match field(&mut fields, "personnel_count").as_str() {
        "" => 0,
        raw => raw
            .parse()
            .map_err(|_| ApiError::bad_request(format!("Invalid personnel_count: {}", raw)))?,
    };

    let classification: Classification = match field(&mut fields, "classification").as_str() {
        "" => Default::default(),
        raw => raw.parse()?,
    };

    let status: ReportStatus = match field(&mut fields, "status").as_str() {
        "" => ReportStatus::default(),
        raw => raw.parse()?,
    };

    Ok(Record {
        id,
        classification,
        operation_name: field(&mut fields, "operation_name"),
        dtg: field(&mut fields, "dtg"),
        unit_designation: field(&mut fields, "unit_designation"),
        mission_type: field(&mut fields, "mission_type"),
        location: field(&mut fields, "location"),
        duration_start: field(&mut fields, "duration_start"),
        duration_end: field(&mut fields, "duration_end"),
        personnel_count,
        executive_summary: field(&mut fields, "executive_summary"),
        key_events: field(&mut fields, "key_events"),
        what_went_well: field(&mut fields, "what_went_well"),
        needs_improvement: field(&mut fields, "needs_improvement"),
        lessons_learned: field(&mut fields, "lessons_learned"),
        recommendations: field(&mut fields, "recommendations"),
        commanders_assessment: field(&mut fields, "commanders_assessment"),
        prepared_by: field(&mut fields, "prepared_by"),
        reviewed_by: field(&mut fields, "reviewed_by"),
        status,
        ..Default::default()
    })
}

/// Remove objects stored earlier in a request that is being abandoned
async fn discard_uploads(state: &AppState, keys: &[String]) {
    for key in keys {
        if let Err(e) = state.storage.delete(key).await {
            warn!(key = %key, error = %e, "could not remove orphaned attachment");
        }
    }
}

async fn store_attachments(
    state: &AppState,
    aar_id: &str,
    uploads: Vec<PendingUpload>,
    uploaded_keys: &mut Vec<String>,
) -> Result<Vec<Attachment>, ApiError> {
    let mut attachments = Vec::with_capacity(uploads.len());

    for upload in uploads {
        let storage_key = attachment_key(aar_id, &upload.filename);
        if uploaded_keys.contains(&storage_key) {
            return Err(ApiError::bad_request(format!(
                "Duplicate attachment filename: {}",
                upload.filename
            )));
        }
        // Keys of another record are never written, so rollback cannot reach them
        if state.storage.exists(&storage_key).await? {
            return Err(RecordError::AlreadyExists(aar_id.to_string()).into());
        }

        let file_size = upload.data.len() as u64;
        state.storage.upload(&storage_key, upload.data.to_vec()).await?;
        uploaded_keys.push(storage_key.clone());

        attachments.push(Attachment {
            id: format!("att-{}", Uuid::new_v4()),
            aar_id: aar_id.to_string(),
            filename: upload.filename,
            storage_key,
            file_size,
            content_type: upload.content_type,
            uploaded_at: Utc::now(),
        });
    }

    Ok(attachments)
}

fn content_disposition(filename: &str) -> HeaderValue {
    let safe: String = filename
        .chars()
        .map(|c| if c == '"' || c.is_control() || !c.is_ascii() { '_' } else { c })
        .collect();
    HeaderValue::from_str(&format!("attachment; filename=\"{}\"", safe))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}

fn content_type(value: &str) -> HeaderValue {
    HeaderValue::from_str(value)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"))
}

// ==================
// Handlers
// ==================

async fn list_handler(
    State(state): State<AppState>,
    Query(filter): Query<SearchFilter>,
) -> Json<RecordListResponse> {
    let records = if filter.is_empty() {
        state.store.get_all()
    } else {
        state.store.search_with(&filter)
    };

    Json(RecordListResponse {
        total: records.len(),
        records,
        filter,
    })
}

/// Uploads every attachment first, then inserts the record. Any failure
/// removes what this request already uploaded and inserts nothing.
///
/// An id that is already taken is refused before anything is written.
async fn create_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<CreateResponse>), ApiError> {
    let mut fields = HashMap::new();
    let mut uploads = Vec::new();

    while let Some(part) = multipart.next_field().await? {
        let name = part.name().unwrap_or_default().to_string();

        if name == "attachments" {
            let Some(file_name) = part.file_name().map(sanitize_filename) else {
                continue;
            };
            let content_type = part
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = part.bytes().await?;
            if data.is_empty() && file_name == "unnamed" {
                // Browsers send an empty part when no file was chosen
                continue;
            }
            uploads.push(PendingUpload {
                filename: file_name,
                content_type,
                data,
            });
        } else {
            let value = part.text().await?;
            fields.insert(name, value);
        }
    }

    let id = state.ids.next_id();
    let mut record = record_from_form(id.clone(), fields)?;
    if state.store.contains(&id) {
        warn!(id = %id, "generated AAR id already in use");
        return Err(RecordError::AlreadyExists(id).into());
    }

    let mut uploaded_keys = Vec::new();
    match store_attachments(&state, &id, uploads, &mut uploaded_keys).await {
        Ok(attachments) => record.attachments = attachments,
        Err(e) => {
            discard_uploads(&state, &uploaded_keys).await;
            return Err(e);
        }
    }

    let attachment_count = record.attachments.len();
    if let Err(e) = state.store.create(record) {
        discard_uploads(&state, &uploaded_keys).await;
        return Err(e.into());
    }

    info!(id = %id, attachments = attachment_count, "AAR created");
    Ok((
        StatusCode::CREATED,
        Json(CreateResponse {
            id,
            attachments: attachment_count,
        }),
    ))
}

async fn view_handler(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<Record>, ApiError> {
    if query.id.is_empty() {
        return Err(ApiError::bad_request("AAR ID is required"));
    }
    Ok(Json(state.store.get_by_id(&query.id)?))
}

async fn update_status_handler(
    State(state): State<AppState>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Record>, ApiError> {
    let mut record = state.store.get_by_id(&request.id)?;
    let previous = record.status;
    record.status = request.status;

    let updated = state.store.update(record)?;
    info!(id = %updated.id, from = %previous, to = %updated.status, "AAR status changed");
    Ok(Json(updated))
}

async fn download_handler(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
) -> Result<(StatusCode, HeaderMap, Bytes), ApiError> {
    if query.id.is_empty() || query.file.is_empty() {
        return Err(ApiError::bad_request("AAR ID and filename are required"));
    }

    let record = state.store.get_by_id(&query.id)?;
    let attachment = record
        .attachment(&query.file)
        .ok_or_else(|| ApiError::AttachmentNotFound(query.file.clone()))?;

    let data = state.storage.download(&attachment.storage_key).await?;

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, content_type(&attachment.content_type));
    headers.insert(
        header::CONTENT_DISPOSITION,
        content_disposition(&attachment.filename),
    );

    Ok((StatusCode::OK, headers, Bytes::from(data)))
}

async fn generate_report_handler(
    State(state): State<AppState>,
    Form(request): Form<ReportRequest>,
) -> Result<(StatusCode, HeaderMap, Bytes), ApiError> {
    if request.aar_id.is_empty() {
        return Err(ApiError::bad_request("AAR ID is required"));
    }

    let record = state.store.get_by_id(&request.aar_id)?;
    let pdf = state.renderer.render(&record).await?;

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/pdf"));
    headers.insert(
        header::CONTENT_DISPOSITION,
        content_disposition(&format!("AAR_{}_Report.pdf", record.id)),
    );

    Ok((StatusCode::OK, headers, Bytes::from(pdf)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_record_from_form() {
        let record = record_from_form(
            "AAR-1".into(),
            form(&[
                ("operation_name", " Operation Test "),
                ("personnel_count", "120"),
                ("classification", "CUI"),
                ("status", "Under Review"),
                ("mission_type", "Other"),
            ]),
        )
        .unwrap();

        assert_eq!(record.id, "AAR-1");
        assert_eq!(record.operation_name, "Operation Test");
        assert_eq!(record.personnel_count, 120);
        assert_eq!(record.status, ReportStatus::UnderReview);
        assert_eq!(record.mission_type, "Other");
        assert!(record.attachments.is_empty());
    }

    #[test]
    fn test_record_from_form_defaults() {
        let record = record_from_form("AAR-1".into(), HashMap::new()).unwrap();
        assert_eq!(record.personnel_count, 0);
        assert_eq!(record.status, ReportStatus::Draft);
        assert_eq!(record.classification.as_str(), "UNCLASSIFIED");
    }

    #[test]
    fn test_record_from_form_rejects_bad_values() {
        assert!(record_from_form("A".into(), form(&[("personnel_count", "lots")])).is_err());
        assert!(record_from_form("A".into(), form(&[("status", "Done")])).is_err());
        assert!(record_from_form("A".into(), form(&[("classification", "TS")])).is_err());
    }

    #[test]
    fn test_content_disposition_quotes_filename() {
        assert_eq!(
            content_disposition("map \"v2\".png"),
            "attachment; filename=\"map _v2_.png\""
        );
    }
}
