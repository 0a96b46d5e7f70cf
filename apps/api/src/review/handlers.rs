//! Axum route handlers for the Review API.

use axum::{
    body::Body,
    extract::{FromRequestParts, Path, State},
    http::header,
    response::Response,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::feedback::Feedback;
use crate::review::{fetch_blob, fetch_record, load_review, record_key, BlobKind};
use crate::state::AppState;

/// The `:id` path segment. A malformed UUID is rejected with the JSON
/// `VALIDATION_ERROR` body instead of axum's plain-text rejection.
#[derive(Debug, Deserialize, FromRequestParts)]
#[from_request(via(Path), rejection(AppError))]
pub struct ResumeId(pub Uuid);

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobStatus {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl BlobStatus {
    fn new(size: Option<usize>, url: String) -> Self {
        Self {
            available: size.is_some(),
            size_bytes: size,
            url: size.map(|_| url),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: Uuid,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    pub feedback: Feedback,
    pub document: BlobStatus,
    pub preview: BlobStatus,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/resumes/:id/review
///
/// Always 200: a missing or unreadable record still yields renderable
/// (zero-value) feedback with `found: false`.
pub async fn handle_get_review(
    State(state): State<AppState>,
    ResumeId(id): ResumeId,
) -> Json<ReviewResponse> {
    let review = load_review(
        state.kv.as_ref(),
        state.blobs.as_ref(),
        &state.config.resume_key_prefix,
        id,
    )
    .await;

    Json(ReviewResponse {
        id: review.id,
        found: review.found,
        company_name: review.company_name,
        job_title: review.job_title,
        feedback: review.feedback,
        document: BlobStatus::new(
            review.document.as_ref().map(|b| b.len()),
            format!("/api/v1/resumes/{id}/document"),
        ),
        preview: BlobStatus::new(
            review.preview.as_ref().map(|b| b.len()),
            format!("/api/v1/resumes/{id}/preview"),
        ),
    })
}

/// GET /api/v1/resumes/:id/document
pub async fn handle_get_document(
    State(state): State<AppState>,
    ResumeId(id): ResumeId,
) -> Result<Response, AppError> {
    serve_blob(&state, id, BlobKind::Document).await
}

/// GET /api/v1/resumes/:id/preview
pub async fn handle_get_preview(
    State(state): State<AppState>,
    ResumeId(id): ResumeId,
) -> Result<Response, AppError> {
    serve_blob(&state, id, BlobKind::Preview).await
}

async fn serve_blob(state: &AppState, id: Uuid, kind: BlobKind) -> Result<Response, AppError> {
    let key = record_key(&state.config.resume_key_prefix, id);
    let record = fetch_record(state.kv.as_ref(), &key)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;

    let path = kind
        .path(&record)
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} has no {kind:?} blob")))?;
    let content_type = kind.content_type(path);

    let bytes = fetch_blob(state.blobs.as_ref(), &record, kind)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{kind:?} blob for resume {id} not found")))?;

    Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, bytes.len())
        .body(Body::from(bytes))
        .map_err(|e| AppError::Internal(e.into()))
}
