//! Resume review loading — reads a resume record and its blobs from the
//! external stores and pairs them with normalized feedback.
//!
//! The loader owns nothing beyond the value it returns. Dropping the future
//! (client went away) discards every in-flight read and writes nothing.

pub mod handlers;
pub mod record;

use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use crate::feedback::Feedback;
use crate::storage::{BlobStore, KeyValueStore, StoreError};

pub use record::ResumeRecord;

/// The two blobs a resume record references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobKind {
    Document,
    Preview,
}

impl BlobKind {
    pub fn path(self, record: &ResumeRecord) -> Option<&str> {
        match self {
            BlobKind::Document => record.resume_path.as_deref(),
            BlobKind::Preview => record.image_path.as_deref(),
        }
    }

    pub fn content_type(self, path: &str) -> &'static str {
        match self {
            BlobKind::Document => "application/pdf",
            BlobKind::Preview => image_content_type(path),
        }
    }
}

fn image_content_type(path: &str) -> &'static str {
    let extension = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        _ => "image/png",
    }
}

/// Everything the review views need for one resume. `feedback` is always
/// renderable: a missing or unreadable record yields the zero-value.
#[derive(Debug, Clone)]
pub struct ResumeReview {
    pub id: Uuid,
    pub found: bool,
    pub company_name: Option<String>,
    pub job_title: Option<String>,
    pub feedback: Feedback,
    pub document: Option<Bytes>,
    pub preview: Option<Bytes>,
}

impl ResumeReview {
    fn missing(id: Uuid) -> Self {
        Self {
            id,
            found: false,
            company_name: None,
            job_title: None,
            feedback: Feedback::empty(),
            document: None,
            preview: None,
        }
    }
}

pub fn record_key(prefix: &str, id: Uuid) -> String {
    format!("{prefix}{id}")
}

/// Reads and decodes a resume record. `Ok(None)` when the key is absent or
/// the stored text is not a JSON object.
pub async fn fetch_record(
    kv: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<ResumeRecord>, StoreError> {
    let stored = kv.get(key).await?;
    Ok(stored.as_deref().and_then(ResumeRecord::from_stored))
}

/// Reads one of the record's blobs. `Ok(None)` when the record does not
/// reference it or the store has nothing at that path.
pub async fn fetch_blob(
    blobs: &dyn BlobStore,
    record: &ResumeRecord,
    kind: BlobKind,
) -> Result<Option<Bytes>, StoreError> {
    match kind.path(record) {
        Some(path) => blobs.read(path).await,
        None => Ok(None),
    }
}

/// Loads a full review. Never fails: store errors are logged and treated as
/// absent values. Both blob reads run concurrently once the record is known.
pub async fn load_review(
    kv: &dyn KeyValueStore,
    blobs: &dyn BlobStore,
    key_prefix: &str,
    id: Uuid,
) -> ResumeReview {
    let key = record_key(key_prefix, id);
    let record = match fetch_record(kv, &key).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            info!("No readable resume record at {key}");
            return ResumeReview::missing(id);
        }
        Err(e) => {
            warn!("Reading {key} failed, serving empty review: {e}");
            return ResumeReview::missing(id);
        }
    };

    let (document, preview) = tokio::join!(
        fetch_blob_or_absent(blobs, &record, BlobKind::Document),
        fetch_blob_or_absent(blobs, &record, BlobKind::Preview),
    );

    ResumeReview {
        id,
        found: true,
        company_name: record.company_name,
        job_title: record.job_title,
        feedback: record.feedback,
        document,
        preview,
    }
}

async fn fetch_blob_or_absent(
    blobs: &dyn BlobStore,
    record: &ResumeRecord,
    kind: BlobKind,
) -> Option<Bytes> {
    fetch_blob(blobs, record, kind).await.unwrap_or_else(|e| {
        warn!("Reading {kind:?} blob failed: {e}");
        None
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::models::Tip;
    use crate::storage::memory::{MemoryBlobStore, MemoryKvStore, UnavailableStore};
    use serde_json::json;

    const PREFIX: &str = "resume:";

    fn stored_record(feedback: serde_json::Value) -> String {
        json!({
            "companyName": "Acme",
            "jobTitle": "Platform Engineer",
            "resumePath": "/resumes/r.pdf",
            "imagePath": "/resumes/r.jpg",
            "feedback": feedback
        })
        .to_string()
    }

    fn blobs() -> MemoryBlobStore {
        MemoryBlobStore::default()
            .with("/resumes/r.pdf", b"%PDF-1.7")
            .with("/resumes/r.jpg", b"\xff\xd8\xff")
    }

    #[tokio::test]
    async fn test_loads_record_blobs_and_feedback() {
        let id = Uuid::new_v4();
        let kv = MemoryKvStore::default().with(
            record_key(PREFIX, id),
            stored_record(json!({ "overall_rating": 7, "ats_optimization": ["Add metrics"] })),
        );

        let review = load_review(&kv, &blobs(), PREFIX, id).await;

        assert!(review.found);
        assert_eq!(review.job_title.as_deref(), Some("Platform Engineer"));
        assert_eq!(review.feedback.overall_score, 70);
        assert_eq!(review.feedback.ats.tips, vec![Tip::improve("Add metrics")]);
        assert_eq!(review.document.as_deref(), Some(&b"%PDF-1.7"[..]));
        assert!(review.preview.is_some());
    }

    #[tokio::test]
    async fn test_missing_record_gives_empty_feedback() {
        let review = load_review(
            &MemoryKvStore::default(),
            &blobs(),
            PREFIX,
            Uuid::new_v4(),
        )
        .await;

        assert!(!review.found);
        assert_eq!(review.feedback, Feedback::empty());
        assert!(review.document.is_none());
    }

    #[tokio::test]
    async fn test_unparseable_record_treated_as_absent() {
        let id = Uuid::new_v4();
        let kv = MemoryKvStore::default().with(record_key(PREFIX, id), "{truncated");
        let review = load_review(&kv, &blobs(), PREFIX, id).await;
        assert!(!review.found);
        assert!(review.feedback.is_empty());
    }

    #[tokio::test]
    async fn test_kv_failure_gives_empty_feedback() {
        let review = load_review(&UnavailableStore, &blobs(), PREFIX, Uuid::new_v4()).await;
        assert!(!review.found);
        assert_eq!(review.feedback, Feedback::empty());
    }

    #[tokio::test]
    async fn test_blob_failure_keeps_feedback() {
        let id = Uuid::new_v4();
        let kv = MemoryKvStore::default().with(
            record_key(PREFIX, id),
            stored_record(json!({ "overall_rating": 5 })),
        );

        let review = load_review(&kv, &UnavailableStore, PREFIX, id).await;

        assert!(review.found);
        assert_eq!(review.feedback.overall_score, 50);
        assert!(review.document.is_none());
        assert!(review.preview.is_none());
    }

    #[tokio::test]
    async fn test_partial_blobs() {
        let id = Uuid::new_v4();
        let kv = MemoryKvStore::default().with(
            record_key(PREFIX, id),
            stored_record(json!("{\"overall_rating\": 9}")),
        );
        let only_pdf = MemoryBlobStore::default().with("/resumes/r.pdf", b"%PDF");

        let review = load_review(&kv, &only_pdf, PREFIX, id).await;

        assert_eq!(review.feedback.overall_score, 90);
        assert!(review.document.is_some());
        assert!(review.preview.is_none());
    }

    #[test]
    fn test_record_key_format() {
        let id = Uuid::nil();
        assert_eq!(
            record_key("resume:", id),
            "resume:00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_preview_content_type_by_extension() {
        assert_eq!(BlobKind::Preview.content_type("a/b.PNG"), "image/png");
        assert_eq!(BlobKind::Preview.content_type("a/b.jpeg"), "image/jpeg");
        assert_eq!(BlobKind::Preview.content_type("a/b.webp"), "image/webp");
        assert_eq!(BlobKind::Preview.content_type("a/noext"), "image/png");
        assert_eq!(BlobKind::Document.content_type("a/b.bin"), "application/pdf");
    }
}
