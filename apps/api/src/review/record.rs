use serde_json::{Map, Value};
use tracing::debug;

use crate::feedback::{normalize_stored, Feedback};

/// A resume record as stored under `resume:<id>`.
///
/// The stored JSON is untrusted; every field is optional and type-checked.
/// `feedback` is normalized on read, so a record never carries raw payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeRecord {
    pub company_name: Option<String>,
    pub job_title: Option<String>,
    pub resume_path: Option<String>,
    pub image_path: Option<String>,
    pub feedback: Feedback,
}

impl ResumeRecord {
    /// Decodes stored record text. Returns `None` when the text is not a JSON
    /// object.
    pub fn from_stored(text: &str) -> Option<Self> {
        let value: Value = match serde_json::from_str(text) {
            Ok(value) => value,
            Err(e) => {
                debug!("Resume record is not valid JSON: {e}");
                return None;
            }
        };

        let fields = value.as_object()?;
        Some(Self {
            company_name: string_field(fields, "companyName"),
            job_title: string_field(fields, "jobTitle"),
            resume_path: string_field(fields, "resumePath"),
            image_path: string_field(fields, "imagePath"),
            feedback: normalize_stored(fields.get("feedback")),
        })
    }
}

fn string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
