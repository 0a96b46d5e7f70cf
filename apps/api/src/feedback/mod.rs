//! Feedback Normalization & Scoring Engine.
//!
//! Turns a loosely-structured critique payload from any producer version into
//! canonical [`Feedback`]. Pure and total: malformed, partial or unknown input
//! never fails, it degrades to per-field fallbacks or to [`Feedback::empty`].
//!
//! raw JSON → [`schema::sniff_schema`] → {[`scale`], [`tips`]} →
//! [`assembler::assemble`] → [`Feedback`]

pub mod assembler;
pub mod canonical;
pub mod models;
pub mod scale;
pub mod schema;
pub mod tips;

use serde_json::Value;
use tracing::debug;

pub use models::Feedback;

/// Normalizes a raw payload. Absent, `null`, non-object and unrecognized
/// payloads short-circuit to [`Feedback::empty`].
pub fn normalize_feedback(raw: Option<&Value>) -> Feedback {
    let Some(raw) = raw.filter(|v| v.is_object()) else {
        return Feedback::empty();
    };

    let schema = schema::sniff_schema(raw);
    debug!(?schema, "Sniffed feedback payload");
    assembler::assemble(schema, raw)
}

/// Normalizes a payload stored as JSON text. Producers sometimes wrap the
/// JSON in Markdown code fences; those are stripped first. Unparseable text
/// is treated as absent input.
pub fn normalize_payload_text(text: &str) -> Feedback {
    match serde_json::from_str::<Value>(strip_json_fences(text)) {
        Ok(raw) => normalize_feedback(Some(&raw)),
        Err(e) => {
            debug!("Feedback payload is not valid JSON: {e}");
            Feedback::empty()
        }
    }
}

/// Normalizes the `feedback` field of a stored record, which is either the
/// payload object itself or that payload encoded as a string.
pub fn normalize_stored(raw: Option<&Value>) -> Feedback {
    match raw {
        Some(Value::String(text)) => normalize_payload_text(text),
        other => normalize_feedback(other),
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));

    match inner {
        Some(stripped) => {
            let stripped = stripped.trim_start();
            stripped
                .strip_suffix("```")
                .map(str::trim)
                .unwrap_or(stripped)
        }
        None => text,
    }
}
