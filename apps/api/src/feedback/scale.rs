//! Scalar Score Mapper — converts raw producer numbers onto the canonical
//! 0–100 integer scale.
//!
//! Schema-agnostic: callers pick the raw field and declare its scale.

use serde_json::Value;

use crate::feedback::models::MAX_SCORE;

/// Declared scale of a raw numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    /// Ratings such as `7` or `8.5` out of 10.
    OutOfTen,
    /// Scores and percentages already expressed 0–100.
    OutOfHundred,
}

impl Scale {
    fn factor(self) -> f64 {
        match self {
            Scale::OutOfTen => 10.0,
            Scale::OutOfHundred => 1.0,
        }
    }
}

/// Maps a raw value onto `[0, 100]`. Absent, non-numeric and non-finite
/// values map to `0`.
pub fn map_scale(raw: Option<&Value>, scale: Scale) -> u8 {
    raw.and_then(as_number)
        .map(|n| clamp_score(n * scale.factor()))
        .unwrap_or(0)
}

/// Like [`map_scale`], but an absent dedicated field falls back to the
/// aggregate rating (0–10). Both absent → `0`.
pub fn score_or_aggregate(field: Option<&Value>, scale: Scale, aggregate: Option<&Value>) -> u8 {
    if field.and_then(as_number).is_some() {
        map_scale(field, scale)
    } else {
        map_scale(aggregate, Scale::OutOfTen)
    }
}

/// Rounds half away from zero and clamps into `[0, 100]`.
pub fn clamp_score(value: f64) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    value.round().clamp(0.0, MAX_SCORE as f64) as u8
}

fn as_number(value: &Value) -> Option<f64> {
    value.as_f64().filter(|n| n.is_finite())
}
