//! Schema Sniffer — decides which known producer shape a raw payload matches.

use serde_json::{Map, Value};
use tracing::warn;

/// Field names shared by the producer schemas.
pub mod fields {
    pub const OVERALL_RATING: &str = "overall_rating";

    // "rating + lists" producer
    pub const STRENGTHS: &str = "strengths";
    pub const WEAKNESSES: &str = "weaknesses";
    pub const ATS_OPTIMIZATION: &str = "ats_optimization";
    pub const JOB_MATCH_ANALYSIS: &str = "job_match_analysis";
    pub const COMMUNICATION_SCORE: &str = "communication_score";
    pub const SKILL_MATCH_SCORE: &str = "skill_match_score";

    // "discrete sub-scores" producer
    pub const ATS_COMPATIBILITY: &str = "ats_compatibility";
    pub const FORMAT_AND_DESIGN: &str = "format_and_design";
    pub const CONTENT_QUALITY: &str = "content_quality";
    pub const RELEVANCE_TO_JOB: &str = "relevance_to_job";
    pub const KEYWORD_MATCH_PERCENTAGE: &str = "keyword_match_percentage";
    pub const MISSING_KEYWORDS: &str = "missing_keywords";
    pub const IMPROVEMENT_SUGGESTIONS: &str = "improvement_suggestions";
    pub const DETAILED_FEEDBACK: &str = "detailed_feedback";
    pub const FINAL_RECOMMENDATION: &str = "final_recommendation";

    // canonical
    pub const OVERALL_SCORE: &str = "overallScore";
    pub const ATS: &str = "ATS";
}

/// The shapes a raw payload can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawSchema {
    Unrecognized,
    AlreadyCanonical,
    /// Aggregate rating plus strengths / weaknesses / ATS-note lists.
    ProducerSchemaA,
    /// Discrete numeric sub-scores plus keyword and suggestion lists.
    ProducerSchemaB,
}

const SCHEMA_A_LISTS: &[&str] = &[fields::STRENGTHS, fields::WEAKNESSES, fields::ATS_OPTIMIZATION];

const SCHEMA_B_SCORES: &[&str] = &[
    fields::ATS_COMPATIBILITY,
    fields::FORMAT_AND_DESIGN,
    fields::CONTENT_QUALITY,
    fields::RELEVANCE_TO_JOB,
    fields::KEYWORD_MATCH_PERCENTAGE,
];

const SCHEMA_B_TEXT: &[&str] = &[
    fields::MISSING_KEYWORDS,
    fields::IMPROVEMENT_SUGGESTIONS,
    fields::DETAILED_FEEDBACK,
    fields::FINAL_RECOMMENDATION,
];

pub fn sniff_schema(raw: &Value) -> RawSchema {
    match raw.as_object() {
        Some(map) if !map.is_empty() => sniff_object(map),
        _ => RawSchema::Unrecognized,
    }
}

fn sniff_object(map: &Map<String, Value>) -> RawSchema {
    if is_canonical(map) {
        return RawSchema::AlreadyCanonical;
    }

    let schema_a = matches_schema_a(map);
    let schema_b = matches_schema_b(map);

    match (schema_a, schema_b) {
        (true, true) => {
            warn!(
                keys = ?map.keys().collect::<Vec<_>>(),
                "Feedback payload matches both producer schemas; using sub-score schema"
            );
            RawSchema::ProducerSchemaB
        }
        (false, true) => RawSchema::ProducerSchemaB,
        (true, false) => RawSchema::ProducerSchemaA,
        // An aggregate rating on its own is the oldest producer's minimal output.
        (false, false) if is_number(map, fields::OVERALL_RATING) => RawSchema::ProducerSchemaA,
        (false, false) => RawSchema::Unrecognized,
    }
}

fn is_canonical(map: &Map<String, Value>) -> bool {
    is_number(map, fields::OVERALL_SCORE) && map.get(fields::ATS).is_some_and(Value::is_object)
}

fn matches_schema_a(map: &Map<String, Value>) -> bool {
    SCHEMA_A_LISTS.iter().any(|key| is_collection(map, key))
        || map
            .get(fields::JOB_MATCH_ANALYSIS)
            .is_some_and(Value::is_object)
}

fn matches_schema_b(map: &Map<String, Value>) -> bool {
    SCHEMA_B_SCORES.iter().any(|key| is_number(map, key))
        || SCHEMA_B_TEXT
            .iter()
            .any(|key| map.get(*key).is_some_and(|v| !v.is_null()))
}

fn is_number(map: &Map<String, Value>, key: &str) -> bool {
    map.get(key).is_some_and(Value::is_number)
}

fn is_collection(map: &Map<String, Value>, key: &str) -> bool {
    map.get(key)
        .is_some_and(|v| v.is_array() || v.is_object())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_objects_are_unrecognized() {
        for raw in [json!(null), json!(42), json!("string"), json!([1, 2]), json!(true)] {
            assert_eq!(sniff_schema(&raw), RawSchema::Unrecognized, "{raw}");
        }
    }

    #[test]
    fn test_empty_object_is_unrecognized() {
        assert_eq!(sniff_schema(&json!({})), RawSchema::Unrecognized);
    }

    #[test]
    fn test_unknown_fields_are_unrecognized() {
        let raw = json!({ "summary": "Looks fine", "rating": "B+" });
        assert_eq!(sniff_schema(&raw), RawSchema::Unrecognized);
    }

    #[test]
    fn test_canonical_detected() {
        let raw = json!({ "overallScore": 0, "ATS": { "score": 0, "tips": [] } });
        assert_eq!(sniff_schema(&raw), RawSchema::AlreadyCanonical);
    }

    #[test]
    fn test_canonical_requires_ats_object() {
        let raw = json!({ "overallScore": 80, "ATS": 80 });
        assert_eq!(sniff_schema(&raw), RawSchema::Unrecognized);
    }

    #[test]
    fn test_rating_and_lists_is_schema_a() {
        let raw = json!({
            "overall_rating": 7,
            "strengths": ["Clear summary"],
            "weaknesses": ["Too long"],
            "ats_optimization": ["Add metrics"]
        });
        assert_eq!(sniff_schema(&raw), RawSchema::ProducerSchemaA);
    }

    #[test]
    fn test_rating_only_is_schema_a() {
        assert_eq!(
            sniff_schema(&json!({ "overall_rating": 5 })),
            RawSchema::ProducerSchemaA
        );
    }

    #[test]
    fn test_sub_scores_are_schema_b() {
        let raw = json!({
            "overall_rating": 6,
            "ats_compatibility": 8,
            "keyword_match_percentage": 62,
            "missing_keywords": ["Docker"]
        });
        assert_eq!(sniff_schema(&raw), RawSchema::ProducerSchemaB);
    }

    #[test]
    fn test_collision_resolves_to_schema_b() {
        let raw = json!({
            "strengths": ["Clear summary"],
            "content_quality": 9
        });
        assert_eq!(sniff_schema(&raw), RawSchema::ProducerSchemaB);
    }

    #[test]
    fn test_null_schema_b_text_fields_do_not_match() {
        let raw = json!({ "strengths": ["Clear"], "final_recommendation": null });
        assert_eq!(sniff_schema(&raw), RawSchema::ProducerSchemaA);
    }
}
