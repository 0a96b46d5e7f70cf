use serde_json::{Map, Value};

use crate::feedback::models::{Category, Feedback, Tip, TipType};
use crate::feedback::scale::{map_scale, Scale};
use crate::feedback::schema::fields;

/// Reads a payload that is already in canonical form.
///
/// Scores are re-clamped, tip order is kept, and categories or tips that do
/// not have the expected shape degrade to empty rather than failing.
pub fn read_canonical(map: &Map<String, Value>) -> Feedback {
    Feedback {
        overall_score: map_scale(map.get(fields::OVERALL_SCORE), Scale::OutOfHundred),
        ats: read_category(map.get(fields::ATS)),
        tone_and_style: read_category(map.get("toneAndStyle")),
        content: read_category(map.get("content")),
        structure: read_category(map.get("structure")),
        skills: read_category(map.get("skills")),
    }
}

fn read_category(raw: Option<&Value>) -> Category {
    let Some(fields) = raw.and_then(Value::as_object) else {
        return Category::default();
    };

    let tips: Vec<Tip> = fields
        .get("tips")
        .and_then(Value::as_array)
        .map(|tips| tips.iter().filter_map(read_tip).collect())
        .unwrap_or_default();

    Category::new(map_scale(fields.get("score"), Scale::OutOfHundred), tips)
}

fn read_tip(raw: &Value) -> Option<Tip> {
    let fields = raw.as_object()?;
    let tip = fields
        .get("tip")
        .and_then(Value::as_str)
        .filter(|t| !t.trim().is_empty())?;

    let tip_type = match fields.get("type").and_then(Value::as_str) {
        Some("good") => TipType::Good,
        _ => TipType::Improve,
    };

    let explanation = fields
        .get("explanation")
        .and_then(Value::as_str)
        .filter(|e| !e.trim().is_empty())
        .map(str::to_string);

    Some(Tip::new(tip_type, tip).with_explanation(explanation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn read(raw: Value) -> Feedback {
        read_canonical(raw.as_object().unwrap())
    }

    #[test]
    fn test_scores_are_clamped() {
        let feedback = read(json!({
            "overallScore": 140,
            "ATS": { "score": -20, "tips": [] },
            "content": { "score": 72.6, "tips": [] }
        }));
        assert_eq!(feedback.overall_score, 100);
        assert_eq!(feedback.ats.score, 0);
        assert_eq!(feedback.content.score, 73);
    }

    #[test]
    fn test_missing_categories_default_to_empty() {
        let feedback = read(json!({ "overallScore": 50, "ATS": { "score": 40 } }));
        assert_eq!(feedback.ats, Category::new(40, vec![]));
        assert_eq!(feedback.skills, Category::default());
        assert_eq!(feedback.tone_and_style, Category::default());
    }

    #[test]
    fn test_tips_keep_order_and_explanations() {
        let feedback = read(json!({
            "overallScore": 80,
            "ATS": {
                "score": 75,
                "tips": [
                    { "type": "improve", "tip": "Add keywords", "explanation": "Match the posting" },
                    { "type": "good", "tip": "Clean layout" },
                    { "type": "meh", "tip": "Unknown tag" },
                    { "type": "good", "tip": "" },
                    "not a tip"
                ]
            }
        }));

        let tips = &feedback.ats.tips;
        assert_eq!(tips.len(), 3);
        assert_eq!(tips[0].explanation.as_deref(), Some("Match the posting"));
        assert_eq!(tips[1], Tip::good("Clean layout"));
        assert_eq!(tips[2], Tip::improve("Unknown tag"));
    }

    #[test]
    fn test_blank_explanation_is_dropped() {
        let feedback = read(json!({
            "overallScore": 60,
            "ATS": { "score": 60, "tips": [] },
            "skills": {
                "score": 55,
                "tips": [{ "type": "improve", "tip": "List Kubernetes", "explanation": "  " }]
            }
        }));
        assert_eq!(feedback.skills.tips, vec![Tip::improve("List Kubernetes")]);
    }
}
