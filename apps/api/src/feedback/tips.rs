//! Tip Extractor & Classifier.
//!
//! Walks a raw list or keyed record and emits tips in source order. The
//! [`TipKind`] decides the tag, the text template and any cap.

use serde_json::{Map, Value};

use crate::feedback::models::{Tip, TipType};

/// Cap for free-text suggestion lists.
pub const SUGGESTION_LIMIT: usize = 3;

const TEXT_KEYS: &[&str] = &["tip", "text", "suggestion", "title", "point", "keyword", "name"];
const EXPLANATION_KEYS: &[&str] = &["explanation", "detail", "details", "reason", "description"];

/// What a raw collection holds, and therefore how its items become tips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipKind {
    Strength,
    Weakness,
    AtsNote,
    /// Missing keyword rendered for the ATS category.
    MissingKeywordAts,
    /// Missing keyword rendered for the skills category.
    MissingKeywordSkills,
    Suggestion,
    DetailedFeedback,
}

impl TipKind {
    fn tip_type(self) -> TipType {
        match self {
            TipKind::Strength => TipType::Good,
            _ => TipType::Improve,
        }
    }

    fn limit(self) -> Option<usize> {
        match self {
            TipKind::Suggestion | TipKind::DetailedFeedback => Some(SUGGESTION_LIMIT),
            _ => None,
        }
    }

    fn render(self, text: &str) -> String {
        match self {
            TipKind::MissingKeywordAts => format!("Add keyword: {text}"),
            TipKind::MissingKeywordSkills => format!("Learn or add experience with {text}"),
            _ => text.to_string(),
        }
    }
}

/// Extracts tips from a list of strings, a list of objects or a keyed
/// record. Anything else (including absence) yields no tips.
pub fn extract_tips(source: Option<&Value>, kind: TipKind) -> Vec<Tip> {
    let items: Vec<&Value> = match source {
        Some(Value::Array(list)) => list.iter().collect(),
        Some(Value::Object(record)) => record.values().collect(),
        _ => return vec![],
    };

    let tips = items.into_iter().filter_map(|item| {
        let (text, explanation) = read_item(item)?;
        Some(Tip::new(kind.tip_type(), kind.render(text)).with_explanation(explanation))
    });

    match kind.limit() {
        Some(limit) => tips.take(limit).collect(),
        None => tips.collect(),
    }
}

fn read_item(item: &Value) -> Option<(&str, Option<String>)> {
    match item {
        Value::String(text) => non_blank(text).map(|t| (t, None)),
        Value::Object(fields) => {
            let text = first_text(fields, TEXT_KEYS)?;
            let explanation = first_text(fields, EXPLANATION_KEYS)
                .filter(|e| *e != text)
                .map(str::to_string);
            Some((text, explanation))
        }
        _ => None,
    }
}

fn first_text<'a>(fields: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|key| fields.get(*key).and_then(Value::as_str))
        .find_map(non_blank)
}

fn non_blank(text: &str) -> Option<&str> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
