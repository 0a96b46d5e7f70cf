#![allow(dead_code)]

use serde::{Deserialize, Serialize};

/// Closed tag of a tip: affirming (`good`) or corrective (`improve`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipType {
    Good,
    Improve,
}

/// A single remark attached to a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tip {
    #[serde(rename = "type")]
    pub tip_type: TipType,
    pub tip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Tip {
    pub fn new(tip_type: TipType, tip: impl Into<String>) -> Self {
        Self {
            tip_type,
            tip: tip.into(),
            explanation: None,
        }
    }

    pub fn good(tip: impl Into<String>) -> Self {
        Self::new(TipType::Good, tip)
    }

    pub fn improve(tip: impl Into<String>) -> Self {
        Self::new(TipType::Improve, tip)
    }

    pub fn with_explanation(mut self, explanation: Option<String>) -> Self {
        self.explanation = explanation;
        self
    }
}

/// One critique dimension. `tips` keeps extraction order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub score: u8,
    pub tips: Vec<Tip>,
}

impl Category {
    pub fn new(score: u8, tips: Vec<Tip>) -> Self {
        Self {
            score: score.min(MAX_SCORE),
            tips,
        }
    }
}

pub const MAX_SCORE: u8 = 100;

/// Canonical feedback: an overall score plus exactly five categories.
///
/// This is the only shape rendering code may depend on. Field names on the
/// wire are the camelCase keys the review views read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    #[serde(rename = "overallScore")]
    pub overall_score: u8,
    #[serde(rename = "ATS")]
    pub ats: Category,
    #[serde(rename = "toneAndStyle")]
    pub tone_and_style: Category,
    pub content: Category,
    pub structure: Category,
    pub skills: Category,
}

impl Feedback {
    /// The zero-value returned for degenerate input: every score `0`, every
    /// tip list empty.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn categories(&self) -> [(&'static str, &Category); 5] {
        [
            ("ATS", &self.ats),
            ("toneAndStyle", &self.tone_and_style),
            ("content", &self.content),
            ("structure", &self.structure),
            ("skills", &self.skills),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.overall_score == 0
            && self
                .categories()
                .iter()
                .all(|(_, c)| c.score == 0 && c.tips.is_empty())
    }
}
