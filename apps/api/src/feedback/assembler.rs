//! Canonical Assembler — routes raw producer fields into the five canonical
//! categories.
//!
//! Each producer version has its own [`FeedbackStrategy`]. The two strategies
//! score the same categories with different formulas; both are kept so that
//! payloads from either producer keep scoring the way they always have.

use serde_json::{Map, Value};

use crate::feedback::canonical::read_canonical;
use crate::feedback::models::{Category, Feedback, Tip, MAX_SCORE};
use crate::feedback::scale::{map_scale, score_or_aggregate, Scale};
use crate::feedback::schema::{fields, RawSchema};
use crate::feedback::tips::{extract_tips, TipKind};

const DEFAULT_STRUCTURE_TIP: &str = "Improve resume structure";

/// Builds canonical feedback from one producer's payload shape.
pub trait FeedbackStrategy {
    fn name(&self) -> &'static str;
    fn assemble(&self, raw: &Map<String, Value>) -> Feedback;
}

/// Strategy for the "aggregate rating + lists" producer.
///
/// | Category     | Score                                                   | Tips             |
/// |--------------|---------------------------------------------------------|------------------|
/// | ATS          | `min(100, 50 + 5n)` for n notes, else `max(40, overall - 10)` | ATS notes  |
/// | toneAndStyle | communication sub-score, else aggregate                 | strengths        |
/// | content      | `max(30, 100 - 8n)` for n weaknesses                    | weaknesses       |
/// | structure    | overall                                                 | none             |
/// | skills       | skill-match sub-score, else aggregate                   | strengths        |
pub struct RatingListStrategy;

impl FeedbackStrategy for RatingListStrategy {
    fn name(&self) -> &'static str {
        "rating_list"
    }

    fn assemble(&self, raw: &Map<String, Value>) -> Feedback {
        let aggregate = raw.get(fields::OVERALL_RATING);
        let job_match = raw.get(fields::JOB_MATCH_ANALYSIS);
        let overall_score = map_scale(aggregate, Scale::OutOfTen);

        let strengths = extract_tips(raw.get(fields::STRENGTHS), TipKind::Strength);
        let weaknesses = extract_tips(raw.get(fields::WEAKNESSES), TipKind::Weakness);
        let ats_notes = extract_tips(raw.get(fields::ATS_OPTIMIZATION), TipKind::AtsNote);

        let ats_score = if ats_notes.is_empty() {
            overall_score.saturating_sub(10).max(40)
        } else {
            let bonus = ats_notes.len().saturating_mul(5);
            50_usize.saturating_add(bonus).min(MAX_SCORE as usize) as u8
        };

        let content_score = {
            // Blank items were dropped by `extract_tips` and are not penalized.
            let penalty = weaknesses.len().saturating_mul(8);
            (MAX_SCORE as usize).saturating_sub(penalty).max(30) as u8
        };

        let tone_score = score_or_aggregate(
            job_match.and_then(|m| m.get(fields::COMMUNICATION_SCORE)),
            Scale::OutOfTen,
            aggregate,
        );
        let skills_score = score_or_aggregate(
            job_match.and_then(|m| m.get(fields::SKILL_MATCH_SCORE)),
            Scale::OutOfTen,
            aggregate,
        );

        Feedback {
            overall_score,
            ats: Category::new(ats_score, ats_notes),
            tone_and_style: Category::new(tone_score, strengths.clone()),
            content: Category::new(content_score, weaknesses),
            structure: Category::new(overall_score, vec![]),
            skills: Category::new(skills_score, strengths),
        }
    }
}

/// Strategy for the "discrete sub-scores" producer.
///
/// Every sub-score is read on the 0–10 scale except the keyword-match
/// percentage, and falls back to the aggregate rating when absent.
pub struct SubScoreStrategy;

impl FeedbackStrategy for SubScoreStrategy {
    fn name(&self) -> &'static str {
        "sub_score"
    }

    fn assemble(&self, raw: &Map<String, Value>) -> Feedback {
        let aggregate = raw.get(fields::OVERALL_RATING);
        let sub_score = |key: &str, scale: Scale| score_or_aggregate(raw.get(key), scale, aggregate);
        let missing_keywords = raw.get(fields::MISSING_KEYWORDS);

        let structure_tip = raw
            .get(fields::FINAL_RECOMMENDATION)
            .and_then(Value::as_str)
            .filter(|text| !text.trim().is_empty())
            .unwrap_or(DEFAULT_STRUCTURE_TIP);

        Feedback {
            overall_score: map_scale(aggregate, Scale::OutOfTen),
            ats: Category::new(
                sub_score(fields::ATS_COMPATIBILITY, Scale::OutOfTen),
                extract_tips(missing_keywords, TipKind::MissingKeywordAts),
            ),
            tone_and_style: Category::new(
                sub_score(fields::FORMAT_AND_DESIGN, Scale::OutOfTen),
                extract_tips(raw.get(fields::IMPROVEMENT_SUGGESTIONS), TipKind::Suggestion),
            ),
            content: Category::new(
                sub_score(fields::CONTENT_QUALITY, Scale::OutOfTen),
                extract_tips(raw.get(fields::DETAILED_FEEDBACK), TipKind::DetailedFeedback),
            ),
            structure: Category::new(
                sub_score(fields::RELEVANCE_TO_JOB, Scale::OutOfTen),
                vec![Tip::improve(structure_tip)],
            ),
            skills: Category::new(
                sub_score(fields::KEYWORD_MATCH_PERCENTAGE, Scale::OutOfHundred),
                extract_tips(missing_keywords, TipKind::MissingKeywordSkills),
            ),
        }
    }
}

/// Assembles canonical feedback for a sniffed payload. Total over every
/// [`RawSchema`]; non-object payloads always produce [`Feedback::empty`].
pub fn assemble(schema: RawSchema, raw: &Value) -> Feedback {
    let Some(map) = raw.as_object() else {
        return Feedback::empty();
    };

    match schema {
        RawSchema::Unrecognized => Feedback::empty(),
        RawSchema::AlreadyCanonical => read_canonical(map),
        RawSchema::ProducerSchemaA => run(&RatingListStrategy, map),
        RawSchema::ProducerSchemaB => run(&SubScoreStrategy, map),
    }
}

fn run(strategy: &dyn FeedbackStrategy, raw: &Map<String, Value>) -> Feedback {
    let feedback = strategy.assemble(raw);
    tracing::debug!(
        strategy = strategy.name(),
        overall_score = feedback.overall_score,
        "Assembled canonical feedback"
    );
    feedback
}
