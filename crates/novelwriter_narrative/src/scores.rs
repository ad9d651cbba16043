//! Score line extraction for critic replies.

use novelwriter_core::Scores;
use novelwriter_error::{NovelwriterResult, ParseError, ParseErrorKind};
use regex::Regex;
use tracing::{debug, warn};

const SCORE_LINE: &str = r"^-?\s*([^:]+):\s*(\d+(?:\.\d+)?)\s*(?:/\s*10)?";

/// Lowest score a criterion can hold.
pub const MIN_SCORE: f64 = 1.0;
/// Highest score a criterion can hold.
pub const MAX_SCORE: f64 = 10.0;

/// Reads `- Label: 8/10` lines into criterion scores.
///
/// Labels are case-folded with spaces turned into underscores. A label
/// mentioning "overall" is returned separately as the stated overall score and
/// never enters the criterion map.
#[derive(Debug, Clone)]
pub struct ScoreParser {
    line: Regex,
}

impl ScoreParser {
    /// Compile the score line pattern.
    pub fn new() -> NovelwriterResult<Self> {
        let line = Regex::new(SCORE_LINE).map_err(|e| {
            ParseError::new(ParseErrorKind::InvalidPattern(format!("{}: {}", SCORE_LINE, e)))
        })?;
        Ok(Self { line })
    }

    /// Extract criterion scores and an optional stated overall score.
    pub fn parse<'a>(&self, lines: impl IntoIterator<Item = &'a str>) -> (Scores, Option<f64>) {
        let mut scores = Scores::new();
        let mut overall = None;

        for raw in lines {
            let line = raw.replace('*', "");
            let Some(caps) = self.line.captures(line.trim()) else {
                debug!(line = %raw, "Skipping non-score line");
                continue;
            };
            let label = normalize_label(&caps[1]);
            let Ok(value) = caps[2].parse::<f64>() else {
                continue;
            };
            let value = clamp_score(&label, value);
            if label.contains("overall") {
                overall = Some(value);
            } else {
                scores.insert(label, value);
            }
        }

        (scores, overall)
    }
}

/// Case-fold a criterion label and join its words with underscores.
pub fn normalize_label(label: &str) -> String {
    label
        .trim()
        .trim_start_matches('-')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

fn clamp_score(label: &str, value: f64) -> f64 {
    let clamped = value.clamp(MIN_SCORE, MAX_SCORE);
    if clamped != value {
        warn!(label, value, clamped, "Score outside 1-10, clamping");
    }
    clamped
}
