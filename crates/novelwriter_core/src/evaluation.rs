//! Critic evaluation records.

use serde::{Deserialize, Serialize};

/// Pitches scoring strictly below this are sent back for improvement.
pub const IMPROVEMENT_THRESHOLD: f64 = 7.5;

/// Where an evaluation's overall score came from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum OverallSource {
    /// The critic wrote an explicit overall line
    #[display("stated")]
    Stated,
    /// Mean of the criterion scores
    #[display("mean")]
    Mean,
    /// No scores at all; overall synthesized as zero
    #[display("unscored")]
    Unscored,
}

/// Criterion scores in the order the critic listed them.
///
/// Re-inserting a criterion replaces its score in place.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Scores(Vec<(String, f64)>);

impl Scores {
    /// Empty score list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a criterion score.
    pub fn insert(&mut self, criterion: impl Into<String>, score: f64) {
        let criterion = criterion.into();
        match self.0.iter_mut().find(|(name, _)| *name == criterion) {
            Some(entry) => entry.1 = score,
            None => self.0.push((criterion, score)),
        }
    }

    /// Score for a criterion.
    pub fn get(&self, criterion: &str) -> Option<f64> {
        self.0
            .iter()
            .find(|(name, _)| name == criterion)
            .map(|(_, score)| *score)
    }

    /// Arithmetic mean, `None` when empty.
    pub fn mean(&self) -> Option<f64> {
        if self.0.is_empty() {
            return None;
        }
        Some(self.0.iter().map(|(_, score)| score).sum::<f64>() / self.0.len() as f64)
    }

    /// Iterate criteria in listed order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, score)| (name.as_str(), *score))
    }

    /// Number of criteria.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no criteria were scored.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Scores {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut scores = Scores::new();
        for (name, score) in iter {
            scores.insert(name, score);
        }
        scores
    }
}

/// A critic's verdict on one pitch.
///
/// # Examples
///
/// ```
/// use novelwriter_core::{EvaluationRecord, OverallSource, Scores};
///
/// let scores: Scores = [("a", 10.0), ("b", 4.0)].into_iter().collect();
/// let stated = EvaluationRecord::new(scores.clone(), Some(5.0), vec![], vec![]);
/// assert_eq!(stated.overall_score, 5.0);
/// assert_eq!(stated.overall_source, OverallSource::Stated);
///
/// let computed = EvaluationRecord::new(scores, None, vec![], vec![]);
/// assert_eq!(computed.overall_score, 7.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    /// Criterion scores, excluding the overall line
    pub scores: Scores,
    /// Stated overall score, else the mean, else zero
    pub overall_score: f64,
    /// How `overall_score` was obtained
    pub overall_source: OverallSource,
    /// What works
    pub key_strengths: Vec<String>,
    /// What to fix
    pub areas_for_improvement: Vec<String>,
}

impl EvaluationRecord {
    /// Build a record, resolving the overall score.
    ///
    /// An explicit overall value wins over the computed mean.
    pub fn new(
        scores: Scores,
        stated_overall: Option<f64>,
        key_strengths: Vec<String>,
        areas_for_improvement: Vec<String>,
    ) -> Self {
        let (overall_score, overall_source) = match (stated_overall, scores.mean()) {
            (Some(stated), _) => (stated, OverallSource::Stated),
            (None, Some(mean)) => (mean, OverallSource::Mean),
            (None, None) => (0.0, OverallSource::Unscored),
        };
        Self {
            scores,
            overall_score,
            overall_source,
            key_strengths,
            areas_for_improvement,
        }
    }

    /// Whether this evaluation sends its pitch through the improver.
    pub fn needs_improvement(&self) -> bool {
        self.overall_score < IMPROVEMENT_THRESHOLD
    }
}
