//! Workflow stages.

use serde::{Deserialize, Serialize};

/// Position of a run in the idea workflow.
///
/// Stages advance strictly in declaration order from `Initial` to
/// `Completed`. `Error` can be entered from any non-terminal stage.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    /// Nothing has run yet
    #[default]
    Initial,
    /// Picking genre, tone and themes
    GenreSelection,
    /// Drafting pitches
    PitchGeneration,
    /// Scoring pitches
    CriticEvaluation,
    /// Reworking weak pitches
    PitchImprovement,
    /// Choosing a winner
    PitchSelection,
    /// Examining the winner's tropes
    TropeAnalysis,
    /// Writing the final document
    Documentation,
    /// Finished successfully
    Completed,
    /// Failed; the run cannot continue
    Error,
}

impl Stage {
    /// The stage that follows this one on the happy path.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Initial => Some(Stage::GenreSelection),
            Stage::GenreSelection => Some(Stage::PitchGeneration),
            Stage::PitchGeneration => Some(Stage::CriticEvaluation),
            Stage::CriticEvaluation => Some(Stage::PitchImprovement),
            Stage::PitchImprovement => Some(Stage::PitchSelection),
            Stage::PitchSelection => Some(Stage::TropeAnalysis),
            Stage::TropeAnalysis => Some(Stage::Documentation),
            Stage::Documentation => Some(Stage::Completed),
            Stage::Completed | Stage::Error => None,
        }
    }

    /// Whether the run is over.
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Completed | Stage::Error)
    }
}
