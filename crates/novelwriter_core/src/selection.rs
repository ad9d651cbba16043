//! Winner selection records.

use serde::{Deserialize, Serialize};

/// How a winner was chosen when the voter's answer could not be used directly.
///
/// The two strategies are applied at different call sites and deliberately
/// disagree: the voter falls back to the best score when its reply names no
/// winner, while the controller falls back to list order when the named winner
/// matches no candidate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum WinnerFallback {
    /// Highest overall score, first one on ties
    #[display("highest score")]
    HighestScore,
    /// First candidate in list order
    #[display("first candidate")]
    FirstCandidate,
}

/// The voter's choice and rationale.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionRecord {
    /// Title of the winning pitch as the voter wrote it
    pub winner: String,
    /// Why it won
    pub selection_criteria: Vec<String>,
    /// Next steps for the winner
    pub development_recommendations: Vec<String>,
    /// Risks to watch
    pub potential_challenges: Vec<String>,
    /// Set when a fallback strategy picked the winner
    pub fallback: Option<WinnerFallback>,
}
