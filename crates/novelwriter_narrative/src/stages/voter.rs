//! Winner selection.

use crate::{SelectionParser, voter_prompt};
use async_trait::async_trait;
use novelwriter_core::{EvaluationRecord, PitchRecord, SelectionRecord, StoryBrief, WinnerFallback};
use novelwriter_error::{
    NovelwriterResult, ParseError, ParseErrorKind, WorkflowError, WorkflowErrorKind,
};
use novelwriter_interface::{TextGenerator, VoterStage};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Asks the model to choose between the scored candidates.
pub struct PitchVoter {
    generator: Arc<dyn TextGenerator>,
    parser: SelectionParser,
}

impl PitchVoter {
    /// Build a voter over a text generator.
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            parser: SelectionParser::new(),
        }
    }
}

/// Index of the best scored candidate, the earliest on ties.
pub fn highest_scoring(evaluations: &[EvaluationRecord]) -> Option<usize> {
    evaluations
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (index, evaluation)| match best {
            Some((_, score)) if score >= evaluation.overall_score => best,
            _ => Some((index, evaluation.overall_score)),
        })
        .map(|(index, _)| index)
}

#[async_trait]
impl VoterStage for PitchVoter {
    #[instrument(skip_all, fields(candidates = pitches.len()))]
    async fn select(
        &self,
        brief: &StoryBrief,
        pitches: &[PitchRecord],
        evaluations: &[EvaluationRecord],
    ) -> NovelwriterResult<SelectionRecord> {
        if pitches.is_empty() {
            return Err(WorkflowError::new(WorkflowErrorKind::NoCandidates(
                "selection".to_string(),
            ))
            .into());
        }

        let reply = self
            .generator
            .complete(&voter_prompt(brief, pitches, evaluations))
            .await?;
        let Some(mut selection) = self.parser.parse(&reply) else {
            return Err(ParseError::new(ParseErrorKind::NoRecords {
                stage: "voter".to_string(),
            })
            .into());
        };

        if selection.winner.is_empty() {
            let index = highest_scoring(evaluations).unwrap_or(0);
            let winner = pitches.get(index).unwrap_or(&pitches[0]);
            warn!(
                winner = %winner.title,
                fallback = %WinnerFallback::HighestScore,
                "Voter named no winner"
            );
            selection.winner = winner.title.clone();
            selection.fallback = Some(WinnerFallback::HighestScore);
        }

        info!(winner = %selection.winner, "Selected pitch");
        Ok(selection)
    }
}
