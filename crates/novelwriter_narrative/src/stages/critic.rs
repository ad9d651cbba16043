//! Pitch evaluation.

use crate::{EvaluationParser, critic_prompt};
use async_trait::async_trait;
use novelwriter_core::{EvaluationRecord, OverallSource, PitchRecord, StoryBrief};
use novelwriter_error::{NovelwriterResult, ParseError, ParseErrorKind};
use novelwriter_interface::{CriticStage, TextGenerator};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Scores each pitch with its own request, in order.
pub struct PitchCritic {
    generator: Arc<dyn TextGenerator>,
    parser: EvaluationParser,
}

impl PitchCritic {
    /// Build a critic over a text generator.
    pub fn new(generator: Arc<dyn TextGenerator>) -> NovelwriterResult<Self> {
        Ok(Self {
            generator,
            parser: EvaluationParser::new()?,
        })
    }
}

#[async_trait]
impl CriticStage for PitchCritic {
    #[instrument(skip(self, brief, pitches), fields(count = pitches.len()))]
    async fn evaluate(
        &self,
        brief: &StoryBrief,
        pitches: &[PitchRecord],
    ) -> NovelwriterResult<Vec<EvaluationRecord>> {
        let mut evaluations = Vec::with_capacity(pitches.len());
        for (index, pitch) in pitches.iter().enumerate() {
            let reply = self.generator.complete(&critic_prompt(brief, pitch)).await?;
            let Some(evaluation) = self.parser.parse(&reply) else {
                warn!(index, title = %pitch.title, "Critic reply was unusable");
                return Err(ParseError::new(ParseErrorKind::NoRecords {
                    stage: "critic".to_string(),
                })
                .into());
            };
            if evaluation.overall_source == OverallSource::Unscored {
                warn!(index, title = %pitch.title, "Critic reply carried no scores");
            }
            debug!(
                index,
                title = %pitch.title,
                overall = evaluation.overall_score,
                source = %evaluation.overall_source,
                "Evaluated pitch"
            );
            evaluations.push(evaluation);
        }
        Ok(evaluations)
    }
}
