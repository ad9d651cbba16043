//! Pitch revision.

use crate::{PitchParser, improver_prompt};
use async_trait::async_trait;
use novelwriter_core::{EvaluationRecord, PitchRecord, StoryBrief};
use novelwriter_error::NovelwriterResult;
use novelwriter_interface::{ImproverStage, TextGenerator};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Rewrites a pitch against its critique.
///
/// A reply without a usable `# Improved Pitch` block leaves the pitch as it
/// was.
pub struct PitchImprover {
    generator: Arc<dyn TextGenerator>,
    parser: PitchParser,
}

impl PitchImprover {
    /// Build an improver over a text generator.
    pub fn new(generator: Arc<dyn TextGenerator>) -> NovelwriterResult<Self> {
        Ok(Self {
            generator,
            parser: PitchParser::improved()?,
        })
    }
}

#[async_trait]
impl ImproverStage for PitchImprover {
    #[instrument(skip_all, fields(title = %pitch.title, score = evaluation.overall_score))]
    async fn improve(
        &self,
        brief: &StoryBrief,
        pitch: &PitchRecord,
        evaluation: &EvaluationRecord,
    ) -> NovelwriterResult<PitchRecord> {
        let reply = self
            .generator
            .complete(&improver_prompt(brief, pitch, evaluation))
            .await?;

        match self.parser.parse_one(&reply) {
            Some(improved) => {
                info!(from = %pitch.title, to = %improved.title, "Improved pitch");
                Ok(improved)
            }
            None => {
                warn!(title = %pitch.title, "Improver reply unusable, keeping original pitch");
                Ok(pitch.clone())
            }
        }
    }
}
