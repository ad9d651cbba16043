//! Pitch generation.

use crate::{PitchParser, pitch_prompt};
use async_trait::async_trait;
use novelwriter_core::{PitchRecord, StoryBrief};
use novelwriter_error::{NovelwriterResult, ParseError, ParseErrorKind};
use novelwriter_interface::{PitchStage, TextGenerator};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Asks for a batch of pitches and keeps the usable ones.
pub struct PitchGenerator {
    generator: Arc<dyn TextGenerator>,
    parser: PitchParser,
    count: usize,
}

impl PitchGenerator {
    /// Generator asking for `count` pitches per run.
    pub fn new(generator: Arc<dyn TextGenerator>, count: usize) -> NovelwriterResult<Self> {
        Ok(Self {
            generator,
            parser: PitchParser::new()?,
            count: count.max(1),
        })
    }
}

#[async_trait]
impl PitchStage for PitchGenerator {
    #[instrument(skip(self, brief), fields(subgenre = %brief.subgenre(), count = self.count))]
    async fn generate(&self, brief: &StoryBrief) -> NovelwriterResult<Vec<PitchRecord>> {
        let reply = self.generator.complete(&pitch_prompt(brief, self.count)).await?;
        let pitches = self.parser.parse(&reply);

        if pitches.is_empty() {
            return Err(ParseError::new(ParseErrorKind::NoRecords {
                stage: "pitch".to_string(),
            })
            .into());
        }
        if pitches.len() != self.count {
            warn!(requested = self.count, parsed = pitches.len(), "Pitch count differs from request");
        }

        info!(count = pitches.len(), "Generated pitches");
        Ok(pitches)
    }
}
