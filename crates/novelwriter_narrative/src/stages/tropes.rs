//! Trope analysis of the winning pitch.

use crate::{TropeParser, trope_prompt};
use async_trait::async_trait;
use novelwriter_core::{OveruseLevel, PitchRecord, StoryBrief, TropeRecord};
use novelwriter_error::{NovelwriterResult, ParseError, ParseErrorKind};
use novelwriter_interface::{TextGenerator, TropeStage};
use std::sync::Arc;
use tracing::{info, instrument};

/// Names the tropes a pitch leans on and how to avoid them.
pub struct TropeAnalyst {
    generator: Arc<dyn TextGenerator>,
    parser: TropeParser,
}

impl TropeAnalyst {
    /// Build an analyst over a text generator.
    pub fn new(generator: Arc<dyn TextGenerator>) -> NovelwriterResult<Self> {
        Ok(Self {
            generator,
            parser: TropeParser::new()?,
        })
    }
}

#[async_trait]
impl TropeStage for TropeAnalyst {
    #[instrument(skip_all, fields(title = %pitch.title))]
    async fn analyze(
        &self,
        brief: &StoryBrief,
        pitch: &PitchRecord,
    ) -> NovelwriterResult<TropeRecord> {
        let reply = self.generator.complete(&trope_prompt(brief, pitch)).await?;
        let analysis = self.parser.parse(&reply).ok_or_else(|| {
            ParseError::new(ParseErrorKind::NoRecords {
                stage: "tropes".to_string(),
            })
        })?;
        info!(
            tropes = analysis.tropes.len(),
            high = analysis.count_at(OveruseLevel::High),
            alternatives = analysis.alternatives.len(),
            "Analyzed tropes"
        );
        Ok(analysis)
    }
}
