//! Chapter outlines, one act per request.

use crate::{OutlineParser, outline_prompt};
use async_trait::async_trait;
use novelwriter_core::{Act, ChapterOutline, IdeaSummary};
use novelwriter_error::{NovelwriterResult, ParseError, ParseErrorKind};
use novelwriter_interface::{OutlineStage, TextGenerator};
use std::sync::Arc;
use tracing::{info, instrument};

/// Asks the model for each act's chapters and reads them back.
pub struct PlotOutliner {
    generator: Arc<dyn TextGenerator>,
    parser: OutlineParser,
}

impl PlotOutliner {
    /// Build an outliner over a text generator.
    pub fn new(generator: Arc<dyn TextGenerator>) -> NovelwriterResult<Self> {
        Ok(Self {
            generator,
            parser: OutlineParser::new()?,
        })
    }
}

#[async_trait]
impl OutlineStage for PlotOutliner {
    #[instrument(skip_all, fields(title = %idea.title, act = %act))]
    async fn outline_act(
        &self,
        idea: &IdeaSummary,
        act: Act,
    ) -> NovelwriterResult<Vec<ChapterOutline>> {
        let reply = self.generator.complete(&outline_prompt(idea, act)).await?;

        let chapters = self.parser.parse(&reply, act);
        if chapters.is_empty() {
            return Err(ParseError::new(ParseErrorKind::NoRecords {
                stage: "outline".to_string(),
            })
            .into());
        }
        info!(chapters = chapters.len(), "Outlined act");
        Ok(chapters)
    }
}
