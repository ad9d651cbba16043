//! One trait per workflow stage.
//!
//! The controller only talks to these traits, so any stage can be swapped for
//! a deterministic fake in tests.

use async_trait::async_trait;
use novelwriter_core::{
    Act, ChapterOutline, EvaluationRecord, GenreRequest, IdeaDocument, IdeaSummary, PitchRecord,
    SelectionRecord, StoryBrief, TropeRecord,
};
use novelwriter_error::NovelwriterResult;

/// Resolves genre, subgenre, tone and themes.
#[async_trait]
pub trait GenreStage: Send + Sync {
    /// Fill in whatever the request leaves open.
    async fn determine(&self, request: &GenreRequest) -> NovelwriterResult<StoryBrief>;
}

/// Drafts candidate pitches.
#[async_trait]
pub trait PitchStage: Send + Sync {
    /// Generate pitches for a brief. Never returns an empty list on success.
    async fn generate(&self, brief: &StoryBrief) -> NovelwriterResult<Vec<PitchRecord>>;
}

/// Scores pitches.
#[async_trait]
pub trait CriticStage: Send + Sync {
    /// One evaluation per pitch, in pitch order.
    async fn evaluate(
        &self,
        brief: &StoryBrief,
        pitches: &[PitchRecord],
    ) -> NovelwriterResult<Vec<EvaluationRecord>>;
}

/// Reworks a weak pitch using its evaluation.
#[async_trait]
pub trait ImproverStage: Send + Sync {
    /// Return the improved pitch, or the original when improvement fails softly.
    async fn improve(
        &self,
        brief: &StoryBrief,
        pitch: &PitchRecord,
        evaluation: &EvaluationRecord,
    ) -> NovelwriterResult<PitchRecord>;
}

/// Picks a winning pitch.
#[async_trait]
pub trait VoterStage: Send + Sync {
    /// Choose among candidates. `evaluations` parallels `pitches`.
    async fn select(
        &self,
        brief: &StoryBrief,
        pitches: &[PitchRecord],
        evaluations: &[EvaluationRecord],
    ) -> NovelwriterResult<SelectionRecord>;
}

/// Examines the winning pitch for overused tropes.
#[async_trait]
pub trait TropeStage: Send + Sync {
    /// Analyze one pitch.
    async fn analyze(
        &self,
        brief: &StoryBrief,
        pitch: &PitchRecord,
    ) -> NovelwriterResult<TropeRecord>;
}

/// Receives the finished idea.
#[async_trait]
pub trait DocumentSink: Send + Sync {
    /// Store the document and return where it went.
    async fn record(&self, document: IdeaDocument) -> NovelwriterResult<String>;
}

/// Drafts the chapters of one act of an outline.
#[async_trait]
pub trait OutlineStage: Send + Sync {
    /// Chapters for `act`, in reading order.
    async fn outline_act(
        &self,
        idea: &IdeaSummary,
        act: Act,
    ) -> NovelwriterResult<Vec<ChapterOutline>>;
}
