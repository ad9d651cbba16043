//! Deterministic fakes for workflow tests.

#![allow(dead_code)]

use async_trait::async_trait;
use novelwriter_core::{
    EvaluationRecord, GenreRequest, PitchRecord, Scores, SelectionRecord, StoryBrief, TropeRecord,
};
use novelwriter_error::{NovelwriterResult, ProviderError, ProviderErrorKind};
use novelwriter_interface::{
    CriticStage, GenreStage, ImproverStage, PitchStage, TextGenerator, TropeStage, VoterStage,
};
use novelwriter_narrative::{MemoryDocumentSink, StageSet};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Text generator replaying scripted replies in order and recording prompts.
#[derive(Debug, Clone, Default)]
pub struct ScriptedGenerator {
    replies: Arc<Mutex<VecDeque<String>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedGenerator {
    pub fn new<S: Into<String>>(replies: impl IntoIterator<Item = S>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into_iter().map(Into::into).collect())),
            prompts: Arc::default(),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn remaining(&self) -> usize {
        self.replies.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn complete(&self, prompt: &str) -> NovelwriterResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ProviderError::new(ProviderErrorKind::EmptyResponse).into())
    }
}

pub fn brief() -> StoryBrief {
    StoryBrief::builder()
        .genre("Fantasy")
        .subgenre("Urban Fantasy")
        .tone("grim")
        .themes(vec!["betrayal".to_string(), "hope".to_string()])
        .build()
        .unwrap()
}

pub fn pitch(title: &str) -> PitchRecord {
    PitchRecord {
        title: title.to_string(),
        hook: format!("{} hook", title),
        premise: format!("{} premise", title),
        main_conflict: format!("{} conflict", title),
        unique_twist: format!("{} twist", title),
    }
}

pub fn scored(overall: f64) -> EvaluationRecord {
    EvaluationRecord::new(Scores::new(), Some(overall), Vec::new(), Vec::new())
}

pub struct FixedGenre;

#[async_trait]
impl GenreStage for FixedGenre {
    async fn determine(&self, _request: &GenreRequest) -> NovelwriterResult<StoryBrief> {
        Ok(brief())
    }
}

/// Returns the given pitches, or a rate limit error when `None`.
pub struct FixedPitches(pub Option<Vec<PitchRecord>>);

#[async_trait]
impl PitchStage for FixedPitches {
    async fn generate(&self, _brief: &StoryBrief) -> NovelwriterResult<Vec<PitchRecord>> {
        self.0.clone().ok_or_else(|| {
            ProviderError::new(ProviderErrorKind::RateLimit("quota exceeded".to_string())).into()
        })
    }
}

/// Scores pitches with the given overall values, in order.
pub struct FixedCritic(pub Vec<f64>);

#[async_trait]
impl CriticStage for FixedCritic {
    async fn evaluate(
        &self,
        _brief: &StoryBrief,
        _pitches: &[PitchRecord],
    ) -> NovelwriterResult<Vec<EvaluationRecord>> {
        Ok(self.0.iter().copied().map(scored).collect())
    }
}

/// Prefixes titles with "Improved" and counts calls.
#[derive(Default)]
pub struct CountingImprover {
    pub calls: Arc<Mutex<usize>>,
}

#[async_trait]
impl ImproverStage for CountingImprover {
    async fn improve(
        &self,
        _brief: &StoryBrief,
        pitch: &PitchRecord,
        _evaluation: &EvaluationRecord,
    ) -> NovelwriterResult<PitchRecord> {
        *self.calls.lock().unwrap() += 1;
        let mut improved = pitch.clone();
        improved.title = format!("Improved {}", pitch.title);
        Ok(improved)
    }
}

/// Names a fixed winner.
pub struct FixedVoter(pub String);

#[async_trait]
impl VoterStage for FixedVoter {
    async fn select(
        &self,
        _brief: &StoryBrief,
        _pitches: &[PitchRecord],
        _evaluations: &[EvaluationRecord],
    ) -> NovelwriterResult<SelectionRecord> {
        Ok(SelectionRecord {
            winner: self.0.clone(),
            selection_criteria: vec!["Strongest hook".to_string()],
            ..Default::default()
        })
    }
}

pub struct FixedTropes;

#[async_trait]
impl TropeStage for FixedTropes {
    async fn analyze(
        &self,
        _brief: &StoryBrief,
        _pitch: &PitchRecord,
    ) -> NovelwriterResult<TropeRecord> {
        Ok(TropeRecord {
            summary: "Fresh enough.".to_string(),
            ..Default::default()
        })
    }
}

/// Stage set of fakes around the given pitches, scores and winner.
pub fn fake_stages(
    pitches: Option<Vec<PitchRecord>>,
    scores: Vec<f64>,
    winner: &str,
    improver: Arc<CountingImprover>,
    sink: MemoryDocumentSink,
) -> StageSet {
    StageSet {
        genre: Arc::new(FixedGenre),
        pitch: Arc::new(FixedPitches(pitches)),
        critic: Arc::new(FixedCritic(scores)),
        improver,
        voter: Arc::new(FixedVoter(winner.to_string())),
        tropes: Arc::new(FixedTropes),
        sink: Arc::new(sink),
    }
}
