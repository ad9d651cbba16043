//! Stage controller: drives one run through every workflow stage.

use crate::{WorkflowState, resolve_winner};
use novelwriter_core::{GenreRequest, IdeaDocument, PitchRecord, Stage, StoryBrief};
use novelwriter_error::{
    NovelwriterError, NovelwriterResult, StageError, WorkflowError, WorkflowErrorKind,
};
use novelwriter_interface::{
    CriticStage, DocumentSink, GenreStage, ImproverStage, NoopObserver, PitchStage,
    StageObserver, TropeStage, VoterStage,
};
use std::sync::Arc;
use tracing::{Instrument, Span};

/// The collaborators a controller runs, one per stage plus the sink.
#[derive(Clone)]
pub struct StageSet {
    /// Genre, tone and themes
    pub genre: Arc<dyn GenreStage>,
    /// Pitch drafting
    pub pitch: Arc<dyn PitchStage>,
    /// Pitch scoring
    pub critic: Arc<dyn CriticStage>,
    /// Rework of weak pitches
    pub improver: Arc<dyn ImproverStage>,
    /// Winner selection
    pub voter: Arc<dyn VoterStage>,
    /// Trope analysis
    pub tropes: Arc<dyn TropeStage>,
    /// Where the finished idea goes
    pub sink: Arc<dyn DocumentSink>,
}

/// Owns a [`WorkflowState`] and advances it one stage at a time.
///
/// Each handler checks that its stage is next, calls one collaborator inside
/// a child span of the run span, merges the result and advances. A failing
/// collaborator moves the run to `Stage::Error` with the message captured,
/// and its error is returned inside a [`StageError`] naming the stage. Calls out of order, or after the run finished,
/// are refused without touching the state.
///
/// # Examples
///
/// ```rust,ignore
/// let mut controller = StageController::new(stages, tracing::info_span!("idea"));
/// let location = controller.run(GenreRequest::default().with_genre("Fantasy")).await?;
/// ```
pub struct StageController {
    stages: StageSet,
    state: WorkflowState,
    span: Span,
    observer: Arc<dyn StageObserver>,
}

impl StageController {
    /// Controller for a fresh run. Stage spans are children of `span`.
    pub fn new(stages: StageSet, span: Span) -> Self {
        Self {
            stages,
            state: WorkflowState::new(),
            span,
            observer: Arc::new(NoopObserver),
        }
    }

    /// Report stage lifecycle events to `observer`.
    pub fn with_observer(mut self, observer: Arc<dyn StageObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// State of the run so far.
    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    /// Consume the controller, keeping the state.
    pub fn into_state(self) -> WorkflowState {
        self.state
    }

    /// Run every stage in order and return the document location.
    pub async fn run(&mut self, request: GenreRequest) -> NovelwriterResult<String> {
        let run_span = self.span.clone();
        async {
            tracing::info!("Starting idea workflow");
            self.select_genre(&request).await?;
            self.generate_pitches().await?;
            self.evaluate_pitches().await?;
            self.improve_pitches().await?;
            self.select_pitch().await?;
            self.analyze_tropes().await?;
            let location = self.write_document().await?;
            tracing::info!(location = %location, "Idea workflow completed");
            Ok::<String, NovelwriterError>(location)
        }
        .instrument(run_span)
        .await
    }

    /// Resolve genre, subgenre, tone and themes.
    pub async fn select_genre(&mut self, request: &GenreRequest) -> NovelwriterResult<()> {
        let stage = self.begin(Stage::GenreSelection)?;
        let result = self
            .stages
            .genre
            .determine(request)
            .instrument(self.stage_span(stage))
            .await;
        let brief = self.settle(stage, result)?;
        tracing::info!(
            genre = %brief.genre(),
            subgenre = %brief.subgenre(),
            tone = %brief.tone(),
            themes = brief.themes().len(),
            "Story brief ready"
        );
        self.state.set_brief(brief)?;
        self.finish(stage);
        Ok(())
    }

    /// Draft candidate pitches.
    pub async fn generate_pitches(&mut self) -> NovelwriterResult<()> {
        let stage = self.begin(Stage::PitchGeneration)?;
        let result = match self.brief(stage) {
            Ok(brief) => {
                self.stages
                    .pitch
                    .generate(&brief)
                    .instrument(self.stage_span(stage))
                    .await
            }
            Err(e) => Err(e),
        };
        let pitches = self.settle(stage, result)?;
        if pitches.is_empty() {
            return self.abort(stage, WorkflowErrorKind::NoCandidates(stage.to_string()));
        }
        self.state.set_pitches(pitches)?;
        self.finish(stage);
        Ok(())
    }

    /// Score every pitch.
    pub async fn evaluate_pitches(&mut self) -> NovelwriterResult<()> {
        let stage = self.begin(Stage::CriticEvaluation)?;
        let pitches = self.state.pitches().clone();
        let result = match self.brief(stage) {
            Ok(brief) => {
                self.stages
                    .critic
                    .evaluate(&brief, &pitches)
                    .instrument(self.stage_span(stage))
                    .await
            }
            Err(e) => Err(e),
        };
        let evaluations = self.settle(stage, result)?;
        if evaluations.len() != pitches.len() {
            return self.abort(
                stage,
                WorkflowErrorKind::EvaluationMismatch {
                    expected: pitches.len(),
                    actual: evaluations.len(),
                },
            );
        }
        self.state.set_evaluations(evaluations)?;
        self.finish(stage);
        Ok(())
    }

    /// Rework every pitch scoring under the improvement threshold.
    pub async fn improve_pitches(&mut self) -> NovelwriterResult<()> {
        let stage = self.begin(Stage::PitchImprovement)?;
        let pitches = self.state.pitches().clone();
        let evaluations = self.state.evaluations().clone();
        let result = match self.brief(stage) {
            Ok(brief) => {
                let improver = Arc::clone(&self.stages.improver);
                async move {
                    let mut improved = Vec::with_capacity(pitches.len());
                    for (pitch, evaluation) in pitches.iter().zip(&evaluations) {
                        if evaluation.needs_improvement() {
                            tracing::info!(
                                title = %pitch.title,
                                score = evaluation.overall_score,
                                "Improving pitch"
                            );
                            improved.push(improver.improve(&brief, pitch, evaluation).await?);
                        } else {
                            tracing::debug!(
                                title = %pitch.title,
                                score = evaluation.overall_score,
                                "Pitch passes unchanged"
                            );
                            improved.push(pitch.clone());
                        }
                    }
                    Ok::<Vec<PitchRecord>, NovelwriterError>(improved)
                }
                .instrument(self.stage_span(stage))
                .await
            }
            Err(e) => Err(e),
        };
        let improved = self.settle(stage, result)?;
        self.state.set_improved_pitches(improved)?;
        self.finish(stage);
        Ok(())
    }

    /// Pick the winner among the improved pitches.
    pub async fn select_pitch(&mut self) -> NovelwriterResult<()> {
        let stage = self.begin(Stage::PitchSelection)?;
        let candidates = self.state.improved_pitches().clone();
        if candidates.is_empty() {
            return self.abort(stage, WorkflowErrorKind::NoCandidates(stage.to_string()));
        }
        let evaluations = self.state.evaluations().clone();
        let result = match self.brief(stage) {
            Ok(brief) => {
                self.stages
                    .voter
                    .select(&brief, &candidates, &evaluations)
                    .instrument(self.stage_span(stage))
                    .await
            }
            Err(e) => Err(e),
        };
        let mut selection = self.settle(stage, result)?;
        let Some(winner) = resolve_winner(&candidates, &mut selection) else {
            return self.abort(stage, WorkflowErrorKind::NoCandidates(stage.to_string()));
        };
        tracing::info!(winner = %winner.title, fallback = ?selection.fallback, "Winner chosen");
        self.state.set_selection(winner, selection)?;
        self.finish(stage);
        Ok(())
    }

    /// Analyze the winner's tropes.
    pub async fn analyze_tropes(&mut self) -> NovelwriterResult<()> {
        let stage = self.begin(Stage::TropeAnalysis)?;
        let result = match (self.brief(stage), self.winner(stage)) {
            (Ok(brief), Ok(winner)) => {
                self.stages
                    .tropes
                    .analyze(&brief, &winner)
                    .instrument(self.stage_span(stage))
                    .await
            }
            (Err(e), _) | (_, Err(e)) => Err(e),
        };
        let analysis = self.settle(stage, result)?;
        self.state.set_trope_analysis(analysis)?;
        self.finish(stage);
        Ok(())
    }

    /// Hand the finished idea to the sink and complete the run.
    pub async fn write_document(&mut self) -> NovelwriterResult<String> {
        let stage = self.begin(Stage::Documentation)?;
        let result = match self.document(stage) {
            Ok(document) => {
                self.stages
                    .sink
                    .record(document)
                    .instrument(self.stage_span(stage))
                    .await
            }
            Err(e) => Err(e),
        };
        let location = self.settle(stage, result)?;
        self.state.complete(location.clone())?;
        self.finish(stage);
        Ok(location)
    }

    fn stage_span(&self, stage: Stage) -> Span {
        tracing::info_span!(parent: &self.span, "stage", stage = %stage)
    }

    fn begin(&mut self, stage: Stage) -> NovelwriterResult<Stage> {
        self.state.enter(stage)?;
        self.observer.on_stage_started(stage);
        Ok(stage)
    }

    fn finish(&self, stage: Stage) {
        tracing::debug!(stage = %stage, "Stage completed");
        self.observer.on_stage_completed(stage);
    }

    fn settle<T>(&mut self, stage: Stage, result: NovelwriterResult<T>) -> NovelwriterResult<T> {
        match result {
            Ok(value) => Ok(value),
            Err(e) => {
                let message = e.to_string();
                tracing::error!(stage = %stage, error = %message, "Stage failed");
                self.state.fail(message.clone())?;
                self.observer.on_stage_failed(stage, &message);
                Err(StageError::new(stage.to_string(), e).into())
            }
        }
    }

    fn abort<T>(&mut self, stage: Stage, kind: WorkflowErrorKind) -> NovelwriterResult<T> {
        self.settle(stage, Err(WorkflowError::new(kind).into()))
    }

    fn brief(&self, stage: Stage) -> NovelwriterResult<StoryBrief> {
        self.state.brief().clone().ok_or_else(|| {
            WorkflowError::new(WorkflowErrorKind::MissingBrief(stage.to_string())).into()
        })
    }

    fn winner(&self, stage: Stage) -> NovelwriterResult<PitchRecord> {
        self.state.selected_pitch().clone().ok_or_else(|| {
            WorkflowError::new(WorkflowErrorKind::NoCandidates(stage.to_string())).into()
        })
    }

    fn document(&self, stage: Stage) -> NovelwriterResult<IdeaDocument> {
        Ok(IdeaDocument {
            brief: self.brief(stage)?,
            selected_pitch: self.winner(stage)?,
            selection: self.state.selection().clone().unwrap_or_default(),
            trope_analysis: self.state.trope_analysis().clone().unwrap_or_default(),
        })
    }
}
