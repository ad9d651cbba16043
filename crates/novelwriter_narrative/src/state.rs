//! Per-run workflow state.

use derive_getters::Getters;
use novelwriter_core::{
    EvaluationRecord, PitchRecord, SelectionRecord, Stage, StoryBrief, TropeRecord,
};
use novelwriter_error::{NovelwriterResult, WorkflowError, WorkflowErrorKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Everything one run has produced so far.
///
/// Once the stage is `Completed` or `Error` every mutator refuses with
/// [`WorkflowErrorKind::TerminalState`] and the state is frozen.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Getters)]
pub struct WorkflowState {
    /// Current stage
    stage: Stage,
    /// Genre, subgenre, tone and themes once resolved
    brief: Option<StoryBrief>,
    /// Pitches as generated
    pitches: Vec<PitchRecord>,
    /// One evaluation per pitch, same order
    evaluations: Vec<EvaluationRecord>,
    /// Pitches after the improvement pass
    improved_pitches: Vec<PitchRecord>,
    /// Winning pitch
    selected_pitch: Option<PitchRecord>,
    /// Voter rationale
    selection: Option<SelectionRecord>,
    /// Trope analysis of the winner
    trope_analysis: Option<TropeRecord>,
    /// Where the sink put the document
    output_location: Option<String>,
    /// Failure message once the run errored
    error: Option<String>,
}

impl WorkflowState {
    /// Fresh state at `Stage::Initial`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected genre.
    pub fn genre(&self) -> Option<&str> {
        self.brief.as_ref().map(|brief| brief.genre().as_str())
    }

    /// Selected subgenre.
    pub fn subgenre(&self) -> Option<&str> {
        self.brief.as_ref().map(|brief| brief.subgenre().as_str())
    }

    /// Resolved tone.
    pub fn tone(&self) -> Option<&str> {
        self.brief.as_ref().map(|brief| brief.tone().as_str())
    }

    /// Resolved themes, empty before genre selection.
    pub fn themes(&self) -> &[String] {
        self.brief
            .as_ref()
            .map(|brief| brief.themes().as_slice())
            .unwrap_or(&[])
    }

    /// Whether the run has finished, successfully or not.
    pub fn is_terminal(&self) -> bool {
        self.stage.is_terminal()
    }

    fn ensure_open(&self) -> NovelwriterResult<()> {
        if self.is_terminal() {
            return Err(WorkflowError::new(WorkflowErrorKind::TerminalState(
                self.stage.to_string(),
            ))
            .into());
        }
        Ok(())
    }

    pub(crate) fn enter(&mut self, stage: Stage) -> NovelwriterResult<()> {
        self.ensure_open()?;
        if self.stage.next() != Some(stage) {
            return Err(WorkflowError::new(WorkflowErrorKind::OutOfOrder {
                requested: stage.to_string(),
                current: self.stage.to_string(),
            })
            .into());
        }
        debug!(from = %self.stage, to = %stage, "Entering stage");
        self.stage = stage;
        Ok(())
    }

    pub(crate) fn set_brief(&mut self, brief: StoryBrief) -> NovelwriterResult<()> {
        self.ensure_open()?;
        self.brief = Some(brief);
        Ok(())
    }

    pub(crate) fn set_pitches(&mut self, pitches: Vec<PitchRecord>) -> NovelwriterResult<()> {
        self.ensure_open()?;
        self.pitches = pitches;
        Ok(())
    }

    pub(crate) fn set_evaluations(
        &mut self,
        evaluations: Vec<EvaluationRecord>,
    ) -> NovelwriterResult<()> {
        self.ensure_open()?;
        self.evaluations = evaluations;
        Ok(())
    }

    pub(crate) fn set_improved_pitches(
        &mut self,
        pitches: Vec<PitchRecord>,
    ) -> NovelwriterResult<()> {
        self.ensure_open()?;
        self.improved_pitches = pitches;
        Ok(())
    }

    pub(crate) fn set_selection(
        &mut self,
        pitch: PitchRecord,
        selection: SelectionRecord,
    ) -> NovelwriterResult<()> {
        self.ensure_open()?;
        self.selected_pitch = Some(pitch);
        self.selection = Some(selection);
        Ok(())
    }

    pub(crate) fn set_trope_analysis(&mut self, analysis: TropeRecord) -> NovelwriterResult<()> {
        self.ensure_open()?;
        self.trope_analysis = Some(analysis);
        Ok(())
    }

    pub(crate) fn complete(&mut self, location: String) -> NovelwriterResult<()> {
        self.ensure_open()?;
        self.output_location = Some(location);
        self.stage = Stage::Completed;
        Ok(())
    }

    pub(crate) fn fail(&mut self, message: impl Into<String>) -> NovelwriterResult<()> {
        self.ensure_open()?;
        self.error = Some(message.into());
        self.stage = Stage::Error;
        Ok(())
    }
}
