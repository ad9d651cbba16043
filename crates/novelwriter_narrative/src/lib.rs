//! The idea workflow engine.
//!
//! A [`StageController`] walks a run from genre selection to a finished
//! document, calling one stage collaborator per step. The model-backed
//! collaborators build a prompt, send it through a
//! [`TextGenerator`](novelwriter_interface::TextGenerator) and read the reply
//! back with a declarative [`Grammar`] and the tolerant [`parse`] function.
//!
//! [`outline_story`] expands a finished idea document into a 24-chapter
//! outline, one act per request through an
//! [`OutlineStage`](novelwriter_interface::OutlineStage).
//!
//! # Example
//!
//! ```rust,ignore
//! use novelwriter_narrative::{
//!     MarkdownDocumentSink, PitchCritic, PitchGenerator, PitchImprover, PitchVoter,
//!     StageController, StageSet, TropeAnalyst, VibeGenerator,
//! };
//!
//! let stages = StageSet {
//!     genre: Arc::new(VibeGenerator::new(generator.clone(), config.genres.clone())),
//!     pitch: Arc::new(PitchGenerator::new(generator.clone(), 3)?),
//!     critic: Arc::new(PitchCritic::new(generator.clone())?),
//!     improver: Arc::new(PitchImprover::new(generator.clone())?),
//!     voter: Arc::new(PitchVoter::new(generator.clone())),
//!     tropes: Arc::new(TropeAnalyst::new(generator)?),
//!     sink: Arc::new(MarkdownDocumentSink::new("ideas")),
//! };
//! let mut controller = StageController::new(stages, tracing::info_span!("idea"));
//! let path = controller.run(GenreRequest::default()).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod controller;
mod grammar;
mod grammars;
mod outline;
mod parser;
mod prompts;
mod scores;
mod selection;
mod sinks;
mod stages;
mod state;

pub use controller::{StageController, StageSet};
pub use grammar::{FieldMode, FieldSpec, Grammar, heading};
pub use grammars::{
    EvaluationParser, OutlineParser, PitchParser, SelectionParser, TropeParser, VibeParser,
    clean_name,
};
pub use outline::{outline_story, parse_idea_file};
pub use parser::{FieldValue, ParsedRecord, parse, render};
pub use prompts::{
    critic_prompt, improver_prompt, outline_prompt, pitch_prompt, trope_prompt, vibe_prompt,
    voter_prompt,
};
pub use scores::{MAX_SCORE, MIN_SCORE, ScoreParser, normalize_label};
pub use selection::resolve_winner;
pub use sinks::{
    MarkdownDocumentSink, MemoryDocumentSink, default_outline_path, new_doc_id, render_document,
    render_outline, sanitize_filename, write_outline,
};
pub use stages::{
    PitchCritic, PitchGenerator, PitchImprover, PitchVoter, PlotOutliner, TropeAnalyst,
    VibeGenerator, highest_scoring,
};
pub use state::WorkflowState;
