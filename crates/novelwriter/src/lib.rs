//! novelwriter: story ideas from a language model, one workflow run at a time.
//!
//! A run resolves a genre, tone and themes, drafts several pitches, has each
//! one critiqued, reworks the weak ones, picks a winner, analyzes its tropes
//! and writes the result as a markdown document. An idea document can then
//! be expanded into a 24-chapter outline.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use novelwriter::{GenreRequest, NovelwriterConfig, idea_controller};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = NovelwriterConfig::load()?;
//!     let mut controller = idea_controller(&config, tracing::info_span!("idea"))?;
//!     let path = controller.run(GenreRequest::default().with_genre("Horror")).await?;
//!     println!("{}", path);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `novelwriter_error` - Error types
//! - `novelwriter_core` - Records and request types
//! - `novelwriter_interface` - Driver, generator and stage traits
//! - `novelwriter_rate_limit` - Credential rotation and configuration
//! - `novelwriter_models` - OpenRouter client and rotating generator
//! - `novelwriter_narrative` - Parsers, stages, controller and sinks
//!
//! This crate re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assembly;
mod logging;
mod progress;

pub use assembly::{
    genre_request, idea_controller, model_stages, openrouter_generator, plot_outliner,
    split_themes,
};
pub use logging::{LogLevel, LogOptions, init_logging, open_log_file};
pub use progress::{IDEA_STEPS, ProgressReporter, idea_step};

pub use novelwriter_core::*;
pub use novelwriter_error::*;
pub use novelwriter_interface::*;
pub use novelwriter_models::{OpenRouterClient, RotatingGenerator, clean_response};
pub use novelwriter_narrative::{
    MarkdownDocumentSink, MemoryDocumentSink, PitchCritic, PitchGenerator, PitchImprover,
    PitchVoter, PlotOutliner, StageController, StageSet, TropeAnalyst, VibeGenerator,
    WorkflowState, default_outline_path, outline_story, parse_idea_file, render_outline,
    write_outline,
};
pub use novelwriter_rate_limit::{
    ApiKey, CredentialManager, CredentialPools, GenreEntry, NovelwriterConfig, ProviderSettings,
    Tier, WorkflowSettings,
};
