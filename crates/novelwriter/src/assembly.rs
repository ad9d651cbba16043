//! Wiring configuration, credentials and stages into a runnable controller.

use novelwriter_core::GenreRequest;
use novelwriter_error::NovelwriterResult;
use novelwriter_interface::{DocumentSink, TextGenerator};
use novelwriter_models::{OpenRouterClient, RotatingGenerator};
use novelwriter_narrative::{
    MarkdownDocumentSink, PitchCritic, PitchGenerator, PitchImprover, PitchVoter, PlotOutliner,
    StageController, StageSet, TropeAnalyst, VibeGenerator,
};
use novelwriter_rate_limit::{CredentialManager, NovelwriterConfig};
use std::sync::Arc;
use tracing::{Span, info};

/// OpenRouter-backed generator with credentials read from the environment.
///
/// # Errors
///
/// Fails when neither credential variable holds a key, or the HTTP client
/// cannot be built.
pub fn openrouter_generator(config: &NovelwriterConfig) -> NovelwriterResult<Arc<dyn TextGenerator>> {
    let pools = config.credential_pools();
    let manager = CredentialManager::new(pools)?;
    let client = OpenRouterClient::new(&config.provider)?;
    info!(
        primary_model = %config.provider.primary_model,
        secondary_model = %config.provider.secondary_model,
        "Configured OpenRouter generator"
    );
    Ok(Arc::new(RotatingGenerator::new(
        client,
        manager,
        config.provider.clone(),
    )))
}

/// Model-backed stages sharing one generator.
pub fn model_stages(
    generator: Arc<dyn TextGenerator>,
    config: &NovelwriterConfig,
    sink: Arc<dyn DocumentSink>,
) -> NovelwriterResult<StageSet> {
    Ok(StageSet {
        genre: Arc::new(VibeGenerator::new(generator.clone(), config.genres.clone())),
        pitch: Arc::new(PitchGenerator::new(
            generator.clone(),
            config.workflow.pitch_count as usize,
        )?),
        critic: Arc::new(PitchCritic::new(generator.clone())?),
        improver: Arc::new(PitchImprover::new(generator.clone())?),
        voter: Arc::new(PitchVoter::new(generator.clone())),
        tropes: Arc::new(TropeAnalyst::new(generator)?),
        sink,
    })
}

/// Controller writing markdown into the configured output directory.
pub fn idea_controller(config: &NovelwriterConfig, span: Span) -> NovelwriterResult<StageController> {
    let generator = openrouter_generator(config)?;
    let sink = Arc::new(MarkdownDocumentSink::new(&config.workflow.output_dir));
    let stages = model_stages(generator, config, sink)?;
    Ok(StageController::new(stages, span))
}

/// Outliner sharing the OpenRouter generator setup of an idea run.
pub fn plot_outliner(config: &NovelwriterConfig) -> NovelwriterResult<PlotOutliner> {
    PlotOutliner::new(openrouter_generator(config)?)
}

/// Split a comma-separated theme list, dropping blanks.
pub fn split_themes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|theme| !theme.is_empty())
        .map(str::to_string)
        .collect()
}

/// Request from optional command-line values.
pub fn genre_request(
    genre: Option<String>,
    tone: Option<String>,
    themes: Option<String>,
) -> GenreRequest {
    GenreRequest {
        genre,
        tone,
        themes: themes
            .as_deref()
            .map(split_themes)
            .filter(|themes| !themes.is_empty()),
    }
}
