//! Idea command handler.

use super::IdeaArgs;
use novelwriter::{
    NovelwriterConfig, NovelwriterResult, ProgressReporter, genre_request, idea_controller,
};
use std::sync::Arc;

/// Run one idea workflow and return the document path.
pub async fn run_idea(args: IdeaArgs) -> NovelwriterResult<String> {
    let mut config = NovelwriterConfig::load_with_override(args.config.as_deref())?;
    if let Some(output_dir) = args.output_dir {
        config.workflow.output_dir = output_dir;
    }

    let request = genre_request(args.genre, args.tone, args.themes);
    tracing::info!(
        genre = ?request.genre,
        tone = ?request.tone,
        themes = ?request.themes,
        output_dir = %config.workflow.output_dir.display(),
        "Starting idea run"
    );

    let mut controller = idea_controller(&config, tracing::info_span!("idea"))?
        .with_observer(Arc::new(ProgressReporter::stdout()));
    controller.run(request).await
}
