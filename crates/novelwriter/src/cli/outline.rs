//! Outline command handler.

use super::OutlineArgs;
use chrono::Utc;
use novelwriter::{
    DocumentError, DocumentErrorKind, NovelwriterConfig, NovelwriterResult, ProgressReporter,
    default_outline_path, outline_story, parse_idea_file, plot_outliner, write_outline,
};
use std::path::{Path, PathBuf};

const OUTLINE_ROOT: &str = "outlines";
const OUTLINE_STEPS: usize = 2;

/// Outline the idea at `args.idea_path` and return where the outline went.
pub async fn run_outline(args: OutlineArgs) -> NovelwriterResult<PathBuf> {
    let config = NovelwriterConfig::load_with_override(args.config.as_deref())?;
    let progress = ProgressReporter::stdout();

    progress.step(1, OUTLINE_STEPS, "Parsing idea file");
    let content = tokio::fs::read_to_string(&args.idea_path)
        .await
        .map_err(|e| {
            DocumentError::new(DocumentErrorKind::FileRead(format!(
                "{}: {}",
                args.idea_path.display(),
                e
            )))
        })?;
    let idea = parse_idea_file(&content)?;
    progress.status(&format!("Using story: {}", idea.title));

    let path = args
        .output
        .unwrap_or_else(|| default_outline_path(Path::new(OUTLINE_ROOT), &idea.title, Utc::now()));
    tracing::info!(
        idea = %args.idea_path.display(),
        output = %path.display(),
        "Starting outline run"
    );

    progress.step(2, OUTLINE_STEPS, "Generating chapter outlines");
    let outliner = plot_outliner(&config)?;
    let outline = outline_story(&outliner, idea).await?;
    let path = write_outline(&path, &outline).await?;
    progress.status(&format!(
        "Generated complete {}-chapter outline",
        outline.chapters.len()
    ));
    Ok(path)
}
