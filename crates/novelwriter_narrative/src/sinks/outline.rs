//! Outline documents as markdown.

use super::markdown::{quoted, quoted_list, sanitize_filename};
use chrono::{DateTime, Utc};
use novelwriter_core::{Act, OutlineDocument};
use novelwriter_error::{DocumentError, DocumentErrorKind, NovelwriterResult};
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;
use tracing::{info, instrument};

/// `<root>/<title>/<title>-outline_<timestamp>.md`.
pub fn default_outline_path(root: &Path, title: &str, at: DateTime<Utc>) -> PathBuf {
    let stem = sanitize_filename(title);
    root.join(&stem).join(format!(
        "{}-outline_{}.md",
        stem,
        at.format("%Y%m%d-%H%M%S")
    ))
}

/// Render an outline with frontmatter, grouped by act.
pub fn render_outline(outline: &OutlineDocument, created_at: DateTime<Utc>) -> String {
    let idea = &outline.idea;

    let mut out = String::from("---\n");
    out.push_str("doc_type: \"outline\"\n");
    if let Some(doc_id) = &idea.doc_id {
        out.push_str(&format!("idea_id: {}\n", quoted(doc_id)));
    }
    out.push_str(&format!("title: {}\n", quoted(&idea.title)));
    out.push_str(&format!("genre: {}\n", quoted(&idea.genre)));
    out.push_str(&format!("tone: {}\n", quoted(&idea.tone)));
    out.push_str(&format!("themes: {}\n", quoted_list(&idea.themes)));
    out.push_str(&format!("chapter_count: {}\n", outline.chapters.len()));
    out.push_str(&format!("created_at: {}\n", quoted(&created_at.to_rfc3339())));
    out.push_str("---\n\n");

    out.push_str(&format!("# {}: Outline\n\n", idea.title));
    out.push_str(&format!("## Story Summary\n\n{}\n\n", idea.summary));
    out.push_str("## Chapter Outlines\n\n");

    for act in Act::iter() {
        out.push_str(&format!("### Act {}: {}\n\n", act, act.name()));
        for chapter in outline.act_chapters(act) {
            out.push_str(&format!("#### Chapter {}: {}\n\n", chapter.number, chapter.title));
            out.push_str(&format!("**Act:** {}\n\n", chapter.act));
            out.push_str("**Key Events:**\n");
            for event in &chapter.key_events {
                out.push_str(&format!("- {}\n", event));
            }
            out.push('\n');
            out.push_str(&format!("**Emotional Turn:** {}\n\n", chapter.emotional_turn));
            out.push_str(&format!(
                "**Character Focus:** {}\n\n",
                chapter.character_focus.join(", ")
            ));
            out.push_str(&format!("**Summary:** {}\n\n---\n\n", chapter.summary));
        }
    }
    out
}

/// Write the outline to `path`, creating parent directories.
#[instrument(skip_all, fields(title = %outline.idea.title, path = %path.display()))]
pub async fn write_outline(path: &Path, outline: &OutlineDocument) -> NovelwriterResult<PathBuf> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            DocumentError::new(DocumentErrorKind::DirectoryCreation(format!(
                "{}: {}",
                parent.display(),
                e
            )))
        })?;
    }

    tokio::fs::write(path, render_outline(outline, Utc::now()))
        .await
        .map_err(|e| {
            DocumentError::new(DocumentErrorKind::FileWrite(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;

    info!(chapters = outline.chapters.len(), "Wrote outline");
    Ok(path.to_path_buf())
}
