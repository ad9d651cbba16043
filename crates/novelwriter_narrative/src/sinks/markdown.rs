//! Markdown files with YAML frontmatter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use novelwriter_core::{IdeaDocument, MISSING};
use novelwriter_error::{DocumentError, DocumentErrorKind, NovelwriterResult};
use novelwriter_interface::DocumentSink;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

const MAX_FILENAME_LEN: usize = 100;

/// Writes each idea to `<title>_<timestamp>.md` under one directory.
#[derive(Debug, Clone)]
pub struct MarkdownDocumentSink {
    output_dir: PathBuf,
}

impl MarkdownDocumentSink {
    /// Sink writing into `output_dir`, created on first write.
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// Directory documents land in.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

#[async_trait]
impl DocumentSink for MarkdownDocumentSink {
    #[instrument(skip_all, fields(title = %document.selected_pitch.title, dir = %self.output_dir.display()))]
    async fn record(&self, document: IdeaDocument) -> NovelwriterResult<String> {
        tokio::fs::create_dir_all(&self.output_dir).await.map_err(|e| {
            DocumentError::new(DocumentErrorKind::DirectoryCreation(format!(
                "{}: {}",
                self.output_dir.display(),
                e
            )))
        })?;

        let created_at = Utc::now();
        let filename = format!(
            "{}_{}.md",
            sanitize_filename(&document.selected_pitch.title),
            created_at.format("%Y%m%d-%H%M%S")
        );
        let path = self.output_dir.join(filename);
        let body = render_document(&document, &new_doc_id(), created_at);

        tokio::fs::write(&path, body).await.map_err(|e| {
            DocumentError::new(DocumentErrorKind::FileWrite(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;

        info!(path = %path.display(), "Wrote idea document");
        Ok(path.display().to_string())
    }
}

/// `idea_` plus 8 hex characters.
pub fn new_doc_id() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("idea_{}", &id[..8])
}

/// Reduce a title to a portable file stem.
///
/// Keeps ASCII letters, digits, `-`, `_` and `.`, turns spaces into
/// underscores, collapses underscore runs, caps the length and trims `._-`
/// from both ends. Falls back to `untitled`.
pub fn sanitize_filename(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    for c in title.chars() {
        let c = match c {
            ' ' => '_',
            c if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') => c,
            _ => continue,
        };
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }
    out.truncate(MAX_FILENAME_LEN);
    let trimmed = out.trim_matches(|c| matches!(c, '.' | '_' | '-'));
    if trimmed.is_empty() {
        "untitled".to_string()
    } else {
        trimmed.to_string()
    }
}

pub(crate) fn quoted(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{}\"", value.replace('"', "'")))
}

pub(crate) fn quoted_list(values: &[String]) -> String {
    let items: Vec<String> = values.iter().map(|value| quoted(value)).collect();
    format!("[{}]", items.join(", "))
}

fn section(out: &mut String, heading: &str, items: &[String]) {
    out.push_str(&format!("## {}\n\n", heading));
    if items.is_empty() {
        out.push_str("_None recorded._\n\n");
        return;
    }
    for item in items {
        out.push_str(&format!("- {}\n", item));
    }
    out.push('\n');
}

fn present(value: &str) -> &str {
    if value == MISSING { "_Not provided._" } else { value }
}

/// Render the full markdown document.
pub fn render_document(document: &IdeaDocument, doc_id: &str, created_at: DateTime<Utc>) -> String {
    let brief = &document.brief;
    let pitch = &document.selected_pitch;
    let selection = &document.selection;
    let tropes = &document.trope_analysis;

    let mut tags = vec![brief.genre().clone(), brief.subgenre().clone()];
    tags.extend(brief.themes().iter().map(|theme| format!("theme:{}", theme)));
    tags.push("AI_generated".to_string());

    let mut out = String::from("---\n");
    out.push_str("doc_type: \"idea\"\n");
    out.push_str(&format!("doc_id: {}\n", quoted(doc_id)));
    out.push_str("status: \"winner\"\n");
    out.push_str("version: \"v1\"\n");
    out.push_str(&format!("title: {}\n", quoted(&pitch.title)));
    out.push_str(&format!("tags: {}\n", quoted_list(&tags)));
    out.push_str(&format!("elevator_pitch: {}\n", quoted(&pitch.hook)));
    out.push_str(&format!("genre: {}\n", quoted(brief.genre())));
    out.push_str(&format!("subgenre: {}\n", quoted(brief.subgenre())));
    out.push_str(&format!("tone: {}\n", quoted(brief.tone())));
    out.push_str(&format!("themes: {}\n", quoted_list(brief.themes())));
    out.push_str(&format!("summary: {}\n", quoted(&pitch.premise)));
    out.push_str(&format!("created_at: {}\n", quoted(&created_at.to_rfc3339())));
    out.push_str("---\n\n");

    out.push_str(&format!("# {}\n\n", pitch.title));
    out.push_str(&format!("## Elevator Pitch\n\n{}\n\n", present(&pitch.hook)));
    out.push_str(&format!("## Premise\n\n{}\n\n", present(&pitch.premise)));
    out.push_str("## Story Components\n\n");
    out.push_str(&format!("### Main Conflict\n\n{}\n\n", present(&pitch.main_conflict)));
    out.push_str(&format!("### Unique Twist\n\n{}\n\n", present(&pitch.unique_twist)));

    section(&mut out, "Selection Criteria", &selection.selection_criteria);
    section(
        &mut out,
        "Development Recommendations",
        &selection.development_recommendations,
    );
    section(&mut out, "Potential Challenges", &selection.potential_challenges);

    out.push_str("## Trope Analysis\n\n### Identified Tropes\n\n");
    if tropes.tropes.is_empty() {
        out.push_str("_None recorded._\n\n");
    } else {
        for trope in &tropes.tropes {
            out.push_str(&format!(
                "- **{}** (overuse: {}): {}\n",
                trope.name, trope.overuse_level, trope.explanation
            ));
        }
        out.push('\n');
    }

    out.push_str("### Suggested Alternatives\n\n");
    for group in &tropes.alternatives {
        let note = if group.orphaned { " (not among identified tropes)" } else { "" };
        out.push_str(&format!("#### For {}{}\n\n", group.trope, note));
        for alternative in &group.alternatives {
            out.push_str(&format!("- **{}**: {}\n", alternative.name, alternative.description));
        }
        out.push('\n');
    }
    if tropes.alternatives.is_empty() {
        out.push_str("_None recorded._\n\n");
    }

    out.push_str("### Summary\n\n");
    if tropes.summary.is_empty() {
        out.push_str("_None recorded._\n");
    } else {
        out.push_str(&tropes.summary);
        out.push('\n');
    }
    out
}
