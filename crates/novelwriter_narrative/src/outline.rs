//! Turning a finished idea document into a 24-chapter outline.

use novelwriter_core::{Act, IdeaSummary, OUTLINE_CHAPTERS, OutlineDocument};
use novelwriter_error::{
    DocumentError, DocumentErrorKind, NovelwriterError, NovelwriterResult, ParseError,
    ParseErrorKind,
};
use novelwriter_interface::OutlineStage;
use serde::Deserialize;
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Deserialize)]
struct IdeaFrontmatter {
    doc_type: Option<String>,
    doc_id: Option<String>,
    title: Option<String>,
    genre: Option<String>,
    tone: Option<String>,
    themes: Option<Vec<String>>,
    summary: Option<String>,
}

fn invalid(reason: impl Into<String>) -> NovelwriterError {
    DocumentError::new(DocumentErrorKind::InvalidIdea(reason.into())).into()
}

fn frontmatter(content: &str) -> Option<&str> {
    let rest = content.trim_start_matches('\u{feff}').strip_prefix("---")?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;
    if rest.starts_with("---") {
        return Some("");
    }
    rest.find("\n---").map(|end| &rest[..end])
}

fn required(value: Option<String>, name: &'static str, missing: &mut Vec<&'static str>) -> String {
    match value.map(|value| value.trim().to_string()) {
        Some(value) if !value.is_empty() => value,
        _ => {
            missing.push(name);
            String::new()
        }
    }
}

/// Read the frontmatter of an idea document.
///
/// Needs `title`, `genre`, `tone`, `themes` and `summary`. A `doc_type`, when
/// present, must be `idea`.
///
/// # Errors
///
/// Returns [`DocumentErrorKind::InvalidIdea`] when the frontmatter is absent,
/// is not YAML, names another document type or lacks a required field.
///
/// # Examples
///
/// ```
/// use novelwriter_narrative::parse_idea_file;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let idea = parse_idea_file(
///     "---\ndoc_type: idea\ntitle: Salt\ngenre: Fantasy\ntone: grim\nthemes: [loss, hope]\nsummary: A tide that lies.\n---\n# Salt\n",
/// )?;
/// assert_eq!(idea.title, "Salt");
/// assert_eq!(idea.themes, ["loss", "hope"]);
/// # Ok(())
/// # }
/// ```
pub fn parse_idea_file(content: &str) -> NovelwriterResult<IdeaSummary> {
    let block = frontmatter(content).ok_or_else(|| invalid("no frontmatter block"))?;
    let meta: IdeaFrontmatter = serde_yaml::from_str(block)
        .map_err(|e| invalid(format!("frontmatter is not valid YAML: {}", e)))?;

    if let Some(doc_type) = meta.doc_type.as_deref()
        && doc_type != "idea"
    {
        return Err(invalid(format!(
            "Invalid doc_type '{}', expected 'idea'",
            doc_type
        )));
    }

    let mut missing = Vec::new();
    let title = required(meta.title, "title", &mut missing);
    let genre = required(meta.genre, "genre", &mut missing);
    let tone = required(meta.tone, "tone", &mut missing);
    let themes: Vec<String> = meta
        .themes
        .unwrap_or_default()
        .into_iter()
        .map(|theme| theme.trim().to_string())
        .filter(|theme| !theme.is_empty())
        .collect();
    if themes.is_empty() {
        missing.push("themes");
    }
    let summary = required(meta.summary, "summary", &mut missing);
    if !missing.is_empty() {
        return Err(invalid(format!(
            "Missing required metadata fields: {}",
            missing.join(", ")
        )));
    }

    debug!(title = %title, genre = %genre, themes = themes.len(), "Parsed idea file");
    Ok(IdeaSummary {
        doc_id: meta.doc_id,
        title,
        genre,
        tone,
        themes,
        summary,
    })
}

/// Outline every act in order.
///
/// Each act must yield exactly its chapter count; chapters are renumbered to
/// the act's range so the outline always runs 1 to 24.
///
/// # Errors
///
/// Propagates the first stage failure, or [`ParseErrorKind::ChapterCount`]
/// when an act comes back short or long.
#[instrument(skip_all, fields(title = %idea.title))]
pub async fn outline_story(
    stage: &dyn OutlineStage,
    idea: IdeaSummary,
) -> NovelwriterResult<OutlineDocument> {
    let mut chapters = Vec::with_capacity(OUTLINE_CHAPTERS);
    for act in Act::iter() {
        info!(act = %act, name = act.name(), "Generating chapters for act");
        let mut drafted = stage.outline_act(&idea, act).await?;
        if drafted.len() != act.chapter_count() {
            warn!(
                act = %act,
                expected = act.chapter_count(),
                found = drafted.len(),
                "Act has the wrong number of chapters"
            );
            return Err(ParseError::new(ParseErrorKind::ChapterCount {
                act: act.to_string(),
                expected: act.chapter_count(),
                found: drafted.len(),
            })
            .into());
        }
        for (chapter, number) in drafted.iter_mut().zip(act.chapters()) {
            if chapter.number != number {
                debug!(found = chapter.number, number, "Renumbering chapter");
                chapter.number = number;
            }
        }
        chapters.extend(drafted);
    }
    info!(chapters = chapters.len(), "Outline complete");
    Ok(OutlineDocument { idea, chapters })
}
