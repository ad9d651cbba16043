//! Story brief: the genre, tone and themes every stage works from.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Caller-supplied starting point for a run. Any part may be left open.
///
/// # Examples
///
/// ```
/// use novelwriter_core::GenreRequest;
///
/// let request = GenreRequest::default()
///     .with_tone("grim")
///     .with_themes(vec!["betrayal".to_string(), "hope".to_string()]);
/// assert_eq!(request.tone.as_deref(), Some("grim"));
/// assert!(request.genre.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenreRequest {
    /// Subgenre to look up in the catalog
    pub genre: Option<String>,
    /// Tone to use instead of generating one
    pub tone: Option<String>,
    /// Themes to use instead of generating them
    pub themes: Option<Vec<String>>,
}

impl GenreRequest {
    /// Request a specific subgenre.
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    /// Fix the tone.
    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = Some(tone.into());
        self
    }

    /// Fix the themes.
    pub fn with_themes(mut self, themes: Vec<String>) -> Self {
        self.themes = Some(themes);
        self
    }
}

/// Resolved genre, subgenre, tone and themes.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct StoryBrief {
    /// Main genre category
    genre: String,
    /// Specific subgenre
    subgenre: String,
    /// Emotional and narrative register
    tone: String,
    /// Core ideas the story explores
    themes: Vec<String>,
}

impl StoryBrief {
    /// Start building a brief.
    pub fn builder() -> StoryBriefBuilder {
        StoryBriefBuilder::default()
    }

    /// Themes joined for prompt interpolation.
    pub fn themes_line(&self) -> String {
        self.themes.join(", ")
    }
}
