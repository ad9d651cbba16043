//! Genre, tone and themes.

use crate::{VibeParser, vibe_prompt};
use async_trait::async_trait;
use novelwriter_core::{GenreRequest, StoryBrief};
use novelwriter_error::{
    BuilderError, BuilderErrorKind, NovelwriterResult, WorkflowError, WorkflowErrorKind,
};
use novelwriter_interface::{GenreStage, TextGenerator};
use novelwriter_rate_limit::GenreEntry;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, instrument, warn};

/// Picks a subgenre from the catalog and asks the model for whatever of tone
/// and themes the request left open.
pub struct VibeGenerator {
    generator: Arc<dyn TextGenerator>,
    catalog: Vec<GenreEntry>,
    rng: Mutex<StdRng>,
    parser: VibeParser,
}

impl VibeGenerator {
    /// Generator with an entropy-seeded picker.
    pub fn new(generator: Arc<dyn TextGenerator>, catalog: Vec<GenreEntry>) -> Self {
        Self::with_rng(generator, catalog, StdRng::from_entropy())
    }

    /// Generator with a fixed seed, for reproducible picks.
    pub fn with_seed(generator: Arc<dyn TextGenerator>, catalog: Vec<GenreEntry>, seed: u64) -> Self {
        Self::with_rng(generator, catalog, StdRng::seed_from_u64(seed))
    }

    fn with_rng(generator: Arc<dyn TextGenerator>, catalog: Vec<GenreEntry>, rng: StdRng) -> Self {
        Self {
            generator,
            catalog,
            rng: Mutex::new(rng),
            parser: VibeParser::new(),
        }
    }

    /// Resolve `(genre, subgenre)` for a requested name.
    ///
    /// A subgenre match wins, then a main genre match with a random subgenre
    /// under it. Anything else is a random pick from the whole catalog.
    pub fn resolve_genre(&self, requested: Option<&str>) -> NovelwriterResult<(String, String)> {
        let pairs: Vec<(&str, &str)> = self
            .catalog
            .iter()
            .flat_map(|entry| {
                let subgenres: Vec<&str> = if entry.subgenres.is_empty() {
                    vec![entry.name.as_str()]
                } else {
                    entry.subgenres.iter().map(String::as_str).collect()
                };
                subgenres
                    .into_iter()
                    .map(move |subgenre| (entry.name.as_str(), subgenre))
            })
            .collect();

        if pairs.is_empty() {
            return Err(WorkflowError::new(WorkflowErrorKind::EmptyGenreCatalog).into());
        }

        if let Some(requested) = requested {
            if let Some((genre, subgenre)) = pairs
                .iter()
                .find(|(_, subgenre)| subgenre.eq_ignore_ascii_case(requested))
            {
                return Ok((genre.to_string(), subgenre.to_string()));
            }

            let under_genre: Vec<_> = pairs
                .iter()
                .filter(|(genre, _)| genre.eq_ignore_ascii_case(requested))
                .collect();
            if let Some((genre, subgenre)) = self.pick(&under_genre) {
                return Ok((genre.to_string(), subgenre.to_string()));
            }

            warn!(requested, "Requested genre not in catalog, choosing at random");
        }

        let all: Vec<_> = pairs.iter().collect();
        self.pick(&all)
            .map(|(genre, subgenre)| (genre.to_string(), subgenre.to_string()))
            .ok_or_else(|| WorkflowError::new(WorkflowErrorKind::EmptyGenreCatalog).into())
    }

    fn pick<'a, T>(&self, items: &'a [&'a T]) -> Option<&'a T> {
        let mut rng = match self.rng.lock() {
            Ok(rng) => rng,
            Err(poisoned) => poisoned.into_inner(),
        };
        items.choose(&mut *rng).copied()
    }
}

fn supplied_tone(request: &GenreRequest) -> Option<String> {
    request
        .tone
        .as_deref()
        .map(str::trim)
        .filter(|tone| !tone.is_empty())
        .map(str::to_string)
}

fn supplied_themes(request: &GenreRequest) -> Option<Vec<String>> {
    let themes: Vec<String> = request
        .themes
        .iter()
        .flatten()
        .map(|theme| theme.trim())
        .filter(|theme| !theme.is_empty())
        .map(str::to_string)
        .collect();
    (!themes.is_empty()).then_some(themes)
}

#[async_trait]
impl GenreStage for VibeGenerator {
    #[instrument(skip(self, request), fields(requested = ?request.genre))]
    async fn determine(&self, request: &GenreRequest) -> NovelwriterResult<StoryBrief> {
        let (genre, subgenre) = self.resolve_genre(request.genre.as_deref())?;
        info!(genre = %genre, subgenre = %subgenre, "Selected genre");

        let mut tone = supplied_tone(request);
        let mut themes = supplied_themes(request);

        if tone.is_none() || themes.is_none() {
            debug!(
                need_tone = tone.is_none(),
                need_themes = themes.is_none(),
                "Generating tone and themes"
            );
            let reply = self.generator.complete(&vibe_prompt(&genre, &subgenre)).await?;
            let (generated_tone, generated_themes) = self.parser.parse(&reply);
            tone = tone.or(generated_tone);
            if themes.is_none() && !generated_themes.is_empty() {
                themes = Some(generated_themes);
            }
        }

        if tone.is_none() && themes.is_none() {
            return Err(WorkflowError::new(WorkflowErrorKind::MissingToneAndThemes).into());
        }

        StoryBrief::builder()
            .genre(genre)
            .subgenre(subgenre)
            .tone(tone.unwrap_or_default())
            .themes(themes.unwrap_or_default())
            .build()
            .map_err(|e| BuilderError::new(BuilderErrorKind::ValidationFailed(e.to_string())).into())
    }
}
