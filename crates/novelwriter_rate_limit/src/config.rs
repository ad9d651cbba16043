//! Layered configuration for the generator.
//!
//! Sources, later ones overriding earlier:
//! - Bundled defaults (include_str! from novelwriter.toml)
//! - ~/.config/novelwriter/novelwriter.toml
//! - ./novelwriter.toml

use crate::{CredentialPools, DEFAULT_MAX_ATTEMPTS, Tier};
use config::{Config, File, FileFormat};
use novelwriter_error::{ConfigError, NovelwriterError, NovelwriterResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../novelwriter.toml");

/// Generation service settings.
///
/// # Example
///
/// ```toml
/// [provider]
/// base_url = "https://openrouter.ai/api/v1"
/// primary_model = "google/gemma-3-27b-it:free"
/// secondary_model = "google/gemma-3-27b-it"
/// max_attempts = 3
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProviderSettings {
    /// Chat-completions endpoint root
    pub base_url: String,
    /// Model used with free-tier credentials
    pub primary_model: String,
    /// Model used with paid credentials
    pub secondary_model: String,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Completion length cap
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Attempts per request before giving up
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Environment variable holding free-tier keys
    pub primary_key_env: String,
    /// Environment variable holding paid keys
    pub secondary_key_env: String,
    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_timeout_secs() -> u64 {
    120
}

impl ProviderSettings {
    /// Model to request for a credential tier.
    pub fn model_for(&self, tier: Tier) -> &str {
        match tier {
            Tier::Primary => &self.primary_model,
            Tier::Secondary => &self.secondary_model,
        }
    }
}

/// Workflow run settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WorkflowSettings {
    /// Pitches requested from the model
    #[serde(default = "default_pitch_count")]
    pub pitch_count: u32,
    /// Where idea documents are written
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_pitch_count() -> u32 {
    3
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("ideas")
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            pitch_count: default_pitch_count(),
            output_dir: default_output_dir(),
        }
    }
}

/// A main genre and its subgenres.
///
/// ```toml
/// [[genres]]
/// name = "Fantasy"
/// subgenres = ["Epic Fantasy", "Urban Fantasy"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GenreEntry {
    /// Main genre
    pub name: String,
    /// Subgenres under it
    #[serde(default)]
    pub subgenres: Vec<String>,
}

/// Top-level configuration.
///
/// # Example
///
/// ```no_run
/// use novelwriter_rate_limit::NovelwriterConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = NovelwriterConfig::load()?;
/// println!("Primary model: {}", config.provider.primary_model);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NovelwriterConfig {
    /// Generation service settings
    pub provider: ProviderSettings,
    /// Workflow settings
    #[serde(default)]
    pub workflow: WorkflowSettings,
    /// Genre catalog
    #[serde(default)]
    pub genres: Vec<GenreEntry>,
}

impl NovelwriterConfig {
    /// Load configuration from a single file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> NovelwriterResult<Self> {
        debug!("Loading configuration from file");

        let config: Self = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                NovelwriterError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                NovelwriterError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and skipped when absent.
    #[instrument]
    pub fn load() -> NovelwriterResult<Self> {
        Self::load_with_override(None::<&Path>)
    }

    /// Like [`load`](Self::load), with an extra file applied last.
    ///
    /// The override file, when given, must exist.
    #[instrument(skip(path))]
    pub fn load_with_override(path: Option<impl AsRef<Path>>) -> NovelwriterResult<Self> {
        debug!("Loading configuration with precedence: override > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/novelwriter/novelwriter.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("novelwriter").required(false));

        if let Some(path) = path {
            debug!(path = %path.as_ref().display(), "Adding override configuration");
            builder = builder.add_source(File::from(path.as_ref()));
        }

        let config: Self = builder
            .build()
            .map_err(|e| {
                NovelwriterError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                NovelwriterError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings no run could succeed with.
    pub fn validate(&self) -> NovelwriterResult<()> {
        if self.provider.max_attempts == 0 {
            return Err(ConfigError::new("provider.max_attempts must be at least 1").into());
        }
        if self.workflow.pitch_count == 0 {
            return Err(ConfigError::new("workflow.pitch_count must be at least 1").into());
        }
        if self.provider.base_url.trim().is_empty() {
            return Err(ConfigError::new("provider.base_url must not be empty").into());
        }
        Ok(())
    }

    /// Read credential pools from the configured environment variables.
    pub fn credential_pools(&self) -> CredentialPools {
        CredentialPools::from_env(
            &self.provider.primary_key_env,
            &self.provider.secondary_key_env,
        )
    }

    /// Subgenres of a main genre, matched case-insensitively.
    pub fn subgenres_of(&self, genre: &str) -> Option<&[String]> {
        self.genres
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(genre))
            .map(|entry| entry.subgenres.as_slice())
    }
}
