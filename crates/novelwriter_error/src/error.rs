//! Top-level error wrapper types.

use crate::{
    BuilderError, ConfigError, CredentialError, DocumentError, HttpError, ParseError,
    ProviderError, StageError, WorkflowError,
};

/// Every error condition a novelwriter crate can surface.
///
/// # Examples
///
/// ```
/// use novelwriter_error::{NovelwriterError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: NovelwriterError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum NovelwriterErrorKind {
    /// HTTP transport error
    #[from(HttpError)]
    Http(HttpError),
    /// Provider returned an error or unusable body
    #[from(ProviderError)]
    Provider(ProviderError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Credential pool error
    #[from(CredentialError)]
    Credential(CredentialError),
    /// Response parsing error
    #[from(ParseError)]
    Parse(ParseError),
    /// Workflow error
    #[from(WorkflowError)]
    Workflow(WorkflowError),
    /// A stage failed, wrapping the underlying error
    #[from(StageError)]
    Stage(StageError),
    /// Document sink error
    #[from(DocumentError)]
    Document(DocumentError),
}

/// Novelwriter error with kind discrimination.
///
/// # Examples
///
/// ```
/// use novelwriter_error::{ConfigError, NovelwriterResult};
///
/// fn might_fail() -> NovelwriterResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Novelwriter Error: {}", _0)]
pub struct NovelwriterError(Box<NovelwriterErrorKind>);

impl NovelwriterError {
    /// Create a new error from a kind.
    pub fn new(kind: NovelwriterErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &NovelwriterErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to NovelwriterErrorKind
impl<T> From<T> for NovelwriterError
where
    T: Into<NovelwriterErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for novelwriter operations.
///
/// # Examples
///
/// ```
/// use novelwriter_error::{NovelwriterResult, HttpError};
///
/// fn fetch_data() -> NovelwriterResult<String> {
///     Err(HttpError::new("404 Not Found"))?
/// }
/// ```
pub type NovelwriterResult<T> = std::result::Result<T, NovelwriterError>;
