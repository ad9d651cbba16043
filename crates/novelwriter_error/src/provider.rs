//! Generation provider errors.

/// Provider-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ProviderErrorKind {
    /// Non-success HTTP status returned by the provider
    #[display("API error {}: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Error body or reason
        message: String,
    },
    /// Provider refused the request because of rate limiting
    #[display("Rate limit exceeded: {}", _0)]
    RateLimit(String),
    /// Response body could not be decoded
    #[display("Failed to parse response: {}", _0)]
    ResponseParsing(String),
    /// Response decoded but carried no text
    #[display("Provider returned no text output")]
    EmptyResponse,
}

impl ProviderErrorKind {
    /// Whether the HTTP status signals an overloaded or throttled provider.
    pub fn is_throttled_status(status: u16) -> bool {
        matches!(status, 429 | 503)
    }

    /// Whether the provider refused for load or quota rather than the request.
    ///
    /// # Examples
    ///
    /// ```
    /// use novelwriter_error::ProviderErrorKind;
    ///
    /// let overloaded = ProviderErrorKind::Api { status: 503, message: "Service Unavailable".into() };
    /// assert!(overloaded.is_throttled());
    /// assert!(!ProviderErrorKind::EmptyResponse.is_throttled());
    /// ```
    pub fn is_throttled(&self) -> bool {
        match self {
            Self::RateLimit(_) => true,
            Self::Api { status, .. } => Self::is_throttled_status(*status),
            Self::ResponseParsing(_) | Self::EmptyResponse => false,
        }
    }
}

/// Provider error with location tracking.
///
/// # Examples
///
/// ```
/// use novelwriter_error::{ProviderError, ProviderErrorKind};
///
/// let err = ProviderError::new(ProviderErrorKind::RateLimit("free tier".to_string()));
/// assert!(format!("{}", err).to_lowercase().contains("rate limit"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Provider Error: {} at line {} in {}", kind, line, file)]
pub struct ProviderError {
    /// The kind of error that occurred
    pub kind: ProviderErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ProviderError {
    /// Create a new ProviderError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ProviderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
