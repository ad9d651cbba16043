//! Stage failures.

use crate::NovelwriterError;

/// A workflow stage failed. The collaborator's error is kept as the source,
/// so callers can still match on what went wrong underneath.
///
/// # Examples
///
/// ```
/// use novelwriter_error::{NovelwriterErrorKind, ProviderError, ProviderErrorKind, StageError};
///
/// let cause = ProviderError::new(ProviderErrorKind::RateLimit("free tier".to_string()));
/// let err = StageError::new("PITCH_GENERATION", cause.into());
/// assert_eq!(err.stage, "PITCH_GENERATION");
/// assert!(matches!(err.source.kind(), NovelwriterErrorKind::Provider(_)));
/// assert!(format!("{}", err).starts_with("Stage PITCH_GENERATION failed"));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Stage {} failed: {} at line {} in {}", stage, source, line, file)]
pub struct StageError {
    /// Stage that failed
    pub stage: String,
    /// The collaborator's error
    pub source: NovelwriterError,
    /// Line number where the error was wrapped
    pub line: u32,
    /// Source file where the error was wrapped
    pub file: &'static str,
}

impl StageError {
    /// Wrap a collaborator error with the failing stage.
    #[track_caller]
    pub fn new(stage: impl Into<String>, source: NovelwriterError) -> Self {
        let location = std::panic::Location::caller();
        Self {
            stage: stage.into(),
            source,
            line: location.line(),
            file: location.file(),
        }
    }
}
