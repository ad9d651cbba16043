//! Credential pool errors.

/// Credential pool error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum CredentialErrorKind {
    /// Neither pool holds a credential
    #[display("No API credentials configured: {}", _0)]
    NoCredentials(String),
    /// The shared manager lock was poisoned by a panicking holder
    #[display("Credential manager lock poisoned")]
    LockPoisoned,
    /// Retry loop configured with zero attempts
    #[display("Retry attempts must be at least 1")]
    ZeroAttempts,
}

/// Credential error with location tracking.
///
/// # Examples
///
/// ```
/// use novelwriter_error::{CredentialError, CredentialErrorKind};
///
/// let err = CredentialError::new(CredentialErrorKind::LockPoisoned);
/// assert!(format!("{}", err).contains("poisoned"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Credential Error: {} at line {} in {}", kind, line, file)]
pub struct CredentialError {
    /// The specific error condition
    pub kind: CredentialErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl CredentialError {
    /// Create a new CredentialError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: CredentialErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
