//! Response parsing errors.

/// Conditions where a reply could not be turned into usable records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ParseErrorKind {
    /// No section heading was found anywhere in the reply
    #[display("No usable records in {} response", stage)]
    NoRecords {
        /// Stage whose reply was unusable
        stage: String,
    },
    /// A field required downstream never resolved
    #[display("Required field '{}' missing from response", field)]
    MissingField {
        /// Name of the missing field
        field: String,
    },
    /// An act came back with the wrong number of chapters
    #[display("Act {} has {} chapters, expected {}", act, found, expected)]
    ChapterCount {
        /// Act label
        act: String,
        /// Chapters the act must have
        expected: usize,
        /// Chapters the reply yielded
        found: usize,
    },
    /// Grammar declared with an invalid pattern
    #[display("Invalid grammar pattern: {}", _0)]
    InvalidPattern(String),
}

/// Parse error with location tracking.
///
/// # Examples
///
/// ```
/// use novelwriter_error::{ParseError, ParseErrorKind};
///
/// let err = ParseError::new(ParseErrorKind::NoRecords { stage: "pitch".to_string() });
/// assert!(format!("{}", err).contains("pitch"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Parse Error: {} at line {} in {}", kind, line, file)]
pub struct ParseError {
    /// The specific error condition
    pub kind: ParseErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ParseError {
    /// Create a new ParseError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ParseErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
