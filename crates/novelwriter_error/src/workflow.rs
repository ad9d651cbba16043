//! Workflow (stage controller) errors.

/// Specific error conditions for workflow runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum WorkflowErrorKind {
    /// A stage ran before the story brief was resolved
    #[display("Story brief not resolved before stage {}", _0)]
    MissingBrief(String),
    /// Attempted to run a workflow that already finished
    #[display("Workflow is terminal at stage {}", _0)]
    TerminalState(String),
    /// A stage handler was invoked out of order
    #[display("Stage {} cannot run from stage {}", requested, current)]
    OutOfOrder {
        /// Stage the caller asked for
        requested: String,
        /// Stage the workflow is in
        current: String,
    },
    /// Genre stage resolved neither a tone nor any themes
    #[display("Genre stage produced neither a tone nor themes")]
    MissingToneAndThemes,
    /// A stage needed candidate pitches but had none
    #[display("No candidate pitches available for {}", _0)]
    NoCandidates(String),
    /// Critic returned a different number of evaluations than pitches
    #[display("Expected {} evaluations, got {}", expected, actual)]
    EvaluationMismatch {
        /// Number of pitches evaluated
        expected: usize,
        /// Number of evaluations received
        actual: usize,
    },
    /// Genre catalog has no entries to choose from
    #[display("Genre catalog is empty")]
    EmptyGenreCatalog,
}

/// Error type for workflow operations.
///
/// # Examples
///
/// ```
/// use novelwriter_error::{WorkflowError, WorkflowErrorKind};
///
/// let err = WorkflowError::new(WorkflowErrorKind::MissingToneAndThemes);
/// assert!(format!("{}", err).contains("tone"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Workflow Error: {} at line {} in {}", kind, line, file)]
pub struct WorkflowError {
    /// The specific error condition
    pub kind: WorkflowErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl WorkflowError {
    /// Create a new WorkflowError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: WorkflowErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
