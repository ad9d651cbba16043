//! Stage lifecycle hooks.

use novelwriter_core::Stage;

/// Receives stage lifecycle events from the controller.
///
/// Every method defaults to doing nothing, so implementors override only what
/// they care about.
///
/// # Examples
///
/// ```
/// use novelwriter_core::Stage;
/// use novelwriter_interface::StageObserver;
/// use std::sync::Mutex;
///
/// #[derive(Default)]
/// struct Recorder(Mutex<Vec<Stage>>);
///
/// impl StageObserver for Recorder {
///     fn on_stage_completed(&self, stage: Stage) {
///         if let Ok(mut seen) = self.0.lock() {
///             seen.push(stage);
///         }
///     }
/// }
///
/// let recorder = Recorder::default();
/// recorder.on_stage_started(Stage::GenreSelection);
/// recorder.on_stage_completed(Stage::GenreSelection);
/// assert_eq!(recorder.0.lock().unwrap().len(), 1);
/// ```
pub trait StageObserver: Send + Sync {
    /// A stage handler is about to run.
    fn on_stage_started(&self, _stage: Stage) {}

    /// A stage handler finished and the state advanced.
    fn on_stage_completed(&self, _stage: Stage) {}

    /// A stage handler failed; the run is now in `Stage::Error`.
    fn on_stage_failed(&self, _stage: Stage, _message: &str) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl StageObserver for NoopObserver {}
