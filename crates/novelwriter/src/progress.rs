//! Console progress for command-line runs.

use novelwriter_core::Stage;
use novelwriter_interface::StageObserver;
use std::io::Write;
use std::sync::Mutex;
use tracing::{debug, info};

/// Step labels of an idea run, in the order the controller visits them.
pub const IDEA_STEPS: [(Stage, &str); 7] = [
    (Stage::GenreSelection, "Selecting genre and tone"),
    (Stage::PitchGeneration, "Generating story pitches"),
    (Stage::CriticEvaluation, "Evaluating story pitches"),
    (Stage::PitchImprovement, "Improving promising concepts"),
    (Stage::PitchSelection, "Selecting the best pitch"),
    (Stage::TropeAnalysis, "Analyzing story tropes"),
    (Stage::Documentation, "Compiling final document"),
];

/// One-based position and label of a stage among [`IDEA_STEPS`].
pub fn idea_step(stage: Stage) -> Option<(usize, &'static str)> {
    IDEA_STEPS
        .iter()
        .position(|(step, _)| *step == stage)
        .map(|index| (index + 1, IDEA_STEPS[index].1))
}

/// Prints `[n/total] label...` lines as a run advances.
///
/// Status lines are written whether or not console logging is enabled, and
/// mirrored to the log at info level.
///
/// # Examples
///
/// ```
/// use novelwriter::{ProgressReporter, Stage, StageObserver};
///
/// let reporter = ProgressReporter::new(Vec::new());
/// reporter.on_stage_started(Stage::PitchGeneration);
/// let printed = String::from_utf8(reporter.into_inner()).unwrap();
/// assert_eq!(printed, "[2/7] Generating story pitches...\n");
/// ```
#[derive(Debug)]
pub struct ProgressReporter<W> {
    out: Mutex<W>,
}

impl ProgressReporter<std::io::Stdout> {
    /// Reporter printing to standard output.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> ProgressReporter<W> {
    /// Reporter writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Announce step `index` of `total`.
    pub fn step(&self, index: usize, total: usize, label: &str) {
        info!(step = index, total, "{}", label);
        self.print(&format!("[{}/{}] {}...", index, total, label));
    }

    /// Print a free-form status line.
    pub fn status(&self, message: &str) {
        info!("{}", message);
        self.print(message);
    }

    /// The writer, once the run is over.
    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn print(&self, line: &str) {
        let Ok(mut out) = self.out.lock() else {
            return;
        };
        if let Err(e) = writeln!(out, "{}", line).and_then(|_| out.flush()) {
            debug!(error = %e, "Could not print progress");
        }
    }
}

impl<W: Write + Send> StageObserver for ProgressReporter<W> {
    fn on_stage_started(&self, stage: Stage) {
        if let Some((index, label)) = idea_step(stage) {
            self.step(index, IDEA_STEPS.len(), label);
        }
    }

    fn on_stage_failed(&self, stage: Stage, message: &str) {
        let label = idea_step(stage).map_or_else(|| stage.to_string(), |(_, label)| label.to_string());
        self.status(&format!("Error: {} failed: {}", label, message));
    }
}
