//! Model-backed implementations of each stage trait.

mod critic;
mod genre;
mod improver;
mod outliner;
mod pitch;
mod tropes;
mod voter;

pub use critic::PitchCritic;
pub use genre::VibeGenerator;
pub use improver::PitchImprover;
pub use outliner::PlotOutliner;
pub use pitch::PitchGenerator;
pub use tropes::TropeAnalyst;
pub use voter::{PitchVoter, highest_scoring};
