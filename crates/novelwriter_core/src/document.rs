//! The finished artifact handed to a document sink.

use crate::{PitchRecord, SelectionRecord, StoryBrief, TropeRecord};
use serde::{Deserialize, Serialize};

/// Everything a sink needs to write up the winning idea.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdeaDocument {
    /// Genre, tone and themes of the run
    pub brief: StoryBrief,
    /// The winning pitch
    pub selected_pitch: PitchRecord,
    /// Why it won
    pub selection: SelectionRecord,
    /// Tropes in the winner
    pub trope_analysis: TropeRecord,
}
