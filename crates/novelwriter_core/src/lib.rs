//! Core data types for the novelwriter idea generator.
//!
//! Request and response types for the generation service, the typed records
//! each workflow stage produces, and the chapter outline built from a
//! finished idea.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod brief;
mod document;
mod evaluation;
mod message;
mod outline;
mod output;
mod pitch;
mod request;
mod role;
mod selection;
mod stage;
mod trope;

pub use brief::{GenreRequest, StoryBrief, StoryBriefBuilder};
pub use document::IdeaDocument;
pub use evaluation::{EvaluationRecord, IMPROVEMENT_THRESHOLD, OverallSource, Scores};
pub use message::Message;
pub use outline::{Act, ChapterOutline, IdeaSummary, OUTLINE_CHAPTERS, OutlineDocument};
pub use output::Output;
pub use pitch::{MAX_MISSING_PITCH_FIELDS, MISSING, PitchField, PitchRecord};
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse};
pub use role::Role;
pub use selection::{SelectionRecord, WinnerFallback};
pub use stage::Stage;
pub use trope::{AlternativeGroup, OveruseLevel, Trope, TropeAlternative, TropeRecord};
