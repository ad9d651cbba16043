//! Trait definitions for the novelwriter idea generator.
//!
//! Generation backends implement [`NovelwriterDriver`]; the rotation layer on
//! top of a driver implements [`TextGenerator`]. Each workflow stage is its own
//! trait so the controller can run against real or fake collaborators.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod observer;
mod stages;
mod traits;

pub use observer::{NoopObserver, StageObserver};
pub use stages::{
    CriticStage, DocumentSink, GenreStage, ImproverStage, OutlineStage, PitchStage, TropeStage,
    VoterStage,
};
pub use traits::{NovelwriterDriver, TextGenerator};
