//! Chapter outlines built from a finished idea.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Chapters in a complete outline.
pub const OUTLINE_CHAPTERS: usize = 24;

const CHAPTERS_PER_ACT: u32 = 6;

/// The four movements of a three-act outline, with the second act split at
/// its midpoint.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
pub enum Act {
    /// Setup and inciting incident
    #[strum(serialize = "I")]
    #[serde(rename = "I")]
    One,
    /// Rising action up to the midpoint
    #[strum(serialize = "IIa")]
    #[serde(rename = "IIa")]
    TwoA,
    /// Collapse after the midpoint
    #[strum(serialize = "IIb")]
    #[serde(rename = "IIb")]
    TwoB,
    /// Climax and resolution
    #[strum(serialize = "III")]
    #[serde(rename = "III")]
    Three,
}

impl Act {
    fn ordinal(self) -> u32 {
        match self {
            Act::One => 0,
            Act::TwoA => 1,
            Act::TwoB => 2,
            Act::Three => 3,
        }
    }

    /// Short name of the act.
    pub fn name(self) -> &'static str {
        match self {
            Act::One => "Setup",
            Act::TwoA => "Rising Action",
            Act::TwoB => "Collapse",
            Act::Three => "Resolution",
        }
    }

    /// Chapter numbers the act covers.
    ///
    /// ```
    /// use novelwriter_core::Act;
    ///
    /// assert_eq!(Act::One.chapters(), 1..=6);
    /// assert_eq!(Act::Three.chapters(), 19..=24);
    /// ```
    pub fn chapters(self) -> RangeInclusive<u32> {
        let first = self.ordinal() * CHAPTERS_PER_ACT + 1;
        first..=first + CHAPTERS_PER_ACT - 1
    }

    /// Number of chapters the act must contain.
    pub fn chapter_count(self) -> usize {
        CHAPTERS_PER_ACT as usize
    }

    /// Narrative goals the act's chapters should meet.
    pub fn goals(self) -> &'static [&'static str] {
        match self {
            Act::One => &[
                "Introduce protagonist and setting",
                "Disrupt the status quo",
                "Explore emotional resistance",
                "Attempt to fix the problem and fail",
                "Force a meaningful choice",
            ],
            Act::TwoA => &[
                "New world, allies, and skills",
                "Small victories with growing threats",
                "Growing emotional investment",
                "Rising stakes and false hope",
            ],
            Act::TwoB => &[
                "Major failures and consequences",
                "Emotional fallout and isolation",
                "Mistakes and their price",
                "Rock bottom moment",
            ],
            Act::Three => &[
                "Rebuild and recommit",
                "Face the antagonist",
                "Make a final revelation",
                "Succeed or fail with emotional closure",
            ],
        }
    }
}

/// What an outline needs from an idea document's frontmatter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeaSummary {
    /// Identifier of the source idea document, when it has one
    pub doc_id: Option<String>,
    /// Story title
    pub title: String,
    /// Genre
    pub genre: String,
    /// Narrative tone
    pub tone: String,
    /// Themes to carry through the chapters
    pub themes: Vec<String>,
    /// Premise the outline expands
    pub summary: String,
}

/// One chapter of an outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterOutline {
    /// Chapter number, starting at 1
    pub number: u32,
    /// Chapter title
    pub title: String,
    /// Act the chapter belongs to
    pub act: Act,
    /// Plot points, in order
    pub key_events: Vec<String>,
    /// How the characters change emotionally
    pub emotional_turn: String,
    /// Characters the chapter centres on
    pub character_focus: Vec<String>,
    /// One-paragraph summary
    pub summary: String,
}

/// A finished outline ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineDocument {
    /// The idea the outline expands
    pub idea: IdeaSummary,
    /// Every chapter, in reading order
    pub chapters: Vec<ChapterOutline>,
}

impl OutlineDocument {
    /// Chapters belonging to `act`.
    pub fn act_chapters(&self, act: Act) -> impl Iterator<Item = &ChapterOutline> {
        self.chapters.iter().filter(move |chapter| chapter.act == act)
    }
}
