//! Story pitch records.

use serde::{Deserialize, Serialize};

/// Placeholder stored in any field the model failed to produce.
///
/// Downstream prompts interpolate every field by name, so a missing field is
/// never absent, only sentinel-valued.
pub const MISSING: &str = "[Missing]";

/// Number of sentinel fields at which a pitch is no longer usable.
pub const MAX_MISSING_PITCH_FIELDS: usize = 4;

/// The five named fields of a pitch, in heading order.
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
    strum::IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
pub enum PitchField {
    /// Working title
    #[strum(to_string = "Title")]
    Title,
    /// One-line hook
    #[strum(to_string = "Hook")]
    Hook,
    /// Premise paragraph
    #[strum(to_string = "Premise")]
    Premise,
    /// Central conflict
    #[strum(to_string = "Main Conflict")]
    MainConflict,
    /// What sets the story apart
    #[strum(to_string = "Unique Twist")]
    UniqueTwist,
}

impl PitchField {
    /// Snake-case key used in parsed records and prompt templates.
    pub fn key(self) -> &'static str {
        match self {
            PitchField::Title => "title",
            PitchField::Hook => "hook",
            PitchField::Premise => "premise",
            PitchField::MainConflict => "main_conflict",
            PitchField::UniqueTwist => "unique_twist",
        }
    }
}

/// A story pitch with every field present, extracted or sentinel-valued.
///
/// # Examples
///
/// ```
/// use novelwriter_core::{PitchRecord, PitchField, MISSING};
///
/// let mut pitch = PitchRecord::missing();
/// pitch.set(PitchField::Title, "Salt and Iron");
/// assert_eq!(pitch.field(PitchField::Title), "Salt and Iron");
/// assert_eq!(pitch.unique_twist, MISSING);
/// assert_eq!(pitch.missing_count(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchRecord {
    /// Working title
    pub title: String,
    /// One-line hook
    pub hook: String,
    /// Premise paragraph
    pub premise: String,
    /// Central conflict
    pub main_conflict: String,
    /// What sets the story apart
    pub unique_twist: String,
}

impl PitchRecord {
    /// A record whose every field holds the sentinel.
    pub fn missing() -> Self {
        Self {
            title: MISSING.to_string(),
            hook: MISSING.to_string(),
            premise: MISSING.to_string(),
            main_conflict: MISSING.to_string(),
            unique_twist: MISSING.to_string(),
        }
    }

    /// Read a field by name.
    pub fn field(&self, field: PitchField) -> &str {
        match field {
            PitchField::Title => &self.title,
            PitchField::Hook => &self.hook,
            PitchField::Premise => &self.premise,
            PitchField::MainConflict => &self.main_conflict,
            PitchField::UniqueTwist => &self.unique_twist,
        }
    }

    /// Overwrite a field by name.
    pub fn set(&mut self, field: PitchField, value: impl Into<String>) {
        let slot = match field {
            PitchField::Title => &mut self.title,
            PitchField::Hook => &mut self.hook,
            PitchField::Premise => &mut self.premise,
            PitchField::MainConflict => &mut self.main_conflict,
            PitchField::UniqueTwist => &mut self.unique_twist,
        };
        *slot = value.into();
    }

    /// Names of the fields still holding the sentinel.
    pub fn missing_fields(&self) -> Vec<PitchField> {
        use strum::IntoEnumIterator;
        PitchField::iter()
            .filter(|field| self.field(*field) == MISSING)
            .collect()
    }

    /// How many fields hold the sentinel.
    pub fn missing_count(&self) -> usize {
        self.missing_fields().len()
    }

    /// Whether the record carries enough content to be a pitch.
    pub fn is_usable(&self) -> bool {
        self.missing_count() < MAX_MISSING_PITCH_FIELDS
    }

    /// Render the pitch as a markdown block under the given separator heading.
    ///
    /// The output uses the same heading conventions the pitch grammar parses.
    pub fn to_markdown(&self, separator: &str) -> String {
        use strum::IntoEnumIterator;
        let mut out = format!("# {}\n", separator);
        for field in PitchField::iter() {
            out.push_str(&format!("## {}\n{}\n", field, self.field(field)));
        }
        out
    }
}
