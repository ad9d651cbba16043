//! Trope analysis records.

use serde::{Deserialize, Serialize};

/// How worn-out a trope is.
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
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum OveruseLevel {
    /// Seen everywhere
    High,
    /// Common
    Medium,
    /// Rare
    Low,
}

/// A trope spotted in the winning pitch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trope {
    /// Trope name
    pub name: String,
    /// How it shows up in the pitch
    pub explanation: String,
    /// How overused it is
    pub overuse_level: OveruseLevel,
}

/// A suggested replacement for a trope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TropeAlternative {
    /// Short name of the alternative
    pub name: String,
    /// What it would look like
    pub description: String,
}

/// Alternatives grouped under the trope they replace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternativeGroup {
    /// Trope name as written in the `### For` heading
    pub trope: String,
    /// Suggested replacements
    pub alternatives: Vec<TropeAlternative>,
    /// The trope never appeared in the identified list
    pub orphaned: bool,
}

/// Full trope analysis of one pitch.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TropeRecord {
    /// Identified tropes in listed order
    pub tropes: Vec<Trope>,
    /// Alternatives in listed order
    pub alternatives: Vec<AlternativeGroup>,
    /// Closing summary
    pub summary: String,
}

impl TropeRecord {
    /// Alternatives suggested for a trope.
    pub fn alternatives_for(&self, trope: &str) -> Option<&[TropeAlternative]> {
        self.alternatives
            .iter()
            .find(|group| group.trope == trope)
            .map(|group| group.alternatives.as_slice())
    }

    /// Trope names that received alternatives without being identified.
    pub fn orphaned(&self) -> Vec<&str> {
        self.alternatives
            .iter()
            .filter(|group| group.orphaned)
            .map(|group| group.trope.as_str())
            .collect()
    }

    /// Recompute every group's orphan flag against the identified list.
    ///
    /// Names compare case-insensitively.
    pub fn flag_orphans(&mut self) {
        let tropes = &self.tropes;
        for group in &mut self.alternatives {
            group.orphaned = !tropes
                .iter()
                .any(|trope| trope.name.eq_ignore_ascii_case(&group.trope));
        }
    }

    /// Number of tropes at a given level.
    pub fn count_at(&self, level: OveruseLevel) -> usize {
        self.tropes
            .iter()
            .filter(|trope| trope.overuse_level == level)
            .count()
    }
}
