//! Reply grammars for each workflow stage, mapped onto typed records.

use crate::{FieldSpec, Grammar, ParsedRecord, ScoreParser, parse};
use novelwriter_core::{
    Act, AlternativeGroup, ChapterOutline, EvaluationRecord, MAX_MISSING_PITCH_FIELDS, MISSING,
    OveruseLevel, PitchField, PitchRecord, SelectionRecord, Trope, TropeAlternative, TropeRecord,
};
use novelwriter_error::{NovelwriterResult, ParseError, ParseErrorKind};
use regex::Regex;
use std::str::FromStr;
use strum::IntoEnumIterator;
use tracing::{debug, warn};

const PITCH_SEPARATOR: &str = r"(?i)^#{1,2}\s*pitch\s*#?\d+\b";
const IMPROVED_SEPARATOR: &str = r"(?i)^#{1,2}\s*improved\s+pitch\b";
const TROPE_LINE: &str = r"^\d+\.\s+(.+?):\s+(.+?)\s*\|\s*Overuse Level:\s*(\w+)";
const ALTERNATIVE_HEADING: &str = r"(?i)^#{3,}\s*For\s+(.+)$";
const ALTERNATIVE_ITEM: &str = r"^-\s*([^:]+):\s*(.+)$";
const CHAPTER_HEADING: &str = r"(?i)^#{1,3}\s*chapter\s+(\d+)\s*(?:[:.\-]\s*(.*))?$";
const INLINE_LABEL: &str = r"^\*\*([^*]+?):?\*\*:?\s*(.*)$";
const REQUIRED_CHAPTER_FIELDS: [&str; 3] = ["emotional_turn", "character_focus", "summary"];

fn compile(pattern: &str) -> NovelwriterResult<Regex> {
    Regex::new(pattern).map_err(|e| {
        ParseError::new(ParseErrorKind::InvalidPattern(format!("{}: {}", pattern, e))).into()
    })
}

fn pitch_grammar(name: &str, separator: &str) -> NovelwriterResult<Grammar> {
    let grammar = PitchField::iter().fold(
        Grammar::new(name).with_separator(separator)?,
        |grammar, field| grammar.field(FieldSpec::scalar(field.key(), field.to_string())),
    );
    Ok(grammar.reject_at_missing(MAX_MISSING_PITCH_FIELDS))
}

fn to_pitch(record: &ParsedRecord) -> PitchRecord {
    let mut pitch = PitchRecord::missing();
    for field in PitchField::iter() {
        pitch.set(field, record.text(field.key()));
    }
    pitch
}

/// Strip emphasis, brackets and quotes models like to wrap names in.
pub fn clean_name(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c: char| matches!(c, '*' | '"' | '\'' | '[' | ']' | '`'))
        .trim()
        .to_string()
}

/// Parses `# Pitch N` blocks into pitch records.
#[derive(Debug, Clone)]
pub struct PitchParser {
    grammar: Grammar,
}

impl PitchParser {
    /// Grammar for freshly generated pitches.
    pub fn new() -> NovelwriterResult<Self> {
        Ok(Self {
            grammar: pitch_grammar("pitch", PITCH_SEPARATOR)?,
        })
    }

    /// Grammar for a single `# Improved Pitch` block.
    pub fn improved() -> NovelwriterResult<Self> {
        Ok(Self {
            grammar: pitch_grammar("improved_pitch", IMPROVED_SEPARATOR)?,
        })
    }

    /// Usable pitch records in reply order.
    pub fn parse(&self, raw: &str) -> Vec<PitchRecord> {
        parse(raw, &self.grammar).iter().map(to_pitch).collect()
    }

    /// First usable pitch record, if any.
    pub fn parse_one(&self, raw: &str) -> Option<PitchRecord> {
        parse(raw, &self.grammar).first().map(to_pitch)
    }
}

/// Parses a critic reply into an evaluation record.
#[derive(Debug, Clone)]
pub struct EvaluationParser {
    grammar: Grammar,
    scores: ScoreParser,
}

impl EvaluationParser {
    /// Build the evaluation grammar.
    pub fn new() -> NovelwriterResult<Self> {
        let grammar = Grammar::new("evaluation")
            .field(FieldSpec::lines("scores", "Scores"))
            .field(FieldSpec::list("key_strengths", "Key Strengths"))
            .field(FieldSpec::list("areas_for_improvement", "Areas for Improvement"));
        Ok(Self {
            grammar,
            scores: ScoreParser::new()?,
        })
    }

    /// The evaluation, or `None` when the reply has no recognisable section.
    ///
    /// A reply with sections but no score lines becomes unscored.
    pub fn parse(&self, raw: &str) -> Option<EvaluationRecord> {
        let Some(record) = parse(raw, &self.grammar).into_iter().next() else {
            warn!("Evaluation reply had no recognisable sections");
            return None;
        };
        let (scores, overall) = self
            .scores
            .parse(record.items("scores").iter().map(String::as_str));
        Some(EvaluationRecord::new(
            scores,
            overall,
            record.items("key_strengths").to_vec(),
            record.items("areas_for_improvement").to_vec(),
        ))
    }
}

/// Parses a voter reply into a selection record.
///
/// The winner is the first line under `## Winner`; models tend to follow the
/// title with a line of rationale, which is ignored rather than joined or
/// allowed to replace the title. An absent winner is left empty for the
/// caller to resolve.
#[derive(Debug, Clone)]
pub struct SelectionParser {
    grammar: Grammar,
}

impl SelectionParser {
    /// Build the selection grammar.
    pub fn new() -> Self {
        let grammar = Grammar::new("selection")
            .field(FieldSpec::lines("winner", "Winner"))
            .field(FieldSpec::list("selection_criteria", "Selection Criteria"))
            .field(FieldSpec::list(
                "development_recommendations",
                "Development Recommendations",
            ))
            .field(FieldSpec::list("potential_challenges", "Potential Challenges"));
        Self { grammar }
    }

    /// Parse the reply, or `None` when it has no recognisable section.
    ///
    /// Missing sections become empty values.
    pub fn parse(&self, raw: &str) -> Option<SelectionRecord> {
        let Some(record) = parse(raw, &self.grammar).into_iter().next() else {
            warn!("Selection reply had no recognisable sections");
            return None;
        };
        let winner = record
            .items("winner")
            .first()
            .map(|line| clean_name(line.trim_start_matches('-')))
            .unwrap_or_default();
        Some(SelectionRecord {
            winner,
            selection_criteria: record.items("selection_criteria").to_vec(),
            development_recommendations: record.items("development_recommendations").to_vec(),
            potential_challenges: record.items("potential_challenges").to_vec(),
            fallback: None,
        })
    }
}

impl Default for SelectionParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses the tone and themes reply of the genre stage.
#[derive(Debug, Clone)]
pub struct VibeParser {
    grammar: Grammar,
}

impl VibeParser {
    /// Build the tone and themes grammar.
    pub fn new() -> Self {
        let grammar = Grammar::new("vibe")
            .field(FieldSpec::scalar("tone", "Tone"))
            .field(FieldSpec::list("themes", "Themes"));
        Self { grammar }
    }

    /// Tone, if stated, and the theme list.
    pub fn parse(&self, raw: &str) -> (Option<String>, Vec<String>) {
        let Some(record) = parse(raw, &self.grammar).into_iter().next() else {
            return (None, Vec::new());
        };
        let tone = match record.text("tone") {
            MISSING => None,
            tone => Some(tone.to_string()),
        };
        (tone, record.items("themes").to_vec())
    }
}

impl Default for VibeParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses a trope analysis reply.
#[derive(Debug, Clone)]
pub struct TropeParser {
    grammar: Grammar,
    trope_line: Regex,
    alternative_heading: Regex,
    alternative_item: Regex,
}

impl TropeParser {
    /// Build the trope grammar and line patterns.
    pub fn new() -> NovelwriterResult<Self> {
        let grammar = Grammar::new("tropes")
            .field(FieldSpec::lines("identified", "Identified Tropes"))
            .field(FieldSpec::lines("alternatives", "Suggested Alternatives"))
            .field(FieldSpec::scalar("summary", "Summary"));
        Ok(Self {
            grammar,
            trope_line: compile(TROPE_LINE)?,
            alternative_heading: compile(ALTERNATIVE_HEADING)?,
            alternative_item: compile(ALTERNATIVE_ITEM)?,
        })
    }

    /// Parse the reply, flagging alternatives for tropes never identified.
    ///
    /// `None` when the reply has no recognisable section.
    pub fn parse(&self, raw: &str) -> Option<TropeRecord> {
        let Some(record) = parse(raw, &self.grammar).into_iter().next() else {
            warn!("Trope reply had no recognisable sections");
            return None;
        };

        let mut analysis = TropeRecord {
            tropes: self.tropes(record.items("identified")),
            alternatives: self.alternatives(record.items("alternatives")),
            summary: match record.text("summary") {
                MISSING => String::new(),
                summary => summary.to_string(),
            },
        };
        analysis.flag_orphans();

        let orphaned = analysis.orphaned();
        if !orphaned.is_empty() {
            warn!(?orphaned, "Alternatives reference tropes that were not identified");
        }
        Some(analysis)
    }

    fn tropes(&self, lines: &[String]) -> Vec<Trope> {
        let mut tropes = Vec::new();
        for line in lines {
            let Some(caps) = self.trope_line.captures(line) else {
                debug!(line = %line, "Skipping non-trope line");
                continue;
            };
            let level = &caps[3];
            let Ok(overuse_level) = OveruseLevel::from_str(level) else {
                warn!(line = %line, level, "Unknown overuse level, skipping trope");
                continue;
            };
            tropes.push(Trope {
                name: clean_name(&caps[1]),
                explanation: caps[2].trim().to_string(),
                overuse_level,
            });
        }
        tropes
    }

    fn alternatives(&self, lines: &[String]) -> Vec<AlternativeGroup> {
        let mut groups: Vec<AlternativeGroup> = Vec::new();
        for line in lines {
            if let Some(caps) = self.alternative_heading.captures(line) {
                groups.push(AlternativeGroup {
                    trope: clean_name(&caps[1]),
                    alternatives: Vec::new(),
                    orphaned: false,
                });
                continue;
            }
            let Some(caps) = self.alternative_item.captures(line) else {
                continue;
            };
            let Some(group) = groups.last_mut() else {
                debug!(line = %line, "Alternative outside any trope group");
                continue;
            };
            group.alternatives.push(TropeAlternative {
                name: clean_name(&caps[1]),
                description: caps[2].trim().to_string(),
            });
        }
        groups
    }
}

/// Parses `## Chapter N: Title` blocks into chapter outlines.
///
/// Bold labels such as `**Emotional Turn:** ...` count as section headings,
/// so a value may share the label's line or follow it. Chapters without an
/// emotional turn, character focus or summary are dropped. The act comes
/// from the caller, not from the reply's `**Act:**` line.
#[derive(Debug, Clone)]
pub struct OutlineParser {
    grammar: Grammar,
    chapter_heading: Regex,
    inline_label: Regex,
}

struct ChapterBlock {
    number: u32,
    title: String,
    body: String,
}

impl OutlineParser {
    /// Build the chapter grammar and line patterns.
    pub fn new() -> NovelwriterResult<Self> {
        let grammar = Grammar::new("chapter")
            .field(FieldSpec::list("key_events", "Key Events"))
            .field(FieldSpec::scalar("emotional_turn", "Emotional Turn"))
            .field(FieldSpec::scalar("character_focus", "Character Focus"))
            .field(FieldSpec::scalar("summary", "Summary"));
        Ok(Self {
            grammar,
            chapter_heading: compile(CHAPTER_HEADING)?,
            inline_label: compile(INLINE_LABEL)?,
        })
    }

    /// Complete chapters in reply order, all assigned to `act`.
    pub fn parse(&self, raw: &str, act: Act) -> Vec<ChapterOutline> {
        let mut blocks = Vec::new();
        let mut open: Option<ChapterBlock> = None;

        for line in raw.lines().map(str::trim) {
            if let Some(caps) = self.chapter_heading.captures(line) {
                blocks.extend(open.take());
                let Ok(number) = caps[1].parse::<u32>() else {
                    debug!(line = %line, "Chapter number out of range");
                    continue;
                };
                let title = caps
                    .get(2)
                    .map(|title| clean_name(title.as_str()))
                    .filter(|title| !title.is_empty())
                    .unwrap_or_else(|| format!("Chapter {}", number));
                open = Some(ChapterBlock {
                    number,
                    title,
                    body: String::new(),
                });
                continue;
            }
            if line == "---" {
                continue;
            }
            if let Some(block) = open.as_mut() {
                block.body.push_str(&self.as_heading(line));
                block.body.push('\n');
            }
        }
        blocks.extend(open);

        blocks
            .into_iter()
            .filter_map(|block| self.chapter(block, act))
            .collect()
    }

    fn as_heading(&self, line: &str) -> String {
        let Some(caps) = self.inline_label.captures(line) else {
            return line.to_string();
        };
        let label = caps[1].trim();
        match caps[2].trim() {
            "" => format!("## {}", label),
            value => format!("## {}\n{}", label, value),
        }
    }

    fn chapter(&self, block: ChapterBlock, act: Act) -> Option<ChapterOutline> {
        let Some(record) = parse(&block.body, &self.grammar).into_iter().next() else {
            warn!(chapter = block.number, "Chapter had no recognisable sections");
            return None;
        };
        if let Some(field) = REQUIRED_CHAPTER_FIELDS
            .iter()
            .find(|field| record.is_missing(field))
        {
            warn!(chapter = block.number, field, "Dropping incomplete chapter");
            return None;
        }
        Some(ChapterOutline {
            number: block.number,
            title: block.title,
            act,
            key_events: record.items("key_events").to_vec(),
            emotional_turn: record.text("emotional_turn").to_string(),
            character_focus: record
                .text("character_focus")
                .split(',')
                .map(clean_name)
                .filter(|name| !name.is_empty())
                .collect(),
            summary: record.text("summary").to_string(),
        })
    }
}
