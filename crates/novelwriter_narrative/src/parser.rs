//! Tolerant record extraction driven by a [`Grammar`].
//!
//! Replies are split into non-empty trimmed lines. A separator line closes the
//! current record and opens a new one. A field heading selects the field that
//! following lines feed, resetting anything collected for it earlier, so a
//! repeated heading keeps only its last occurrence. Any other level-one or
//! level-two heading stops collection until the next known heading. Fields
//! never seen are filled with the [`MISSING`] sentinel.

use crate::{FieldMode, Grammar, heading};
use novelwriter_core::MISSING;
use tracing::{debug, warn};

/// Extracted value of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Scalar text, or the sentinel when missing
    Text(String),
    /// List items or raw lines, empty when missing
    Items(Vec<String>),
}

/// One record pulled from a reply. Every declared field is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRecord {
    values: Vec<(String, FieldValue)>,
    missing: Vec<String>,
}

impl ParsedRecord {
    /// Scalar text of a field, the sentinel if missing or not scalar.
    pub fn text(&self, key: &str) -> &str {
        match self.value(key) {
            Some(FieldValue::Text(text)) => text,
            _ => MISSING,
        }
    }

    /// Items of a list or lines field, empty if missing or not a list.
    pub fn items(&self, key: &str) -> &[String] {
        match self.value(key) {
            Some(FieldValue::Items(items)) => items,
            _ => &[],
        }
    }

    /// Raw value of a field.
    pub fn value(&self, key: &str) -> Option<&FieldValue> {
        self.values
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// Whether a field was absent or empty in the reply.
    pub fn is_missing(&self, key: &str) -> bool {
        self.missing.iter().any(|name| name == key)
    }

    /// Keys of the missing fields, in declaration order.
    pub fn missing_fields(&self) -> &[String] {
        &self.missing
    }

    /// Number of missing fields.
    pub fn missing_count(&self) -> usize {
        self.missing.len()
    }
}

struct Draft {
    collected: Vec<Vec<String>>,
}

impl Draft {
    fn new(fields: usize) -> Self {
        Self {
            collected: vec![Vec::new(); fields],
        }
    }

    fn reset(&mut self, index: usize) {
        self.collected[index].clear();
    }

    fn push(&mut self, index: usize, mode: FieldMode, line: &str) {
        match mode {
            FieldMode::Scalar | FieldMode::Lines => self.collected[index].push(line.to_string()),
            FieldMode::List => {
                if let Some(item) = line.strip_prefix('-') {
                    let item = item.trim();
                    if !item.is_empty() {
                        self.collected[index].push(item.to_string());
                    }
                }
            }
        }
    }

    fn finish(self, grammar: &Grammar) -> ParsedRecord {
        let mut values = Vec::with_capacity(grammar.fields().len());
        let mut missing = Vec::new();
        for (spec, lines) in grammar.fields().iter().zip(self.collected) {
            let key = spec.key().clone();
            if lines.is_empty() {
                missing.push(key.clone());
            }
            let value = match spec.mode() {
                FieldMode::Scalar if lines.is_empty() => FieldValue::Text(MISSING.to_string()),
                FieldMode::Scalar => FieldValue::Text(lines.join(" ")),
                FieldMode::List | FieldMode::Lines => FieldValue::Items(lines),
            };
            values.push((key, value));
        }
        ParsedRecord { values, missing }
    }
}

/// Parse a reply into records.
///
/// Returns an empty list when no separator or field heading appears. Records
/// failing the grammar's validity rule are dropped with a single warning.
///
/// # Examples
///
/// ```
/// use novelwriter_narrative::{FieldSpec, Grammar, parse};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let grammar = Grammar::new("pitch")
///     .with_separator(r"^#\s*Pitch\s+\d+")?
///     .field(FieldSpec::scalar("title", "Title"))
///     .field(FieldSpec::scalar("hook", "Hook"));
///
/// let reply = "# Pitch 1\n## Title\nSalt\n## Hook\nA tide\nthat lies\n# Pitch 2\n## Title\nIron";
/// let records = parse(reply, &grammar);
///
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[0].text("hook"), "A tide that lies");
/// assert_eq!(records[1].text("hook"), "[Missing]");
/// # Ok(())
/// # }
/// ```
pub fn parse(raw: &str, grammar: &Grammar) -> Vec<ParsedRecord> {
    let field_count = grammar.fields().len();
    let mut records = Vec::new();
    let mut draft: Option<Draft> = None;
    let mut current: Option<usize> = None;

    for line in raw.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if grammar.is_separator(line) {
            if let Some(finished) = draft.take() {
                records.push(finished.finish(grammar));
            }
            draft = Some(Draft::new(field_count));
            current = None;
            continue;
        }

        if let Some(index) = grammar.field_index(line) {
            draft
                .get_or_insert_with(|| Draft::new(field_count))
                .reset(index);
            current = Some(index);
            continue;
        }

        if let Some((level, _)) = heading(line)
            && level <= 2
        {
            current = None;
            continue;
        }

        if let (Some(open), Some(index)) = (draft.as_mut(), current) {
            open.push(index, *grammar.fields()[index].mode(), line);
        }
    }

    if let Some(finished) = draft.take() {
        records.push(finished.finish(grammar));
    }

    if records.is_empty() {
        debug!(grammar = %grammar.name(), "No headings found in reply");
        return records;
    }

    let Some(max_missing) = *grammar.max_missing() else {
        return records;
    };
    let total = records.len();
    records.retain(|record| record.missing_count() < max_missing);
    let dropped = total - records.len();
    if dropped > 0 {
        warn!(
            grammar = %grammar.name(),
            dropped,
            kept = records.len(),
            max_missing,
            "Dropped records with too many missing fields"
        );
    }
    records
}

/// Render a record back into the markdown shape `grammar` parses.
///
/// Missing fields are written with the sentinel so the output parses back to
/// the same record.
pub fn render(record: &ParsedRecord, grammar: &Grammar, separator: Option<&str>) -> String {
    let mut out = String::new();
    if let Some(separator) = separator {
        out.push_str(separator);
        out.push('\n');
    }
    for spec in grammar.fields() {
        if record.is_missing(spec.key()) {
            continue;
        }
        out.push_str(&format!("## {}\n", spec.heading()));
        match record.value(spec.key()) {
            Some(FieldValue::Text(text)) => {
                out.push_str(text);
                out.push('\n');
            }
            Some(FieldValue::Items(items)) => {
                for item in items {
                    match spec.mode() {
                        FieldMode::List => out.push_str(&format!("- {}\n", item)),
                        _ => {
                            out.push_str(item);
                            out.push('\n');
                        }
                    }
                }
            }
            None => {}
        }
    }
    out
}
