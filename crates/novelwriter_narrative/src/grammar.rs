//! Declarative section grammars for markdown-shaped model replies.

use derive_getters::Getters;
use novelwriter_error::{NovelwriterResult, ParseError, ParseErrorKind};
use regex::Regex;

/// How the lines under a field heading are collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum FieldMode {
    /// Every line, joined with single spaces
    Scalar,
    /// Only lines starting with `-`, one item each, marker stripped
    List,
    /// Every line kept verbatim, for callers that parse further
    Lines,
}

/// One field a grammar extracts.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct FieldSpec {
    /// Key the value is stored under
    key: String,
    /// Heading text that introduces the field, matched case-insensitively
    heading: String,
    /// Collection mode
    mode: FieldMode,
}

impl FieldSpec {
    /// A space-joined text field.
    pub fn scalar(key: impl Into<String>, heading: impl Into<String>) -> Self {
        Self::new(key, heading, FieldMode::Scalar)
    }

    /// A bulleted list field.
    pub fn list(key: impl Into<String>, heading: impl Into<String>) -> Self {
        Self::new(key, heading, FieldMode::List)
    }

    /// A raw-lines field.
    pub fn lines(key: impl Into<String>, heading: impl Into<String>) -> Self {
        Self::new(key, heading, FieldMode::Lines)
    }

    fn new(key: impl Into<String>, heading: impl Into<String>, mode: FieldMode) -> Self {
        Self {
            key: key.into(),
            heading: heading.into(),
            mode,
        }
    }
}

/// Record separator, field headings and validity rule for one reply shape.
///
/// Without a separator the whole reply is a single record, started by the
/// first recognised field heading.
///
/// # Examples
///
/// ```
/// use novelwriter_narrative::{FieldSpec, Grammar, parse};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let grammar = Grammar::new("vibe")
///     .field(FieldSpec::scalar("tone", "Tone"))
///     .field(FieldSpec::list("themes", "Themes"));
///
/// let records = parse("## Tone\nBleak\n## Themes\n- loss\n- hope", &grammar);
/// assert_eq!(records[0].text("tone"), "Bleak");
/// assert_eq!(records[0].items("themes"), ["loss", "hope"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Getters)]
pub struct Grammar {
    /// Name used in diagnostics
    name: String,
    /// Record-separator heading pattern
    separator: Option<Regex>,
    /// Declared fields in heading order
    fields: Vec<FieldSpec>,
    /// Records with at least this many missing fields are dropped
    max_missing: Option<usize>,
}

impl Grammar {
    /// An empty single-record grammar.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            separator: None,
            fields: Vec::new(),
            max_missing: None,
        }
    }

    /// Split records on lines matching `pattern`.
    ///
    /// # Errors
    ///
    /// Fails when the pattern is not a valid regular expression.
    pub fn with_separator(mut self, pattern: &str) -> NovelwriterResult<Self> {
        let regex = Regex::new(pattern).map_err(|e| {
            ParseError::new(ParseErrorKind::InvalidPattern(format!("{}: {}", pattern, e)))
        })?;
        self.separator = Some(regex);
        Ok(self)
    }

    /// Declare a field.
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    /// Drop records once `count` or more fields are missing.
    pub fn reject_at_missing(mut self, count: usize) -> Self {
        self.max_missing = Some(count);
        self
    }

    /// Whether a trimmed line starts a new record.
    pub fn is_separator(&self, line: &str) -> bool {
        self.separator
            .as_ref()
            .is_some_and(|separator| separator.is_match(line))
    }

    /// Index of the field a heading line introduces.
    pub fn field_index(&self, line: &str) -> Option<usize> {
        let (_, text) = heading(line)?;
        self.fields
            .iter()
            .position(|spec| spec.heading.eq_ignore_ascii_case(text))
    }
}

/// Split a markdown heading into its level and cleaned text.
///
/// Trailing colons and emphasis markers are ignored, so `## **Hook:**` reads
/// as level 2 with text `Hook`.
pub fn heading(line: &str) -> Option<(usize, &str)> {
    let level = line.chars().take_while(|c| *c == '#').count();
    if level == 0 {
        return None;
    }
    let text = line[level..]
        .trim()
        .trim_matches('*')
        .trim()
        .trim_end_matches(':')
        .trim();
    Some((level, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_strips_decoration() {
        assert_eq!(heading("## **Main Conflict:**"), Some((2, "Main Conflict")));
        assert_eq!(heading("### For The Chosen One"), Some((3, "For The Chosen One")));
        assert_eq!(heading("- item"), None);
    }

    #[test]
    fn test_field_match_ignores_case() {
        let grammar = Grammar::new("t").field(FieldSpec::scalar("hook", "Hook"));
        assert_eq!(grammar.field_index("## HOOK"), Some(0));
        assert_eq!(grammar.field_index("## Hooks"), None);
    }

    #[test]
    fn test_invalid_separator_is_error() {
        assert!(Grammar::new("t").with_separator("(").is_err());
    }
}
