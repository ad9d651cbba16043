//! Reply cleanup before parsing.

/// Strip code fences and a leading `markdown` tag from a model reply.
///
/// Models often wrap markdown answers in a fenced block even when asked not
/// to. The inner text is returned trimmed.
///
/// # Examples
///
/// ```
/// use novelwriter_models::clean_response;
///
/// assert_eq!(clean_response("```markdown\n# Pitch 1\n```"), "# Pitch 1");
/// assert_eq!(clean_response("  plain text  "), "plain text");
/// ```
pub fn clean_response(raw: &str) -> String {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```") {
        text = rest;
        if let Some(rest) = text.strip_suffix("```") {
            text = rest;
        }
    }

    let trimmed = text.trim_start();
    if let Some(rest) = strip_prefix_ignore_case(trimmed, "markdown") {
        text = rest;
    }

    text.trim().to_string()
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&text[prefix.len()..])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_fence() {
        assert_eq!(clean_response("```\n## Tone\nBleak\n```\n"), "## Tone\nBleak");
    }

    #[test]
    fn test_markdown_tag_without_fence() {
        assert_eq!(clean_response("Markdown\n# Pitch 1"), "# Pitch 1");
    }

    #[test]
    fn test_unterminated_fence() {
        assert_eq!(clean_response("```markdown\n# Pitch 1"), "# Pitch 1");
    }

    #[test]
    fn test_plain_reply_untouched() {
        assert_eq!(clean_response("# Pitch 1\n## Title\nA"), "# Pitch 1\n## Title\nA");
    }
}
