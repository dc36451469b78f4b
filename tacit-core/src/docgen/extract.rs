//! Response extraction helpers
//!
//! Stage responses carry XML-style named blocks and, for the renderer,
//! literal markdown headings. Extraction is first-match delimiter
//! search, not a full parser.

/// Content of the first `<tag>...</tag>` block, trimmed
pub(crate) fn tagged_block<'a>(text: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let start = text.find(&open)? + open.len();
    let end = text[start..].find(&close)? + start;
    Some(text[start..end].trim())
}

/// Text between `heading` (a full `# ...` line) and the next top-level
/// heading or end of text, trimmed. `None` when the heading is absent.
pub(crate) fn markdown_section<'a>(text: &'a str, heading: &str) -> Option<&'a str> {
    let mut search = 0;
    let body_start = loop {
        let pos = text[search..].find(heading)? + search;
        let at_line_start = pos == 0 || text[..pos].ends_with('\n');
        let line_end = text[pos..].find('\n').map(|i| pos + i).unwrap_or(text.len());
        if at_line_start && text[pos..line_end].trim_end() == heading {
            break line_end;
        }
        search = pos + heading.len();
    };

    let rest = &text[body_start..];
    let body_end = rest.find("\n# ").map(|i| body_start + i).unwrap_or(text.len());
    Some(text[body_start..body_end].trim())
}
