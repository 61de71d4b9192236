//! Markdown structure: headings for tables of contents and plain text for
//! the search index. Parsing uses `pulldown-cmark` with the GitHub-flavoured
//! extensions the site renders.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// A heading found in a markdown document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// 1 for `#` through 6 for `######`.
    pub depth: u8,
    /// The heading's direct text.
    pub text: String,
}

fn parse(content: &str) -> Parser<'_> {
    Parser::new_ext(
        content,
        Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_FOOTNOTES,
    )
}

/// Every heading in document order.
///
/// Only text that sits directly inside the heading is collected; text nested
/// in emphasis, links or inline code is skipped. The site builds its table
/// of contents the same way, so anchors line up with the rendered ids.
///
/// ```rust
/// use quire_content::markdown::extract_headings;
///
/// let headings = extract_headings("## Plain\n\n### With **bold** word");
/// assert_eq!(headings[0].depth, 2);
/// assert_eq!(headings[0].text, "Plain");
/// assert_eq!(headings[1].text, "With  word");
/// ```
pub fn extract_headings(content: &str) -> Vec<Heading> {
    let mut headings = Vec::new();
    let mut current: Option<Heading> = None;
    let mut nesting = 0usize;

    for event in parse(content) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                current = Some(Heading {
                    depth: level as u8,
                    text: String::new(),
                });
                nesting = 0;
            }
            Event::End(TagEnd::Heading(_)) => headings.extend(current.take()),
            Event::Start(_) if current.is_some() => nesting += 1,
            Event::End(_) if current.is_some() => nesting = nesting.saturating_sub(1),
            Event::Text(text) if nesting == 0 => {
                if let Some(heading) = current.as_mut() {
                    heading.text.push_str(&text);
                }
            }
            _ => {}
        }
    }

    headings
}

/// Markdown reduced to readable text.
///
/// Link text, image alt text and code contents are kept, raw HTML passes
/// through for the sanitiser, and block boundaries become newlines.
///
/// ```rust
/// use quire_content::markdown::plain_text;
///
/// let text = plain_text("# Title\n\nSee [the docs](https://example.com).");
/// assert_eq!(text, "Title\nSee the docs.");
/// ```
pub fn plain_text(content: &str) -> String {
    let mut out = String::new();

    for event in parse(content) {
        match event {
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::Html(html) | Event::InlineHtml(html) => out.push_str(&html),
            Event::SoftBreak => out.push(' '),
            Event::HardBreak => out.push('\n'),
            Event::End(
                TagEnd::Paragraph
                | TagEnd::Heading(_)
                | TagEnd::CodeBlock
                | TagEnd::Item
                | TagEnd::TableCell
                | TagEnd::BlockQuote(_),
            ) => {
                if !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }

    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_depths() {
        let headings = extract_headings("# One\n\ntext\n\n## Two\n\n### Three\n\n#### Four");
        let depths: Vec<u8> = headings.iter().map(|h| h.depth).collect();
        assert_eq!(depths, vec![1, 2, 3, 4]);
        assert_eq!(headings[2].text, "Three");
    }

    #[test]
    fn test_heading_skips_nested_inline() {
        let headings = extract_headings("## Using `Result` in *Rust*");
        assert_eq!(headings[0].text, "Using  in ");
    }

    #[test]
    fn test_setext_headings() {
        let headings = extract_headings("Title\n=====\n\nSub\n---\n");
        assert_eq!(headings.len(), 2);
        assert_eq!(headings[1].depth, 2);
        assert_eq!(headings[1].text, "Sub");
    }

    #[test]
    fn test_headings_ignore_code_blocks() {
        let headings = extract_headings("```\n# not a heading\n```\n\n## Real");
        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].text, "Real");
    }

    #[test]
    fn test_plain_text_strips_emphasis() {
        let text = plain_text("Some **bold** and *italic* and ~~struck~~ text.");
        assert_eq!(text, "Some bold and italic and struck text.");
    }

    #[test]
    fn test_plain_text_keeps_code_contents() {
        let text = plain_text("Run:\n\n```bash\ncargo build\n```\n\nUse `cargo`.");
        assert!(text.contains("cargo build"));
        assert!(text.contains("Use cargo."));
        assert!(!text.contains("```"));
    }

    #[test]
    fn test_plain_text_image_alt_and_lists() {
        assert_eq!(plain_text("![diagram of flow](img/flow.png)"), "diagram of flow");
        assert_eq!(plain_text("- first\n- second\n"), "first\nsecond");
    }

    #[test]
    fn test_plain_text_passes_html_through() {
        assert_eq!(plain_text("Hello <b>world</b>"), "Hello <b>world</b>");
    }

    #[test]
    fn test_plain_text_unicode() {
        assert_eq!(plain_text("# 标题\n\n这是**正文**。"), "标题\n这是正文。");
    }

    #[test]
    fn test_plain_text_empty() {
        assert_eq!(plain_text(""), "");
        assert_eq!(plain_text("   \n\n"), "");
    }
}
