//! Plain-text sanitising for the search index.
//!
//! The search index stores article content as a flat run of indexable
//! characters. Cleaning happens in three passes:
//!
//! 1. markdown syntax is stripped ([`plain_text`])
//! 2. HTML tags are removed ([`strip_html_tags`])
//! 3. every character outside ASCII word characters, CJK unified ideographs
//!    (`U+4E00..=U+9FA5`), and `. , ! ?` is dropped ([`retain_indexable`])
//!
//! The last pass removes whitespace too unless
//! [`SanitizeOptions::keep_whitespace`] is set, in which case whitespace
//! runs collapse to single spaces.

use std::sync::LazyLock;

use regex::Regex;

use crate::markdown::parser::plain_text;

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[^>]+(>|$)").expect("Invalid HTML tag regex"));

/// Sanitiser settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SanitizeOptions {
    /// Collapse whitespace to single spaces instead of deleting it.
    pub keep_whitespace: bool,
}

/// Clean an article body for indexing with default options.
///
/// # Example
///
/// ```rust
/// use quire_content::sanitize::clean_text;
///
/// assert_eq!(clean_text("# Hello, **world**!"), "Hello,world!");
/// assert_eq!(clean_text("学习 <em>Rust</em> 吧"), "学习Rust吧");
/// ```
pub fn clean_text(body: &str) -> String {
    clean_text_with(body, SanitizeOptions::default())
}

/// Clean an article body for indexing.
pub fn clean_text_with(body: &str, options: SanitizeOptions) -> String {
    let text = plain_text(body);
    let text = strip_html_tags(&text);
    retain_indexable(&text, options.keep_whitespace)
}

/// Remove HTML tags, keeping the text between them.
///
/// An unterminated tag at the end of the input is removed as well.
///
/// # Example
///
/// ```rust
/// use quire_content::sanitize::strip_html_tags;
///
/// assert_eq!(strip_html_tags("<p>Hi <br/>there</p>"), "Hi there");
/// assert_eq!(strip_html_tags("tail <span"), "tail ");
/// ```
pub fn strip_html_tags(text: &str) -> String {
    HTML_TAG.replace_all(text, "").into_owned()
}

/// Returns `true` for characters kept in indexed content.
pub fn is_indexable(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c == '_'
        || ('\u{4e00}'..='\u{9fa5}').contains(&c)
        || matches!(c, '.' | ',' | '!' | '?')
}

/// Drop every character that is not [`is_indexable`].
///
/// With `keep_whitespace`, whitespace runs become a single space and the
/// result is trimmed.
pub fn retain_indexable(text: &str, keep_whitespace: bool) -> String {
    if !keep_whitespace {
        return text.chars().filter(|&c| is_indexable(c)).collect();
    }

    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            pending_space = true;
        } else if is_indexable(c) {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        }
    }
    out
}
