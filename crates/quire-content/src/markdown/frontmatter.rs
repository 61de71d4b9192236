//! YAML frontmatter at the top of an article.
//!
//! ```markdown
//! ---
//! title: Understanding Ownership
//! date: 2024-03-01
//! tags: [rust, memory]
//! ---
//!
//! # Understanding Ownership
//! ```
//!
//! The block must open on the very first line. Without a closing `---` line
//! the whole file is body. Invalid YAML is logged and read as empty
//! metadata; the body still starts after the closing delimiter.
//!
//! ```rust
//! use quire_content::markdown::extract_frontmatter;
//!
//! let fm = extract_frontmatter("---\ntitle: Test\ntags: solo\n---\n\nBody");
//! assert_eq!(fm.get_scalar("title").as_deref(), Some("Test"));
//! assert_eq!(fm.get_string_list("tags"), vec!["solo"]);
//! assert_eq!(fm.body().trim(), "Body");
//! ```

use yaml_serde::Value;

const DELIMITER: &str = "---";

/// An article split into frontmatter and body.
#[derive(Debug, Clone)]
pub struct FrontmatterResult<'a> {
    value: Option<Value>,
    yaml: &'a str,
    body: &'a str,
}

impl<'a> FrontmatterResult<'a> {
    fn body_only(body: &'a str) -> Self {
        Self {
            value: None,
            yaml: "",
            body,
        }
    }

    /// Everything after the closing delimiter line.
    pub fn body(&self) -> &'a str {
        self.body
    }

    /// A scalar field rendered as a string.
    ///
    /// Numbers and booleans are formatted; empty strings, nulls, sequences
    /// and mappings yield `None`.
    pub fn get_scalar(&self, key: &str) -> Option<String> {
        self.value
            .as_ref()
            .and_then(|v| v.get(key))
            .and_then(scalar_to_string)
            .filter(|s| !s.is_empty())
    }

    /// A list field. A single scalar is read as a one-element list and
    /// non-scalar items are dropped.
    pub fn get_string_list(&self, key: &str) -> Vec<String> {
        match self.value.as_ref().and_then(|v| v.get(key)) {
            Some(Value::Sequence(items)) => items.iter().filter_map(scalar_to_string).collect(),
            Some(other) => scalar_to_string(other)
                .filter(|s| !s.is_empty())
                .into_iter()
                .collect(),
            None => Vec::new(),
        }
    }

    /// Whether the top-level `key` is written as a plain scalar, that is
    /// without quotes or an explicit tag.
    ///
    /// YAML loaders only resolve plain scalars to timestamps, so a quoted
    /// `date: "2024-01-05"` stays a string.
    pub fn is_plain_scalar(&self, key: &str) -> bool {
        self.yaml.lines().any(|line| {
            line.strip_prefix(key)
                .and_then(|rest| rest.strip_prefix(':'))
                .map(str::trim_start)
                .is_some_and(|value| {
                    !value.is_empty() && !value.starts_with(['"', '\'', '!'])
                })
        })
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Split `content` into frontmatter and body.
///
/// A leading byte-order mark and Windows line endings are accepted.
pub fn extract_frontmatter(content: &str) -> FrontmatterResult<'_> {
    let trimmed = content.strip_prefix('\u{feff}').unwrap_or(content);

    let Some(rest) = trimmed.strip_prefix(DELIMITER) else {
        return FrontmatterResult::body_only(content);
    };

    // `----` is a thematic break, not an opening delimiter
    let inner = match rest.find('\n') {
        Some(pos) if rest[..pos].trim_end_matches('\r').is_empty() => &rest[pos + 1..],
        _ => return FrontmatterResult::body_only(content),
    };

    let (yaml, after_closing) = if let Some(after) = inner.strip_prefix(DELIMITER) {
        ("", after)
    } else if let Some(pos) = inner.find("\n---") {
        (&inner[..pos], &inner[pos + 4..])
    } else {
        log::warn!("Frontmatter has no closing delimiter, reading the whole file as body");
        return FrontmatterResult::body_only(content);
    };

    let body = after_closing
        .find('\n')
        .map_or("", |pos| &after_closing[pos + 1..]);

    let value = if yaml.trim().is_empty() {
        None
    } else {
        match yaml_serde::from_str::<Value>(yaml) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Failed to parse frontmatter YAML: {e}");
                None
            }
        }
    };

    FrontmatterResult { value, yaml, body }
}

/// The body of `content`, with any frontmatter removed.
pub fn strip_frontmatter(content: &str) -> &str {
    extract_frontmatter(content).body()
}
