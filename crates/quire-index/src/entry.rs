//! Index record types.
//!
//! These types define the on-disk shape of `search-index.json` and
//! `tags.json`. Field order matters: it is the serialization order, and the
//! site reads the files as-is.

use serde::{Deserialize, Serialize};

/// Version of the index file format, folded into the freshness hash.
pub const INDEX_FORMAT_VERSION: u32 = 1;

/// Default file name of the search index.
pub const SEARCH_INDEX_FILE: &str = "search-index.json";

/// Default file name of the tag index.
pub const TAG_INDEX_FILE: &str = "tags.json";

/// Category used when an article does not declare one.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// One article in the search index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEntry {
    /// Display title.
    pub title: String,
    /// Article identifier, derived from the file path.
    pub slug: String,
    /// Markdown preview.
    pub summary: String,
    /// Sanitised body text.
    pub content: String,
    /// Tags in frontmatter order.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Category.
    pub category: String,
    /// ISO-8601 date, or the author's string verbatim.
    pub date: String,
}

impl SearchEntry {
    /// Returns `true` if the entry carries `tag` (exact match).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// One tag in the tag index, with the slugs of the articles carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagEntry {
    /// Tag name.
    pub tag: String,
    /// Slugs, in search index order.
    pub articles: Vec<String>,
}

impl TagEntry {
    /// Number of articles carrying the tag.
    pub fn count(&self) -> usize {
        self.articles.len()
    }
}

/// Derive the tag index from search entries.
///
/// Tags appear in first-seen order. A tag repeated within one entry lists
/// that entry's slug once per occurrence, as the site has always done.
///
/// # Example
///
/// ```rust
/// use quire_index::entry::{SearchEntry, build_tag_index};
///
/// let entry = |slug: &str, tags: &[&str]| SearchEntry {
///     title: slug.into(),
///     slug: slug.into(),
///     summary: String::new(),
///     content: String::new(),
///     tags: tags.iter().map(|t| t.to_string()).collect(),
///     category: "Uncategorized".into(),
///     date: String::new(),
/// };
///
/// let tags = build_tag_index(&[entry("a", &["rust", "cli"]), entry("b", &["rust"])]);
/// assert_eq!(tags[0].tag, "rust");
/// assert_eq!(tags[0].articles, vec!["a", "b"]);
/// assert_eq!(tags[1].tag, "cli");
/// ```
pub fn build_tag_index(entries: &[SearchEntry]) -> Vec<TagEntry> {
    let mut tags: Vec<TagEntry> = Vec::new();

    for entry in entries {
        for tag in &entry.tags {
            match tags.iter_mut().find(|t| &t.tag == tag) {
                Some(existing) => existing.articles.push(entry.slug.clone()),
                None => tags.push(TagEntry {
                    tag: tag.clone(),
                    articles: vec![entry.slug.clone()],
                }),
            }
        }
    }

    tags
}
