//! Read-side queries over a built search index.
//!
//! A [`Catalog`] answers the questions the site asks when rendering article
//! lists: which articles carry a tag, what order they appear in, which page
//! a reader is on, and what headings an article has.

use std::path::Path;

use quire_content::markdown::{extract_headings, strip_frontmatter};
use quire_content::metadata::parse_index_date;
use quire_core::util::ids::MARKDOWN_EXTENSION;
use quire_core::{Error, Result, Slugger};
use serde::Serialize;

use crate::entry::{SearchEntry, TagEntry, build_tag_index};

/// Articles per listing page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Minimum Jaro-Winkler similarity for a tag suggestion.
pub const TAG_SUGGESTION_THRESHOLD: f64 = 0.8;

/// In-memory view over a search index and its derived tag index.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<SearchEntry>,
    tags: Vec<TagEntry>,
}

impl Catalog {
    /// Build a catalog from entries; the tag index is derived.
    pub fn from_entries(entries: Vec<SearchEntry>) -> Self {
        let tags = build_tag_index(&entries);
        Self { entries, tags }
    }

    /// Load a catalog from a `search-index.json` file.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        let entries: Vec<SearchEntry> = serde_json::from_str(&content).map_err(|e| {
            Error::parse(format!("Invalid search index {}: {e}", path.display()))
        })?;
        log::debug!("Loaded {} entries from {}", entries.len(), path.display());
        Ok(Self::from_entries(entries))
    }

    /// All entries, in index order.
    pub fn entries(&self) -> &[SearchEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by slug.
    pub fn get(&self, slug: &str) -> Option<&SearchEntry> {
        self.entries.iter().find(|e| e.slug == slug)
    }

    /// All entries, or only those carrying `tag` (exact match).
    pub fn articles(&self, tag: Option<&str>) -> Vec<&SearchEntry> {
        match tag {
            Some(tag) => self.entries.iter().filter(|e| e.has_tag(tag)).collect(),
            None => self.entries.iter().collect(),
        }
    }

    /// All entries, newest first.
    pub fn newest_first(&self) -> Vec<&SearchEntry> {
        let mut entries = self.articles(None);
        sort_newest_first(&mut entries);
        entries
    }

    /// The tag index, in first-seen order.
    pub fn tags(&self) -> &[TagEntry] {
        &self.tags
    }

    /// Closest known tag to `input`, for "did you mean" hints.
    ///
    /// Returns `None` when `input` is itself a known tag or nothing is
    /// similar enough.
    pub fn suggest_tag(&self, input: &str) -> Option<&str> {
        if self.tags.iter().any(|t| t.tag == input) {
            return None;
        }

        let needle = input.to_lowercase();
        self.tags
            .iter()
            .map(|t| (t, strsim::jaro_winkler(&needle, &t.tag.to_lowercase())))
            .filter(|(_, score)| *score >= TAG_SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(t, _)| t.tag.as_str())
    }
}

/// Sort entries by date, newest first.
///
/// The sort is stable. Entries whose date cannot be parsed keep their
/// relative order after every dated entry.
pub fn sort_newest_first(entries: &mut [&SearchEntry]) {
    entries.sort_by_cached_key(|e| std::cmp::Reverse(parse_index_date(&e.date)));
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// 1-based page number actually shown.
    pub current: usize,
    /// Number of pages; 0 when there are no items.
    pub total_pages: usize,
    /// Number of items across all pages.
    pub total_items: usize,
}

impl<T> Page<T> {
    /// Returns `true` if `requested` was out of range and got clamped.
    pub fn was_clamped(&self, requested: usize) -> bool {
        self.total_pages > 0 && requested != self.current
    }

    /// Returns `true` if a later page exists.
    pub fn has_next(&self) -> bool {
        self.current < self.total_pages
    }

    /// Returns `true` if an earlier page exists.
    pub fn has_previous(&self) -> bool {
        self.current > 1 && self.total_pages > 0
    }
}

/// Slice `items` into a 1-based page.
///
/// Out-of-range page numbers are clamped into `1..=total_pages`. A page
/// size of 0 is treated as 1.
///
/// # Example
///
/// ```rust
/// use quire_index::catalog::paginate;
///
/// let items: Vec<u32> = (1..=25).collect();
/// let page = paginate(&items, 9, 10);
/// assert_eq!(page.current, 3);
/// assert_eq!(page.total_pages, 3);
/// assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
/// ```
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size);

    if total_pages == 0 {
        return Page {
            items: Vec::new(),
            current: 1,
            total_pages: 0,
            total_items: 0,
        };
    }

    let current = page.clamp(1, total_pages);
    let start = (current - 1) * page_size;
    let end = (start + page_size).min(total_items);

    Page {
        items: items[start..end].to_vec(),
        current,
        total_pages,
        total_items,
    }
}

/// Read the raw Markdown of an article.
///
/// # Errors
///
/// Returns `Error::NotFound` if `<content_dir>/<slug>.md` does not exist.
pub fn article_markdown(content_dir: &Path, slug: &str) -> Result<String> {
    if slug.split('/').any(|part| part == "..") {
        return Err(Error::not_found(slug, "article"));
    }

    let path = content_dir.join(format!("{slug}{MARKDOWN_EXTENSION}"));
    if !path.is_file() {
        return Err(Error::not_found(slug, "article"));
    }

    std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))
}

/// One table-of-contents item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    /// Heading level, 2 or 3.
    pub level: u8,
    /// Direct heading text.
    pub text: String,
    /// Anchor id.
    pub id: String,
}

/// Build the table of contents of an article.
///
/// Every heading advances the slugger so ids match the rendered page, but
/// only level 2 and 3 headings are listed. Frontmatter is skipped.
///
/// # Example
///
/// ```rust
/// use quire_index::catalog::table_of_contents;
///
/// let toc = table_of_contents("# Title\n\n## Setup\n\n### Setup\n\n#### Deep");
/// assert_eq!(toc.len(), 2);
/// assert_eq!(toc[0].id, "setup");
/// assert_eq!(toc[1].id, "setup-1");
/// ```
pub fn table_of_contents(markdown: &str) -> Vec<TocEntry> {
    let mut slugger = Slugger::new();

    extract_headings(strip_frontmatter(markdown))
        .into_iter()
        .filter_map(|heading| {
            let id = slugger.slug(&heading.text);
            matches!(heading.depth, 2 | 3).then(|| TocEntry {
                level: heading.depth,
                text: heading.text,
                id,
            })
        })
        .collect()
}
