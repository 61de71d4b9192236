//! Approximate search over index entries.
//!
//! Each entry is scored against the query on its title, each of its tags,
//! and its content; the best key wins. A key's score combines how many
//! edits the closest substring needs with how far into the text it starts:
//!
//! ```text
//! score = errors / pattern_len + start / location_distance
//! ```
//!
//! A score of 0 is a perfect match at the start of the text. Entries whose
//! score is at most the threshold are returned, best first.
//!
//! # Example
//!
//! ```rust
//! use quire_index::entry::SearchEntry;
//! use quire_index::search::{FuzzySearch, SearchOptions};
//!
//! let entries = vec![SearchEntry {
//!     title: "Async Rust".into(),
//!     slug: "async-rust".into(),
//!     summary: String::new(),
//!     content: "Futuresandexecutors".into(),
//!     tags: vec!["rust".into()],
//!     category: "Rust".into(),
//!     date: String::new(),
//! }];
//!
//! let search = FuzzySearch::new(&entries, SearchOptions::default());
//! let hits = search.search("asnyc");
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].entry.slug, "async-rust");
//! ```

use serde::{Deserialize, Serialize};

use crate::entry::SearchEntry;

/// Search settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Highest score that still counts as a match (0.0 to 1.0).
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Characters from the start of a key at which the positional penalty
    /// reaches 1.0.
    #[serde(default = "default_location_distance")]
    pub location_distance: usize,

    /// Drop the positional penalty entirely.
    #[serde(default)]
    pub ignore_location: bool,
}

fn default_threshold() -> f64 {
    0.6
}

fn default_location_distance() -> usize {
    100
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            location_distance: default_location_distance(),
            ignore_location: false,
        }
    }
}

/// Which field of an entry produced the best match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchedKey {
    Title,
    /// Index into the entry's tag list.
    Tag(usize),
    Content,
}

/// A matching entry.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit<'a> {
    /// The matching entry.
    pub entry: &'a SearchEntry,
    /// Position of the entry in the index.
    pub index: usize,
    /// Best key score; lower is better.
    pub score: f64,
    /// Key the score came from.
    pub key: MatchedKey,
}

/// Linear-scan fuzzy search over a slice of entries.
#[derive(Debug, Clone)]
pub struct FuzzySearch<'a> {
    entries: &'a [SearchEntry],
    options: SearchOptions,
}

impl<'a> FuzzySearch<'a> {
    /// Create a search over `entries`.
    pub fn new(entries: &'a [SearchEntry], options: SearchOptions) -> Self {
        Self { entries, options }
    }

    /// Find entries matching `query`, best first.
    ///
    /// Matching is case-insensitive. Blank queries match nothing. Ties keep
    /// index order.
    pub fn search(&self, query: &str) -> Vec<SearchHit<'a>> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let pattern: Vec<char> = query.to_lowercase().chars().collect();

        let mut hits: Vec<SearchHit<'a>> = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                let (score, key) = self.best_key(&pattern, entry)?;
                (score <= self.options.threshold).then_some(SearchHit {
                    entry,
                    index,
                    score,
                    key,
                })
            })
            .collect();

        // stable: equal scores stay in index order
        hits.sort_by(|a, b| a.score.total_cmp(&b.score));

        log::debug!("Search '{}' matched {} entries", query, hits.len());
        hits
    }

    fn best_key(&self, pattern: &[char], entry: &SearchEntry) -> Option<(f64, MatchedKey)> {
        let keys = std::iter::once((MatchedKey::Title, entry.title.as_str()))
            .chain(
                entry
                    .tags
                    .iter()
                    .enumerate()
                    .map(|(i, tag)| (MatchedKey::Tag(i), tag.as_str())),
            )
            .chain(std::iter::once((MatchedKey::Content, entry.content.as_str())));

        keys.filter_map(|(key, text)| {
            match_score(pattern, text, &self.options).map(|score| (score, key))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))
    }
}

/// Score the closest approximate occurrence of `pattern` in `text`.
///
/// `pattern` must already be lowercase. Returns `None` for an empty pattern
/// or empty text.
pub fn match_score(pattern: &[char], text: &str, options: &SearchOptions) -> Option<f64> {
    let m = pattern.len();
    if m == 0 || text.is_empty() {
        return None;
    }

    let text: Vec<char> = text.to_lowercase().chars().collect();
    let scan_limit = scan_limit(m, text.len(), options);

    // Column of edit costs for pattern prefixes, paired with where the
    // best alignment for that prefix starts in the text.
    let mut prev: Vec<(usize, usize)> = (0..=m).map(|i| (i, 0)).collect();
    let mut curr: Vec<(usize, usize)> = vec![(0, 0); m + 1];
    let mut best: Option<f64> = None;

    for (j, &c) in text.iter().take(scan_limit).enumerate() {
        // a match may start at any position for free
        curr[0] = (0, j + 1);

        for i in 1..=m {
            let cost = usize::from(pattern[i - 1] != c);
            let substitution = (prev[i - 1].0 + cost, prev[i - 1].1);
            let skip_text = (prev[i].0 + 1, prev[i].1);
            let skip_pattern = (curr[i - 1].0 + 1, curr[i - 1].1);

            curr[i] = substitution.min(skip_text).min(skip_pattern);
        }

        let (errors, start) = curr[m];
        let score = errors as f64 / m as f64 + proximity(start, options);
        if best.is_none_or(|b| score < b) {
            best = Some(score);
        }
        if score == 0.0 {
            break;
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    best
}

fn proximity(start: usize, options: &SearchOptions) -> f64 {
    if options.ignore_location {
        0.0
    } else if options.location_distance == 0 {
        if start == 0 { 0.0 } else { 1.0 }
    } else {
        start as f64 / options.location_distance as f64
    }
}

/// Number of text characters worth scanning.
///
/// Past this point any alignment either starts too late or spans too many
/// edits to stay under the threshold.
fn scan_limit(m: usize, text_len: usize, options: &SearchOptions) -> usize {
    if options.ignore_location || options.location_distance == 0 {
        return text_len;
    }

    let t = options.threshold.max(0.0);
    let reach = t * options.location_distance as f64 + m as f64 * (1.0 + t);
    (reach.floor() as usize).saturating_add(1).min(text_len)
}
