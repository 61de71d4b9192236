//! Configuration for the `quire` binary.
//!
//! Every section and field has a default, so an empty or missing file is a
//! valid configuration:
//!
//! ```toml
//! [content]
//! dir = "blogs"
//! recursive = false
//!
//! [index]
//! search_index = "blogs/search-index.json"
//! tag_index = "blogs/tags.json"
//! summary_marker = "<!--summary-->"
//! fallback_lines = 5
//! default_category = "Uncategorized"
//! keep_whitespace = false
//!
//! [listing]
//! page_size = 10
//!
//! [search]
//! threshold = 0.6
//! location_distance = 100
//! ignore_location = false
//! page_size = 5
//! ```

use std::path::PathBuf;

use quire_content::{SanitizeOptions, SummaryOptions};
use quire_content::summary::{DEFAULT_FALLBACK_LINES, DEFAULT_SUMMARY_MARKER};
use quire_core::ConfigManager;
use quire_core::util::paths::expand_tilde;
use quire_index::builder::{ArticleExtractor, IndexPaths};
use quire_index::entry::DEFAULT_CATEGORY;
use quire_index::{DEFAULT_PAGE_SIZE, SearchOptions};
use serde::{Deserialize, Serialize};

/// Default article directory.
pub const DEFAULT_CONTENT_DIR: &str = "blogs";

/// Default page size for search results.
pub const DEFAULT_SEARCH_PAGE_SIZE: usize = 5;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuireConfig {
    pub content: ContentConfig,
    pub index: IndexConfig,
    pub listing: ListingConfig,
    pub search: SearchConfig,
}

impl ConfigManager for QuireConfig {
    fn project_name() -> &'static str {
        "quire"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory holding the `.md` articles.
    pub dir: String,
    /// Also index articles in subdirectories.
    pub recursive: bool,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: DEFAULT_CONTENT_DIR.to_string(),
            recursive: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub search_index: String,
    pub tag_index: String,
    pub summary_marker: String,
    /// Lines used for the summary when an article has no marker.
    pub fallback_lines: usize,
    pub default_category: String,
    /// Keep whitespace in indexed content instead of stripping it.
    pub keep_whitespace: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            search_index: format!("{DEFAULT_CONTENT_DIR}/search-index.json"),
            tag_index: format!("{DEFAULT_CONTENT_DIR}/tags.json"),
            summary_marker: DEFAULT_SUMMARY_MARKER.to_string(),
            fallback_lines: DEFAULT_FALLBACK_LINES,
            default_category: DEFAULT_CATEGORY.to_string(),
            keep_whitespace: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    pub page_size: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub threshold: f64,
    pub location_distance: usize,
    pub ignore_location: bool,
    /// Results per page for `quire search`.
    pub page_size: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        let options = SearchOptions::default();
        Self {
            threshold: options.threshold,
            location_distance: options.location_distance,
            ignore_location: options.ignore_location,
            page_size: DEFAULT_SEARCH_PAGE_SIZE,
        }
    }
}

impl QuireConfig {
    /// Content directory, with `~` expanded.
    pub fn content_dir(&self) -> PathBuf {
        expand_tilde(&self.content.dir)
    }

    pub fn index_paths(&self) -> IndexPaths {
        IndexPaths {
            search_index: expand_tilde(&self.index.search_index),
            tag_index: expand_tilde(&self.index.tag_index),
        }
    }

    /// Article extractor configured from `[index]`.
    pub fn extractor(&self) -> ArticleExtractor {
        ArticleExtractor {
            summary: SummaryOptions {
                marker: self.index.summary_marker.clone(),
                fallback_lines: self.index.fallback_lines,
            },
            sanitize: SanitizeOptions {
                keep_whitespace: self.index.keep_whitespace,
            },
            default_category: self.index.default_category.clone(),
        }
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            threshold: self.search.threshold,
            location_distance: self.search.location_distance,
            ignore_location: self.search.ignore_location,
        }
    }
}
