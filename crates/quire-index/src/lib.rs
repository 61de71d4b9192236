//! Search index and tag index for Quire.
//!
//! This crate owns both sides of the index: building `search-index.json`
//! and `tags.json` from a directory of articles, and querying them the way
//! the site does.
//!
//! # Modules
//!
//! - [`entry`]: On-disk record types and tag aggregation
//! - [`builder`]: Batch building and writing
//! - [`freshness`]: Content hashing for `--if-changed` builds
//! - [`catalog`]: Tag filtering, ordering, pagination, tables of contents
//! - [`search`]: Fuzzy search over entries

pub mod builder;
pub mod catalog;
pub mod entry;
pub mod freshness;
pub mod search;

// Re-exports
pub use builder::{ArticleExtractor, IndexBuilder, IndexPaths, IndexStats, write_indexes};
pub use catalog::{
    Catalog, DEFAULT_PAGE_SIZE, Page, TocEntry, article_markdown, paginate, table_of_contents,
};
pub use entry::{SEARCH_INDEX_FILE, SearchEntry, TAG_INDEX_FILE, TagEntry, build_tag_index};
pub use freshness::IndexMetadata;
pub use search::{FuzzySearch, MatchedKey, SearchHit, SearchOptions};
