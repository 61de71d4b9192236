//! Batch index building.
//!
//! `IndexBuilder` turns a directory of Markdown articles into the search
//! index and the tag index, and writes both as pretty-printed JSON.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use quire_index::{IndexBuilder, IndexPaths};
//!
//! # async fn run() -> quire_core::Result<()> {
//! let content = Path::new("blogs");
//! let stats = IndexBuilder::new()
//!     .build(content, &IndexPaths::in_dir(content))
//!     .await?;
//! println!("Indexed {} articles", stats.entries_written);
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use quire_content::metadata::format_utc;
use quire_content::{
    ArticleMeta, SanitizeOptions, SummaryOptions, clean_text_with, extract_frontmatter,
    extract_summary_with,
};
use quire_core::{Error, Result, find_markdown_files, slug_from_path};
use serde::Serialize;

use crate::entry::{
    DEFAULT_CATEGORY, SEARCH_INDEX_FILE, SearchEntry, TAG_INDEX_FILE, TagEntry, build_tag_index,
};
use crate::freshness::{IndexMetadata, content_hash};

/// Statistics about a build.
#[derive(Debug, Clone, Default)]
pub struct IndexStats {
    /// Number of entries in the written search index.
    pub entries_written: usize,
    /// Number of article files read.
    pub files_processed: usize,
    /// Number of files skipped (no usable slug).
    pub files_skipped: usize,
    /// Number of files that could not be read.
    pub errors: usize,
    /// Total bytes of article content processed.
    pub bytes_processed: usize,
    /// Number of distinct tags.
    pub tags_written: usize,
    /// Content hash for freshness checking.
    pub content_hash: String,
    /// `true` when the build was skipped because the index was fresh.
    pub up_to_date: bool,
}

/// Output locations of the two index files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexPaths {
    /// Path of `search-index.json`.
    pub search_index: PathBuf,
    /// Path of `tags.json`.
    pub tag_index: PathBuf,
}

impl IndexPaths {
    /// Both files with their default names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            search_index: dir.join(SEARCH_INDEX_FILE),
            tag_index: dir.join(TAG_INDEX_FILE),
        }
    }

    /// Directory holding the freshness metadata: the search index's parent.
    pub fn metadata_dir(&self) -> PathBuf {
        self.search_index
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }

    /// Returns `true` if both files exist.
    pub fn exist(&self) -> bool {
        self.search_index.is_file() && self.tag_index.is_file()
    }
}

/// Turns one article file into a [`SearchEntry`].
#[derive(Debug, Clone, Hash)]
pub struct ArticleExtractor {
    /// Summary marker and fallback settings.
    pub summary: SummaryOptions,
    /// Content sanitiser settings.
    pub sanitize: SanitizeOptions,
    /// Category for articles that declare none.
    pub default_category: String,
}

impl Default for ArticleExtractor {
    fn default() -> Self {
        Self {
            summary: SummaryOptions::default(),
            sanitize: SanitizeOptions::default(),
            default_category: DEFAULT_CATEGORY.to_string(),
        }
    }
}

impl ArticleExtractor {
    /// Build the index entry for an article.
    ///
    /// `fallback_date` is used when the frontmatter has no date.
    pub fn extract(&self, slug: &str, raw: &str, fallback_date: &str) -> SearchEntry {
        let frontmatter = extract_frontmatter(raw);
        let meta = ArticleMeta::from_frontmatter(&frontmatter);
        let body = frontmatter.body();

        SearchEntry {
            title: meta.title.unwrap_or_else(|| slug.to_string()),
            slug: slug.to_string(),
            summary: extract_summary_with(body, &self.summary),
            content: clean_text_with(body, self.sanitize),
            tags: meta.tags,
            category: meta
                .category
                .unwrap_or_else(|| self.default_category.clone()),
            date: meta.date.unwrap_or_else(|| fallback_date.to_string()),
        }
    }
}

/// Batch index builder.
///
/// Handles article discovery, entry extraction, tag aggregation, output
/// writing, and freshness tracking.
#[derive(Debug, Clone, Default)]
pub struct IndexBuilder {
    extractor: ArticleExtractor,
    recursive: bool,
    if_changed: bool,
    build_time: Option<DateTime<Utc>>,
}

impl IndexBuilder {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the article extractor.
    pub fn with_extractor(mut self, extractor: ArticleExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Walk nested directories as well as the top level.
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Skip the build when the stored content hash still matches.
    pub fn if_changed(mut self, if_changed: bool) -> Self {
        self.if_changed = if_changed;
        self
    }

    /// Pin the build time used for undated articles.
    pub fn with_build_time(mut self, build_time: DateTime<Utc>) -> Self {
        self.build_time = Some(build_time);
        self
    }

    /// Extract entries for every article under `content_dir`.
    ///
    /// Files are processed in sorted path order. Unreadable files are logged
    /// and counted in [`IndexStats::errors`]; the build continues.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if `content_dir` is not a directory.
    pub async fn build_entries(
        &self,
        content_dir: &Path,
    ) -> Result<(Vec<SearchEntry>, IndexStats)> {
        let fallback_date = format_utc(self.build_time.unwrap_or_else(Utc::now));
        self.collect_entries(content_dir, &fallback_date).await
    }

    async fn collect_entries(
        &self,
        content_dir: &Path,
        fallback_date: &str,
    ) -> Result<(Vec<SearchEntry>, IndexStats)> {
        let files = find_markdown_files(content_dir, self.recursive).await?;

        let mut stats = IndexStats::default();
        let mut entries = Vec::with_capacity(files.len());

        for file_path in files {
            let Some(slug) = slug_from_path(content_dir, &file_path) else {
                log::debug!("Skipped {:?} (no slug)", file_path);
                stats.files_skipped += 1;
                continue;
            };

            let raw = match tokio::fs::read_to_string(&file_path).await {
                Ok(c) => c,
                Err(e) => {
                    log::warn!("Failed to read {:?}: {}", file_path, e);
                    stats.errors += 1;
                    continue;
                }
            };

            stats.files_processed += 1;
            stats.bytes_processed += raw.len();

            log::debug!("Indexing {}", slug);
            entries.push(self.extractor.extract(&slug, &raw, fallback_date));
        }

        stats.entries_written = entries.len();
        Ok((entries, stats))
    }

    /// Build and write both index files.
    ///
    /// With `if_changed`, the build is skipped when both outputs exist and
    /// the stored record [is fresh](IndexMetadata::is_fresh) for the current
    /// articles and settings. Otherwise one entry is extracted per article,
    /// the tag index is derived, and both files are written along with a new
    /// build record.
    pub async fn build(&self, content_dir: &Path, paths: &IndexPaths) -> Result<IndexStats> {
        let hash = content_hash(content_dir, self.recursive, &self.extractor).await?;
        let metadata_dir = paths.metadata_dir();

        if self.if_changed && paths.exist() {
            match IndexMetadata::load(&metadata_dir).await {
                Ok(Some(metadata)) if metadata.is_fresh(&hash) => {
                    log::info!("Index is fresh, skipping rebuild");
                    return Ok(IndexStats {
                        entries_written: metadata.entry_count,
                        content_hash: hash,
                        up_to_date: true,
                        ..Default::default()
                    });
                }
                Ok(_) => {}
                Err(e) => log::warn!("Ignoring unreadable index metadata: {}", e),
            }
        }

        log::info!("Building index from {:?}", content_dir);

        let build_time = format_utc(self.build_time.unwrap_or_else(Utc::now));
        let (entries, mut stats) = self.collect_entries(content_dir, &build_time).await?;
        let tags = build_tag_index(&entries);

        write_indexes(paths, &entries, &tags).await?;

        stats.tags_written = tags.len();
        stats.content_hash = hash.clone();
        IndexMetadata::new(hash, entries.len(), build_time)
            .save(&metadata_dir)
            .await?;

        log::info!(
            "Indexed {} articles, {} tags ({} bytes, {} errors)",
            stats.entries_written,
            stats.tags_written,
            stats.bytes_processed,
            stats.errors
        );

        Ok(stats)
    }
}

/// Write the search index and tag index.
pub async fn write_indexes(
    paths: &IndexPaths,
    entries: &[SearchEntry],
    tags: &[TagEntry],
) -> Result<()> {
    write_json_pretty(&paths.search_index, entries).await?;
    log::info!("Wrote search index to {}", paths.search_index.display());

    write_json_pretty(&paths.tag_index, tags).await?;
    log::info!("Wrote tag index to {}", paths.tag_index.display());

    Ok(())
}

/// Serialize `value` as two-space indented JSON and write it to `path`,
/// creating parent directories.
pub async fn write_json_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::io_with_path(e, parent))?;
    }

    let json = serde_json::to_string_pretty(value)?;
    tokio::fs::write(path, json)
        .await
        .map_err(|e| Error::io_with_path(e, path))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, name: &str, content: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    // ------------------------------------------------------------------------
    // ArticleExtractor tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_extract_full_frontmatter() {
        let raw = "---\ntitle: Borrowing\ntags: [rust]\ncategory: Lang\ndate: 2024-02-03\n---\n# Borrowing\n\nShared refs.\n";
        let entry = ArticleExtractor::default().extract("borrowing", raw, "now");

        assert_eq!(entry.title, "Borrowing");
        assert_eq!(entry.slug, "borrowing");
        assert_eq!(entry.summary, "\nShared refs.\n");
        assert_eq!(entry.content, "BorrowingSharedrefs.");
        assert_eq!(entry.tags, vec!["rust"]);
        assert_eq!(entry.category, "Lang");
        assert_eq!(entry.date, "2024-02-03T00:00:00.000Z");
    }

    #[test]
    fn test_extract_defaults() {
        let entry =
            ArticleExtractor::default().extract("untitled", "Just text", "2025-01-01T00:00:00.000Z");
        assert_eq!(entry.title, "untitled");
        assert!(entry.tags.is_empty());
        assert_eq!(entry.category, DEFAULT_CATEGORY);
        assert_eq!(entry.date, "2025-01-01T00:00:00.000Z");
        assert_eq!(entry.summary, "Just text");
    }

    #[test]
    fn test_extract_invalid_frontmatter_uses_defaults() {
        let raw = "---\ntitle: [unclosed\n---\nBody";
        let entry = ArticleExtractor::default().extract("broken", raw, "now");
        assert_eq!(entry.title, "broken");
        assert_eq!(entry.content, "Body");
    }

    #[test]
    fn test_extract_custom_category_and_whitespace() {
        let extractor = ArticleExtractor {
            sanitize: SanitizeOptions {
                keep_whitespace: true,
            },
            default_category: "Notes".to_string(),
            ..Default::default()
        };
        let entry = extractor.extract("n", "Hello there, world", "now");
        assert_eq!(entry.category, "Notes");
        assert_eq!(entry.content, "Hello there, world");
    }

    // ------------------------------------------------------------------------
    // IndexPaths tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_index_paths_in_dir() {
        let paths = IndexPaths::in_dir(Path::new("/site/blogs"));
        assert_eq!(paths.search_index, Path::new("/site/blogs/search-index.json"));
        assert_eq!(paths.tag_index, Path::new("/site/blogs/tags.json"));
        assert_eq!(paths.metadata_dir(), Path::new("/site/blogs"));
    }

    // ------------------------------------------------------------------------
    // IndexBuilder tests
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_build_entries_sorted_and_dated() {
        let dir = TempDir::new().unwrap();
        create_test_file(dir.path(), "b.md", "# B\nbody b");
        create_test_file(dir.path(), "a.md", "# A\nbody a");
        create_test_file(dir.path(), "notes.txt", "ignored");

        let builder = IndexBuilder::new().with_build_time(fixed_time());
        let (entries, stats) = builder.build_entries(dir.path()).await.unwrap();

        let slugs: Vec<&str> = entries.iter().map(|e| e.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a", "b"]);
        assert_eq!(entries[0].date, "2025-03-01T12:00:00.000Z");
        assert_eq!(stats.files_processed, 2);
        assert_eq!(stats.entries_written, 2);
        assert_eq!(stats.errors, 0);
    }

    #[tokio::test]
    async fn test_build_entries_recursive() {
        let dir = TempDir::new().unwrap();
        create_test_file(dir.path(), "top.md", "top");
        create_test_file(dir.path(), "rust/deep.md", "deep");

        let (flat, _) = IndexBuilder::new().build_entries(dir.path()).await.unwrap();
        assert_eq!(flat.len(), 1);

        let (nested, _) = IndexBuilder::new()
            .recursive(true)
            .build_entries(dir.path())
            .await
            .unwrap();
        let slugs: Vec<&str> = nested.iter().map(|e| e.slug.as_str()).collect();
        assert_eq!(slugs, vec!["rust/deep", "top"]);
    }

    #[tokio::test]
    async fn test_build_entries_counts_unreadable() {
        let dir = TempDir::new().unwrap();
        create_test_file(dir.path(), "ok.md", "fine");
        std::fs::write(dir.path().join("binary.md"), [0xff, 0xfe, 0x00]).unwrap();

        let (entries, stats) = IndexBuilder::new().build_entries(dir.path()).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(stats.errors, 1);
    }

    #[tokio::test]
    async fn test_build_missing_content_dir() {
        let out = TempDir::new().unwrap();
        let result = IndexBuilder::new()
            .build(Path::new("/nonexistent/blogs"), &IndexPaths::in_dir(out.path()))
            .await;
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_build_writes_both_files() {
        let dir = TempDir::new().unwrap();
        create_test_file(dir.path(), "one.md", "---\ntags: [x, y]\n---\nOne");
        create_test_file(dir.path(), "two.md", "---\ntags: [y]\n---\nTwo");

        let paths = IndexPaths::in_dir(dir.path());
        let stats = IndexBuilder::new().build(dir.path(), &paths).await.unwrap();
        assert_eq!(stats.entries_written, 2);
        assert_eq!(stats.tags_written, 2);
        assert!(!stats.up_to_date);

        let search = std::fs::read_to_string(&paths.search_index).unwrap();
        assert!(search.starts_with("[\n  {\n    \"title\": \"one\""));

        let tags: Vec<TagEntry> =
            serde_json::from_str(&std::fs::read_to_string(&paths.tag_index).unwrap()).unwrap();
        assert_eq!(tags[0].tag, "x");
        assert_eq!(tags[1].articles, vec!["one", "two"]);
    }

    #[tokio::test]
    async fn test_build_empty_directory_writes_empty_arrays() {
        let dir = TempDir::new().unwrap();
        let paths = IndexPaths::in_dir(dir.path());
        IndexBuilder::new().build(dir.path(), &paths).await.unwrap();

        assert_eq!(std::fs::read_to_string(&paths.search_index).unwrap(), "[]");
        assert_eq!(std::fs::read_to_string(&paths.tag_index).unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_build_creates_output_directories() {
        let dir = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        create_test_file(dir.path(), "post.md", "Post");

        let paths = IndexPaths {
            search_index: out.path().join("public/search-index.json"),
            tag_index: out.path().join("public/meta/tags.json"),
        };
        IndexBuilder::new().build(dir.path(), &paths).await.unwrap();
        assert!(paths.exist());
    }

    #[tokio::test]
    async fn test_build_if_changed_skips_fresh() {
        let dir = TempDir::new().unwrap();
        create_test_file(dir.path(), "doc.md", "content");
        let paths = IndexPaths::in_dir(dir.path());

        let first = IndexBuilder::new().build(dir.path(), &paths).await.unwrap();
        assert_eq!(first.files_processed, 1);

        let second = IndexBuilder::new()
            .if_changed(true)
            .build(dir.path(), &paths)
            .await
            .unwrap();
        assert!(second.up_to_date);
        assert_eq!(second.entries_written, 1);
        assert_eq!(second.files_processed, 0);
    }

    #[tokio::test]
    async fn test_build_if_changed_rebuilds_when_outputs_missing() {
        let dir = TempDir::new().unwrap();
        create_test_file(dir.path(), "doc.md", "content");
        let paths = IndexPaths::in_dir(dir.path());

        IndexBuilder::new().build(dir.path(), &paths).await.unwrap();
        std::fs::remove_file(&paths.tag_index).unwrap();

        let stats = IndexBuilder::new()
            .if_changed(true)
            .build(dir.path(), &paths)
            .await
            .unwrap();
        assert!(!stats.up_to_date);
        assert!(paths.exist());
    }

    #[tokio::test]
    async fn test_build_if_changed_rebuilds_after_settings_change() {
        let dir = TempDir::new().unwrap();
        create_test_file(dir.path(), "doc.md", "first line\nsecond line\nthird line");
        let paths = IndexPaths::in_dir(dir.path());

        IndexBuilder::new().build(dir.path(), &paths).await.unwrap();

        let extractor = ArticleExtractor {
            summary: SummaryOptions {
                fallback_lines: 1,
                ..Default::default()
            },
            ..Default::default()
        };
        let stats = IndexBuilder::new()
            .with_extractor(extractor)
            .if_changed(true)
            .build(dir.path(), &paths)
            .await
            .unwrap();
        assert!(!stats.up_to_date);

        let written: Vec<SearchEntry> =
            serde_json::from_str(&std::fs::read_to_string(&paths.search_index).unwrap()).unwrap();
        assert_eq!(written[0].summary, "first line");
    }

    #[tokio::test]
    async fn test_build_if_changed_rebuilds_after_format_change() {
        let dir = TempDir::new().unwrap();
        create_test_file(dir.path(), "doc.md", "content");
        let paths = IndexPaths::in_dir(dir.path());

        IndexBuilder::new().build(dir.path(), &paths).await.unwrap();

        let mut record = IndexMetadata::load(dir.path()).await.unwrap().unwrap();
        record.format_version += 1;
        record.save(dir.path()).await.unwrap();

        let stats = IndexBuilder::new()
            .if_changed(true)
            .build(dir.path(), &paths)
            .await
            .unwrap();
        assert!(!stats.up_to_date);
        assert_eq!(stats.files_processed, 1);
    }

    #[tokio::test]
    async fn test_build_records_build_time() {
        let dir = TempDir::new().unwrap();
        create_test_file(dir.path(), "doc.md", "content");
        let paths = IndexPaths::in_dir(dir.path());

        IndexBuilder::new()
            .with_build_time(fixed_time())
            .build(dir.path(), &paths)
            .await
            .unwrap();

        let record = IndexMetadata::load(dir.path()).await.unwrap().unwrap();
        assert_eq!(record.indexed_at, "2025-03-01T12:00:00.000Z");
        assert_eq!(record.entry_count, 1);
    }

    #[tokio::test]
    async fn test_build_without_if_changed_always_runs() {
        let dir = TempDir::new().unwrap();
        create_test_file(dir.path(), "doc.md", "content");
        let paths = IndexPaths::in_dir(dir.path());

        IndexBuilder::new().build(dir.path(), &paths).await.unwrap();
        let stats = IndexBuilder::new().build(dir.path(), &paths).await.unwrap();
        assert!(!stats.up_to_date);
        assert_eq!(stats.files_processed, 1);
    }
}
