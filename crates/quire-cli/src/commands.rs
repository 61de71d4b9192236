//! Subcommand implementations.
//!
//! Each command returns the text it wants printed so that `main` owns
//! stdout and tests can inspect the output.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use quire_content::metadata::parse_index_date;
use quire_core::{Error, Result};
use quire_index::{
    Catalog, FuzzySearch, IndexBuilder, IndexPaths, IndexStats, Page, SearchEntry, SearchHit,
    article_markdown, paginate, table_of_contents,
};
use quire_profile::{Profile, ProfileStatistics, ValidationSummary, YearMonth, summarize};

use crate::config::QuireConfig;

/// Article directory and output files for a build.
///
/// An explicit `--content-dir` gets its index files written inside it. The
/// configured output paths belong to the configured content directory.
pub fn build_target(config: &QuireConfig, content_dir: Option<PathBuf>) -> (PathBuf, IndexPaths) {
    match content_dir {
        Some(dir) => {
            let paths = IndexPaths::in_dir(&dir);
            (dir, paths)
        }
        None => (config.content_dir(), config.index_paths()),
    }
}

/// Run the index builder.
pub async fn build(
    config: &QuireConfig,
    content_dir: &Path,
    paths: &IndexPaths,
    if_changed: bool,
) -> Result<IndexStats> {
    IndexBuilder::new()
        .with_extractor(config.extractor())
        .recursive(config.content.recursive)
        .if_changed(if_changed)
        .build(content_dir, paths)
        .await
}

pub fn render_build(stats: &IndexStats, paths: &IndexPaths) -> String {
    if stats.up_to_date {
        return format!("Index is up to date ({} articles)", stats.entries_written);
    }

    let mut out = format!(
        "Indexed {} articles and {} tags",
        stats.entries_written, stats.tags_written
    );
    if stats.errors > 0 {
        let _ = write!(out, " ({} files could not be read)", stats.errors);
    }
    let _ = write!(
        out,
        "\n  {}\n  {}",
        paths.search_index.display(),
        paths.tag_index.display()
    );
    out
}

/// Load the search index named in the configuration.
pub fn load_catalog(config: &QuireConfig) -> Result<Catalog> {
    let path = config.index_paths().search_index;
    if !path.is_file() {
        return Err(Error::not_found(
            format!("{} (run `quire build` first)", path.display()),
            "search index",
        ));
    }
    Catalog::load(&path)
}

fn display_date(raw: &str) -> String {
    parse_index_date(raw)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn entry_line(entry: &SearchEntry) -> String {
    let mut line = format!(
        "{}  {}  {}",
        display_date(&entry.date),
        entry.slug,
        entry.title
    );
    if !entry.tags.is_empty() {
        let _ = write!(line, "  [{}]", entry.tags.join(", "));
    }
    line
}

fn page_header<T>(page: &Page<T>, requested: usize, noun: &str) -> String {
    let mut header = format!(
        "Page {}/{} ({} {noun})",
        page.current,
        page.total_pages.max(1),
        page.total_items
    );
    if page.was_clamped(requested) {
        let _ = write!(header, ", page {requested} is out of range");
    }
    header
}

/// Newest-first article listing, optionally filtered by tag.
pub fn list(catalog: &Catalog, tag: Option<&str>, page: usize, page_size: usize) -> String {
    let mut articles = catalog.articles(tag);
    quire_index::catalog::sort_newest_first(&mut articles);

    if articles.is_empty() {
        return match tag {
            Some(tag) => match catalog.suggest_tag(tag) {
                Some(suggestion) => {
                    format!("No articles tagged '{tag}'. Did you mean '{suggestion}'?")
                }
                None => format!("No articles tagged '{tag}'."),
            },
            None => "No articles.".to_string(),
        };
    }

    let shown = paginate(&articles, page, page_size);
    let mut out = page_header(&shown, page, "articles");
    for entry in &shown.items {
        let _ = write!(out, "\n{}", entry_line(entry));
    }
    out
}

/// Tag names with article counts, in index order.
pub fn tags(catalog: &Catalog) -> String {
    if catalog.tags().is_empty() {
        return "No tags.".to_string();
    }

    let width = catalog
        .tags()
        .iter()
        .map(|t| t.tag.chars().count())
        .max()
        .unwrap_or(0);

    catalog
        .tags()
        .iter()
        .map(|t| format!("{:<width$}  {}", t.tag, t.count()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fuzzy search results, paginated.
pub fn search(catalog: &Catalog, config: &QuireConfig, query: &str, page: usize) -> String {
    let search = FuzzySearch::new(catalog.entries(), config.search_options());
    let hits: Vec<SearchHit<'_>> = search.search(query);

    if hits.is_empty() {
        return format!("No results for '{}'.", query.trim());
    }

    let shown = paginate(&hits, page, config.search.page_size);
    let mut out = page_header(&shown, page, "results");
    for hit in &shown.items {
        let _ = write!(out, "\n{:.3}  {}", hit.score, entry_line(hit.entry));
    }
    out
}

/// Table of contents for one article, read from the content directory.
pub fn toc(content_dir: &Path, slug: &str) -> Result<String> {
    let markdown = article_markdown(content_dir, slug)?;
    let entries = table_of_contents(&markdown);

    if entries.is_empty() {
        return Ok(format!("{slug} has no section headings."));
    }

    Ok(entries
        .iter()
        .map(|e| {
            let indent = "  ".repeat(usize::from(e.level.saturating_sub(2)));
            format!("{indent}- {} (#{})", e.text, e.id)
        })
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Validate a profile file.
pub fn profile_validate(file: &Path) -> Result<ValidationSummary> {
    let profile = Profile::load(file)?;
    Ok(summarize(&profile))
}

pub fn render_validation(summary: &ValidationSummary) -> String {
    let mut out = summary.summary.clone();
    for issue in &summary.issues {
        let _ = write!(out, "\n  - {issue}");
    }
    out
}

/// Compute statistics for a profile file.
pub fn profile_stats(file: &Path, today: YearMonth) -> Result<ProfileStatistics> {
    let profile = Profile::load(file)?;
    Ok(ProfileStatistics::compute(&profile, today))
}

pub fn render_stats(stats: &ProfileStatistics) -> String {
    let top = stats
        .skills
        .top_skills
        .iter()
        .map(|s| format!("{} ({})", s.name, s.level))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Experience: {} years across {} positions, currently {}\n\
         Projects:   {} total, {} featured, {} active, {} completed\n\
         Skills:     {} in {} categories, average level {}\n\
         Top skills: {}\n\
         Contacts:   {} total, {} primary, {} social",
        stats.experience.total_years,
        stats.experience.total_positions,
        stats.experience.current_position,
        stats.projects.total,
        stats.projects.featured,
        stats.projects.active,
        stats.projects.completed,
        stats.skills.total,
        stats.skills.categories,
        stats.skills.average_level,
        if top.is_empty() { "none" } else { &top },
        stats.contacts.total,
        stats.contacts.primary,
        stats.contacts.social,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(slug: &str, date: &str, tags: &[&str]) -> SearchEntry {
        SearchEntry {
            title: slug.replace('-', " "),
            slug: slug.to_string(),
            summary: String::new(),
            content: format!("{slug}body"),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            category: "Uncategorized".to_string(),
            date: date.to_string(),
        }
    }

    fn catalog() -> Catalog {
        Catalog::from_entries(vec![
            entry("old-post", "2023-01-01T00:00:00.000Z", &["rust"]),
            entry("new-post", "2025-03-01T00:00:00.000Z", &["rust", "async"]),
            entry("mid-post", "2024-06-15T00:00:00.000Z", &["life"]),
        ])
    }

    // ------------------------------------------------------------------------
    // list / tags
    // ------------------------------------------------------------------------

    #[test]
    fn test_list_newest_first() {
        let out = list(&catalog(), None, 1, 10);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Page 1/1 (3 articles)");
        assert!(lines[1].starts_with("2025-03-01  new-post"));
        assert!(lines[3].starts_with("2023-01-01  old-post"));
    }

    #[test]
    fn test_list_tag_filter_and_paging() {
        let out = list(&catalog(), Some("rust"), 5, 1);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Page 2/2 (2 articles), page 5 is out of range");
        assert!(lines[1].contains("old-post"));
    }

    #[test]
    fn test_list_unknown_tag_suggests() {
        let out = list(&catalog(), Some("rusty"), 1, 10);
        assert_eq!(out, "No articles tagged 'rusty'. Did you mean 'rust'?");
    }

    #[test]
    fn test_tags_counts() {
        let out = tags(&catalog());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines, vec!["rust   2", "async  1", "life   1"]);
    }

    // ------------------------------------------------------------------------
    // search
    // ------------------------------------------------------------------------

    #[test]
    fn test_search_output() {
        let config = QuireConfig::default();
        let out = search(&catalog(), &config, "async", 1);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Page 1/1 (1 results)");
        assert!(lines[1].starts_with("0.000  2025-03-01  new-post"));
    }

    #[test]
    fn test_search_no_results() {
        let config = QuireConfig::default();
        assert_eq!(search(&catalog(), &config, "  zzzzzzzzzz ", 1), "No results for 'zzzzzzzzzz'.");
    }

    // ------------------------------------------------------------------------
    // toc / catalog loading
    // ------------------------------------------------------------------------

    #[test]
    fn test_toc_output() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("guide.md"),
            "# Guide\n\n## Setup\n\n### Install Rust\n\n## Setup\n",
        )
        .unwrap();

        let out = toc(dir.path(), "guide").unwrap();
        assert_eq!(
            out,
            "- Setup (#setup)\n  - Install Rust (#install-rust)\n- Setup (#setup-1)"
        );
    }

    #[test]
    fn test_toc_missing_article() {
        let dir = TempDir::new().unwrap();
        assert!(toc(dir.path(), "nope").unwrap_err().is_not_found());
    }

    #[test]
    fn test_load_catalog_missing_index() {
        let dir = TempDir::new().unwrap();
        let mut config = QuireConfig::default();
        config.index.search_index = dir.path().join("search-index.json").display().to_string();

        let err = load_catalog(&config).unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("quire build"));
    }

    // ------------------------------------------------------------------------
    // build
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_build_then_list() {
        let dir = TempDir::new().unwrap();
        let content = dir.path().join("blogs");
        std::fs::create_dir_all(&content).unwrap();
        std::fs::write(
            content.join("hello.md"),
            "---\ntitle: Hello\ntags: [intro]\ndate: 2025-01-01\n---\nHi there.\n",
        )
        .unwrap();

        let mut config = QuireConfig::default();
        config.content.dir = content.display().to_string();
        config.index.search_index = content.join("search-index.json").display().to_string();
        config.index.tag_index = content.join("tags.json").display().to_string();

        let (content_dir, paths) = build_target(&config, None);
        let stats = build(&config, &content_dir, &paths, false).await.unwrap();
        assert_eq!(stats.entries_written, 1);
        assert!(render_build(&stats, &paths).starts_with("Indexed 1 articles and 1 tags"));

        let again = build(&config, &content_dir, &paths, true).await.unwrap();
        assert!(again.up_to_date);
        assert_eq!(render_build(&again, &paths), "Index is up to date (1 articles)");

        let catalog = load_catalog(&config).unwrap();
        assert!(list(&catalog, None, 1, 10).contains("2025-01-01  hello  Hello  [intro]"));
    }

    #[test]
    fn test_build_target_uses_configured_paths() {
        let mut config = QuireConfig::default();
        config.content.dir = "site/posts".into();
        config.index.search_index = "public/search-index.json".into();

        let (content_dir, paths) = build_target(&config, None);
        assert_eq!(content_dir, PathBuf::from("site/posts"));
        assert_eq!(paths.search_index, PathBuf::from("public/search-index.json"));
    }

    #[tokio::test]
    async fn test_build_content_dir_override_writes_inside_it() {
        let dir = TempDir::new().unwrap();
        let drafts = dir.path().join("drafts");
        std::fs::create_dir_all(&drafts).unwrap();
        std::fs::write(drafts.join("wip.md"), "Work in progress").unwrap();

        let mut config = QuireConfig::default();
        let configured = dir.path().join("blogs");
        config.index.search_index = configured.join("search-index.json").display().to_string();
        config.index.tag_index = configured.join("tags.json").display().to_string();

        let (content_dir, paths) = build_target(&config, Some(drafts.clone()));
        assert_eq!(paths, IndexPaths::in_dir(&drafts));

        build(&config, &content_dir, &paths, false).await.unwrap();
        assert!(drafts.join("search-index.json").is_file());
        assert!(drafts.join("tags.json").is_file());
        assert!(!configured.exists());
    }

    // ------------------------------------------------------------------------
    // profile
    // ------------------------------------------------------------------------

    #[test]
    fn test_profile_validate_and_render() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("about.toml");
        std::fs::write(&path, "[[contacts]]\nid = \"gh\"\ntype = \"github\"\n").unwrap();

        let summary = profile_validate(&path).unwrap();
        assert!(!summary.is_valid);

        let out = render_validation(&summary);
        assert!(out.starts_with("Found "));
        assert!(out.contains("  - personalInfo: Personal info is required"));
        assert!(out.contains("  - contact[0].url: Contact url must be a valid URL"));
    }

    #[test]
    fn test_profile_stats_render() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("about.toml");
        std::fs::write(
            &path,
            "[[experiences]]\nposition = \"Engineer\"\nstartDate = \"2020-01\"\n",
        )
        .unwrap();

        let today = "2025-01".parse().unwrap();
        let stats = profile_stats(&path, today).unwrap();
        let out = render_stats(&stats);
        assert!(out.starts_with("Experience: 5 years across 1 positions, currently Engineer"));
        assert!(out.contains("Top skills: none"));
    }
}
