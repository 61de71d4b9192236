//! Build a blog on disk, then read it back through the catalog.

use quire_index::{
    Catalog, IndexBuilder, IndexPaths, SearchEntry, TagEntry, article_markdown, paginate,
    table_of_contents,
};

use crate::common::{BlogFixture, build_time};

async fn build(blog: &BlogFixture) -> (IndexPaths, Catalog) {
    let paths = IndexPaths::in_dir(blog.path());
    IndexBuilder::new()
        .with_build_time(build_time())
        .build(blog.path(), &paths)
        .await
        .expect("build should succeed");
    let catalog = Catalog::load(&paths.search_index).expect("load catalog");
    (paths, catalog)
}

#[tokio::test]
async fn test_entries_follow_frontmatter_and_defaults() {
    let blog = BlogFixture::sample();
    let (_, catalog) = build(&blog).await;

    let slugs: Vec<&str> = catalog.entries().iter().map(|e| e.slug.as_str()).collect();
    assert_eq!(slugs, vec!["ownership", "tokio-intro", "随笔"]);

    let ownership = catalog.get("ownership").unwrap();
    assert_eq!(ownership.title, "Understanding Ownership");
    assert_eq!(
        ownership.summary,
        "# Understanding Ownership\n\nEvery value has an *owner*."
    );
    assert_eq!(
        ownership.content,
        "UnderstandingOwnershipEveryvaluehasanowner.MovesAssignmentmovesthevalue.CopytypesIntegersareCopy."
    );
    assert_eq!(ownership.category, "Rust");
    assert_eq!(ownership.date, "2024-03-10T00:00:00.000Z");

    let tokio = catalog.get("tokio-intro").unwrap();
    assert_eq!(tokio.summary, "\nThe async runtime for Rust.\n");
    assert_eq!(tokio.category, "Uncategorized");
    assert_eq!(tokio.date, "2024-07-01T07:30:00.000Z");

    let essay = catalog.get("随笔").unwrap();
    assert_eq!(essay.title, "随笔");
    assert_eq!(essay.tags, vec!["life"]);
    assert_eq!(essay.content, "今天写了一点代码");
}

#[tokio::test]
async fn test_undated_article_gets_build_time() {
    let blog = BlogFixture::new();
    blog.write("draft.md", "# Draft\n\nNo date yet.");
    let (_, catalog) = build(&blog).await;

    assert_eq!(catalog.entries()[0].date, "2025-01-02T03:04:05.000Z");
}

#[tokio::test]
async fn test_tag_file_matches_entries() {
    let blog = BlogFixture::sample();
    let (paths, catalog) = build(&blog).await;

    let on_disk: Vec<TagEntry> =
        serde_json::from_str(&std::fs::read_to_string(&paths.tag_index).unwrap()).unwrap();
    assert_eq!(on_disk, catalog.tags());

    let names: Vec<&str> = on_disk.iter().map(|t| t.tag.as_str()).collect();
    assert_eq!(names, vec!["rust", "memory", "async", "life"]);
    assert_eq!(on_disk[0].articles, vec!["ownership", "tokio-intro"]);

    for tag in &on_disk {
        for slug in &tag.articles {
            assert!(catalog.get(slug).unwrap().has_tag(&tag.tag));
        }
    }
}

#[tokio::test]
async fn test_search_index_is_pretty_printed_in_field_order() {
    let blog = BlogFixture::new();
    blog.write("only.md", "---\ntitle: Only\n---\nText");
    let (paths, _) = build(&blog).await;

    let raw = std::fs::read_to_string(&paths.search_index).unwrap();
    let expected = "[\n  {\n    \"title\": \"Only\",\n    \"slug\": \"only\",\n    \"summary\": \"Text\",\n    \"content\": \"Text\",\n    \"tags\": [],\n    \"category\": \"Uncategorized\",\n    \"date\": \"2025-01-02T03:04:05.000Z\"\n  }\n]";
    assert_eq!(raw, expected);

    let parsed: Vec<SearchEntry> = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed.len(), 1);
}

#[tokio::test]
async fn test_listing_newest_first_with_paging() {
    let blog = BlogFixture::sample();
    let (_, catalog) = build(&blog).await;

    let newest: Vec<&str> = catalog
        .newest_first()
        .iter()
        .map(|e| e.slug.as_str())
        .collect();
    assert_eq!(newest, vec!["tokio-intro", "ownership", "随笔"]);

    let listing = catalog.newest_first();
    let page = paginate(&listing, 5, 2);
    assert_eq!(page.current, 2);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].slug, "随笔");

    let rust = catalog.articles(Some("rust"));
    assert_eq!(rust.len(), 2);
    assert_eq!(catalog.suggest_tag("rusty"), Some("rust"));
}

#[tokio::test]
async fn test_table_of_contents_for_built_article() {
    let blog = BlogFixture::sample();
    let (_, catalog) = build(&blog).await;
    assert!(catalog.get("ownership").is_some());

    let markdown = article_markdown(blog.path(), "ownership").unwrap();
    let toc = table_of_contents(&markdown);
    let items: Vec<(u8, &str, &str)> = toc
        .iter()
        .map(|t| (t.level, t.text.as_str(), t.id.as_str()))
        .collect();
    assert_eq!(
        items,
        vec![(2, "Moves", "moves"), (3, "Copy types", "copy-types")]
    );
}

#[tokio::test]
async fn test_if_changed_rebuilds_after_new_article() {
    let blog = BlogFixture::sample();
    let paths = IndexPaths::in_dir(blog.path());

    let first = IndexBuilder::new().build(blog.path(), &paths).await.unwrap();
    assert_eq!(first.entries_written, 3);

    let fresh = IndexBuilder::new()
        .if_changed(true)
        .build(blog.path(), &paths)
        .await
        .unwrap();
    assert!(fresh.up_to_date);

    blog.write("new-post.md", "# New\n\nHello.");
    let rebuilt = IndexBuilder::new()
        .if_changed(true)
        .build(blog.path(), &paths)
        .await
        .unwrap();
    assert!(!rebuilt.up_to_date);
    assert_eq!(rebuilt.entries_written, 4);
}

#[tokio::test]
async fn test_separate_output_directory() {
    let blog = BlogFixture::sample();
    let out = tempfile::TempDir::new().unwrap();
    let paths = IndexPaths {
        search_index: out.path().join("data/search-index.json"),
        tag_index: out.path().join("data/tags.json"),
    };

    IndexBuilder::new().build(blog.path(), &paths).await.unwrap();

    assert!(paths.exist());
    assert!(!blog.join("search-index.json").exists());
    assert_eq!(Catalog::load(&paths.search_index).unwrap().len(), 3);
}
