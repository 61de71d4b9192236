//! Fuzzy search against a built index.

use quire_index::{Catalog, FuzzySearch, IndexBuilder, IndexPaths, MatchedKey, SearchOptions};

use crate::common::BlogFixture;

async fn catalog() -> Catalog {
    let blog = BlogFixture::sample();
    let paths = IndexPaths::in_dir(blog.path());
    IndexBuilder::new().build(blog.path(), &paths).await.unwrap();
    Catalog::load(&paths.search_index).unwrap()
}

#[tokio::test]
async fn test_search_finds_content_match_first() {
    let catalog = catalog().await;
    let search = FuzzySearch::new(catalog.entries(), SearchOptions::default());

    let hits = search.search("tokio");
    assert_eq!(hits[0].entry.slug, "tokio-intro");
    assert_eq!(hits[0].score, 0.0);
    assert_eq!(hits[0].key, MatchedKey::Content);
}

#[tokio::test]
async fn test_search_tolerates_typos_in_tags() {
    let catalog = catalog().await;
    let search = FuzzySearch::new(catalog.entries(), SearchOptions::default());

    let hits = search.search("memroy");
    assert!(!hits.is_empty());
    assert_eq!(hits[0].entry.slug, "ownership");
}

#[tokio::test]
async fn test_search_cjk_query() {
    let catalog = catalog().await;
    let search = FuzzySearch::new(catalog.entries(), SearchOptions::default());

    let hits = search.search("代码");
    assert_eq!(hits[0].entry.slug, "随笔");
}

#[tokio::test]
async fn test_search_blank_query_returns_nothing() {
    let catalog = catalog().await;
    let search = FuzzySearch::new(catalog.entries(), SearchOptions::default());
    assert!(search.search("  ").is_empty());
}
