//! Identifier utilities.
//!
//! Two kinds of identifier show up in Quire:
//!
//! - **slugs**: article identifiers derived from file paths, kept verbatim
//!   (case and non-ASCII characters preserved) because the site uses them
//!   directly in URLs
//! - **heading anchors**: GitHub-style ids for table-of-contents entries

use std::collections::HashMap;
use std::path::Path;

/// File extension recognised as an article.
pub const MARKDOWN_EXTENSION: &str = ".md";

/// Compute an article slug from its path relative to the content root.
///
/// The `.md` extension is removed and path separators become `/`. Nothing
/// else is changed. Returns `None` if `path` is not under `root` or does not
/// end in `.md`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use quire_core::util::ids::slug_from_path;
///
/// let root = Path::new("/site/blogs");
/// assert_eq!(
///     slug_from_path(root, Path::new("/site/blogs/Hello World.md")),
///     Some("Hello World".to_string())
/// );
/// assert_eq!(
///     slug_from_path(root, Path::new("/site/blogs/rust/intro.md")),
///     Some("rust/intro".to_string())
/// );
/// assert_eq!(slug_from_path(root, Path::new("/site/blogs/notes.txt")), None);
/// ```
pub fn slug_from_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    let joined = parts.join("/");
    let slug = joined.strip_suffix(MARKDOWN_EXTENSION)?;
    if slug.is_empty() {
        None
    } else {
        Some(slug.to_string())
    }
}

/// GitHub-style heading anchor generator.
///
/// Produces the same ids GitHub (and `github-slugger`) assign to rendered
/// headings: lowercase, punctuation dropped, each space replaced by `-`.
/// Repeated slugs within one document receive `-1`, `-2`, ... suffixes, so
/// a fresh `Slugger` must be used per document.
///
/// # Example
///
/// ```
/// use quire_core::util::ids::Slugger;
///
/// let mut slugger = Slugger::new();
/// assert_eq!(slugger.slug("Getting Started!"), "getting-started");
/// assert_eq!(slugger.slug("Getting Started"), "getting-started-1");
/// assert_eq!(slugger.slug("安装 步骤"), "安装-步骤");
/// ```
#[derive(Debug, Default, Clone)]
pub struct Slugger {
    occurrences: HashMap<String, usize>,
}

impl Slugger {
    /// Create a slugger with no recorded headings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a unique anchor for `text`.
    pub fn slug(&mut self, text: &str) -> String {
        let original = anchor(text);
        let mut result = original.clone();

        while self.occurrences.contains_key(&result) {
            let count = self.occurrences.entry(original.clone()).or_insert(0);
            *count += 1;
            result = format!("{original}-{count}");
        }

        self.occurrences.insert(result.clone(), 0);
        result
    }

    /// Forget all recorded slugs.
    pub fn reset(&mut self) {
        self.occurrences.clear();
    }
}

fn anchor(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            '-' | '_' => Some(c),
            c if c.is_alphanumeric() => Some(c),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // slug_from_path tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_slug_preserves_case_and_spaces() {
        let root = Path::new("/blogs");
        let path = Path::new("/blogs/My First Post.md");
        assert_eq!(
            slug_from_path(root, path),
            Some("My First Post".to_string())
        );
    }

    #[test]
    fn test_slug_preserves_cjk() {
        let root = Path::new("/blogs");
        let path = Path::new("/blogs/并发编程.md");
        assert_eq!(slug_from_path(root, path), Some("并发编程".to_string()));
    }

    #[test]
    fn test_slug_nested_uses_forward_slashes() {
        let root = Path::new("/blogs");
        let path = Path::new("/blogs/2024/recap.md");
        assert_eq!(slug_from_path(root, path), Some("2024/recap".to_string()));
    }

    #[test]
    fn test_slug_requires_md_extension() {
        let root = Path::new("/blogs");
        assert_eq!(slug_from_path(root, Path::new("/blogs/readme.MD")), None);
        assert_eq!(slug_from_path(root, Path::new("/blogs/tags.json")), None);
    }

    #[test]
    fn test_slug_outside_root() {
        let root = Path::new("/blogs");
        assert_eq!(slug_from_path(root, Path::new("/other/post.md")), None);
    }

    #[test]
    fn test_slug_bare_extension() {
        let root = Path::new("/blogs");
        assert_eq!(slug_from_path(root, Path::new("/blogs/.md")), None);
    }

    // -------------------------------------------------------------------------
    // Slugger tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_slugger_basic() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.slug("Hello World"), "hello-world");
    }

    #[test]
    fn test_slugger_strips_punctuation() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.slug("What's new in v2.0?"), "whats-new-in-v20");
    }

    #[test]
    fn test_slugger_keeps_each_space() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.slug("a  b"), "a--b");
    }

    #[test]
    fn test_slugger_duplicates() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.slug("Setup"), "setup");
        assert_eq!(slugger.slug("Setup"), "setup-1");
        assert_eq!(slugger.slug("Setup"), "setup-2");
    }

    #[test]
    fn test_slugger_suffix_collision() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.slug("foo-1"), "foo-1");
        assert_eq!(slugger.slug("foo"), "foo");
        assert_eq!(slugger.slug("foo"), "foo-2");
    }

    #[test]
    fn test_slugger_reset() {
        let mut slugger = Slugger::new();
        slugger.slug("Intro");
        slugger.reset();
        assert_eq!(slugger.slug("Intro"), "intro");
    }
}
