//! Markdown parsing, frontmatter extraction, and article text processing.
//!
//! This crate turns a raw article file into the pieces the index needs. It
//! performs no I/O.
//!
//! # Modules
//!
//! - [`markdown`]: Frontmatter extraction and markdown structure parsing
//! - [`metadata`]: Typed article metadata and date normalisation
//! - [`summary`]: Marker-based summary extraction with a heuristic fallback
//! - [`sanitize`]: Plain-text cleaning for the search index
//!
//! # Example
//!
//! ```rust
//! use quire_content::{ArticleMeta, clean_text, extract_frontmatter, extract_summary};
//!
//! let raw = "---\ntitle: Hello\ntags: [intro]\n---\n# Hello\n\nFirst *post*.\n";
//! let fm = extract_frontmatter(raw);
//! let meta = ArticleMeta::from_frontmatter(&fm);
//!
//! assert_eq!(meta.title.as_deref(), Some("Hello"));
//! assert_eq!(extract_summary(fm.body()), "\nFirst *post*.\n");
//! assert_eq!(clean_text(fm.body()), "HelloFirstpost.");
//! ```

pub mod markdown;
pub mod metadata;
pub mod sanitize;
pub mod summary;

// Re-export commonly used types
pub use markdown::{
    FrontmatterResult, Heading, extract_frontmatter, extract_headings, plain_text,
    strip_frontmatter,
};
pub use metadata::{ArticleMeta, normalize_date};
pub use sanitize::{SanitizeOptions, clean_text, clean_text_with};
pub use summary::{SummaryOptions, extract_summary, extract_summary_with};
