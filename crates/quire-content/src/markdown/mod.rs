//! Markdown parsing and frontmatter extraction utilities.
//!
//! - [`frontmatter`]: YAML frontmatter extraction
//! - [`parser`]: Headings and plain text

pub mod frontmatter;
pub mod parser;

// Re-export key types and functions
pub use frontmatter::{FrontmatterResult, extract_frontmatter, strip_frontmatter};
pub use parser::{Heading, extract_headings, plain_text};
