//! Utility modules for file discovery, path handling, and identifiers.
//!
//! # Modules
//!
//! - [`files`]: Async Markdown file discovery
//! - [`ids`]: Slugs and heading anchors
//! - [`paths`]: Tilde expansion

pub mod files;
pub mod ids;
pub mod paths;
