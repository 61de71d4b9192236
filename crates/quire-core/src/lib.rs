//! Quire Core: shared types, traits, errors, and utilities.
//!
//! This crate provides the foundational types used across all Quire crates.
//! It has no internal Quire dependencies.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`traits`]: Configuration management trait
//! - [`util`]: File discovery, path, and identifier utilities

#![doc = include_str!("../README.md")]

pub mod error;
pub mod traits;
pub mod util;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use traits::ConfigManager;

// Convenience re-exports from util
pub use util::files::find_markdown_files;
pub use util::ids::{Slugger, slug_from_path};
