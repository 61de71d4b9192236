//! Shared fixtures for index integration tests.

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

/// A throwaway blog content directory.
pub struct BlogFixture {
    dir: TempDir,
}

impl BlogFixture {
    /// Creates an empty content directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    /// Creates the standard three-article blog used across tests.
    pub fn sample() -> Self {
        let blog = Self::new();
        blog.write(
            "ownership.md",
            "---\n\
             title: Understanding Ownership\n\
             tags: [rust, memory]\n\
             category: Rust\n\
             date: 2024-03-10\n\
             ---\n\
             # Understanding Ownership\n\
             \n\
             Every value has an *owner*.\n\
             <!--summary-->\n\
             \n\
             ## Moves\n\
             \n\
             Assignment moves the value.\n\
             \n\
             ### Copy types\n\
             \n\
             Integers are `Copy`.\n",
        );
        blog.write(
            "tokio-intro.md",
            "---\n\
             title: Getting Started with Tokio\n\
             tags: [rust, async]\n\
             date: 2024-07-01T09:30:00+02:00\n\
             ---\n\
             # Tokio\n\
             \n\
             The async runtime for Rust.\n",
        );
        blog.write(
            "随笔.md",
            "---\n\
             tags: life\n\
             date: 2023-12-31\n\
             ---\n\
             今天写了一点<b>代码</b>。\n",
        );
        blog
    }

    /// Writes an article (or any file) relative to the content root.
    pub fn write(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(path, content).expect("write fixture");
    }

    /// The content root.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of a file inside the content root.
    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

impl Default for BlogFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Build time pinned for deterministic undated articles.
pub fn build_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap()
}
