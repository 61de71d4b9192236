//! Build fingerprints for `quire build --if-changed`.
//!
//! A fingerprint covers the article set (relative paths and modification
//! times), the extractor settings and [`INDEX_FORMAT_VERSION`]. Article
//! contents are not read, and the generated JSON files never take part. The
//! record of the last build lives next to the search index.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::io::ErrorKind;
use std::path::Path;
use std::time::UNIX_EPOCH;

use quire_core::{Error, Result, find_markdown_files};
use serde::{Deserialize, Serialize};

use crate::builder::{ArticleExtractor, write_json_pretty};
use crate::entry::INDEX_FORMAT_VERSION;

/// File name of the build record, stored next to the search index.
pub const METADATA_FILE: &str = "quire-index-metadata.json";

/// What the last build saw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexMetadata {
    pub content_hash: String,
    /// Build time, in the same form as the index dates.
    pub indexed_at: String,
    pub entry_count: usize,
    pub format_version: u32,
}

impl IndexMetadata {
    pub fn new(content_hash: String, entry_count: usize, indexed_at: String) -> Self {
        Self {
            content_hash,
            indexed_at,
            entry_count,
            format_version: INDEX_FORMAT_VERSION,
        }
    }

    /// `true` if this record was written by the current index format for
    /// the same fingerprint.
    pub fn is_fresh(&self, content_hash: &str) -> bool {
        if self.format_version != INDEX_FORMAT_VERSION {
            log::info!(
                "Index format changed: stored={}, current={}",
                self.format_version,
                INDEX_FORMAT_VERSION
            );
            return false;
        }
        if self.content_hash != content_hash {
            log::debug!(
                "Articles changed: stored={}, current={}",
                self.content_hash,
                content_hash
            );
            return false;
        }
        true
    }

    /// Read the record from `dir`; `Ok(None)` when there is none yet.
    pub async fn load(dir: &Path) -> Result<Option<Self>> {
        let path = dir.join(METADATA_FILE);
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::io_with_path(e, &path)),
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| Error::parse(format!("Invalid index metadata JSON: {e}")))
    }

    /// Write the record into `dir`, creating it if needed.
    pub async fn save(&self, dir: &Path) -> Result<()> {
        write_json_pretty(&dir.join(METADATA_FILE), self).await
    }
}

/// Fingerprint the articles under `content_dir` together with the settings
/// that shape their entries.
pub async fn content_hash(
    content_dir: &Path,
    recursive: bool,
    extractor: &ArticleExtractor,
) -> Result<String> {
    let mut hasher = DefaultHasher::new();
    INDEX_FORMAT_VERSION.hash(&mut hasher);
    extractor.hash(&mut hasher);

    // sorted by find_markdown_files
    for path in find_markdown_files(content_dir, recursive).await? {
        let relative = path.strip_prefix(content_dir).unwrap_or(&path);

        let mtime = match tokio::fs::metadata(&path).await {
            Ok(meta) => meta
                .modified()
                .ok()
                .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                .map(|d| d.as_nanos())
                .unwrap_or(0),
            Err(e) => {
                log::warn!("Cannot stat {}: {}", path.display(), e);
                0
            }
        };

        relative.hash(&mut hasher);
        mtime.hash(&mut hasher);
    }

    Ok(format!("{:016x}", hasher.finish()))
}
