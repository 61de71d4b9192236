//! Article file discovery.
//!
//! Articles are files whose name ends in `.md` (case-sensitive). By default
//! only the top level of the content directory is scanned; nested
//! directories are walked when `recursive` is set.

use std::path::{Path, PathBuf};

use async_walkdir::WalkDir;
use futures::StreamExt;

use crate::util::ids::MARKDOWN_EXTENSION;
use crate::{Error, Result};

/// Find all Markdown articles under `root`.
///
/// Returns paths sorted lexicographically so that builds are deterministic
/// regardless of filesystem enumeration order.
///
/// # Errors
///
/// Returns `Error::NotFound` if `root` does not exist or is not a directory.
pub async fn find_markdown_files(root: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(Error::not_found(
            root.to_string_lossy(),
            "content directory",
        ));
    }

    let mut files = if recursive {
        walk_recursive(root).await
    } else {
        list_top_level(root).await?
    };

    files.sort();
    log::debug!("Found {} markdown files in {:?}", files.len(), root);
    Ok(files)
}

async fn list_top_level(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut entries = tokio::fs::read_dir(root)
        .await
        .map_err(|e| Error::io_with_path(e, root))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| Error::io_with_path(e, root))?
    {
        let path = entry.path();
        if path.is_file() && is_markdown(&path) {
            files.push(path);
        }
    }

    Ok(files)
}

async fn walk_recursive(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut walker = WalkDir::new(root);

    while let Some(entry) = walker.next().await {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                log::warn!("Walk error: {}", e);
                continue;
            }
        };

        let path = entry.path();
        if path.is_file() && is_markdown(&path) {
            files.push(path);
        }
    }

    files
}

/// Returns `true` if the file name ends in `.md`.
pub fn is_markdown(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.ends_with(MARKDOWN_EXTENSION) && n.len() > MARKDOWN_EXTENSION.len())
        .unwrap_or(false)
}
