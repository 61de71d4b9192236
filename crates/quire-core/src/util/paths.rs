//! Path helpers.

use std::path::PathBuf;

/// Expand a leading `~` to the user's home directory.
///
/// Paths without a tilde are returned unchanged.
///
/// # Example
///
/// ```
/// use quire_core::util::paths::expand_tilde;
///
/// assert_eq!(expand_tilde("/srv/blogs"), std::path::PathBuf::from("/srv/blogs"));
/// ```
pub fn expand_tilde(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}
