//! Article summary extraction.
//!
//! A summary is a short Markdown preview shown in article listings. Authors
//! mark where the preview ends with a marker comment:
//!
//! ```markdown
//! # Understanding Ownership
//!
//! Rust's ownership rules in five minutes.
//!
//! <!--summary-->
//!
//! The rest of the article...
//! ```
//!
//! Everything above the marker becomes the summary. Without a marker, the
//! lines following the first `#` heading are used.

/// Marker comment terminating the summary.
pub const DEFAULT_SUMMARY_MARKER: &str = "<!--summary-->";

/// Number of lines taken when no marker is present.
pub const DEFAULT_FALLBACK_LINES: usize = 5;

/// Summary extraction settings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SummaryOptions {
    /// Text whose first occurrence ends the summary.
    pub marker: String,
    /// Lines taken by the fallback heuristic.
    pub fallback_lines: usize,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            marker: DEFAULT_SUMMARY_MARKER.to_string(),
            fallback_lines: DEFAULT_FALLBACK_LINES,
        }
    }
}

/// Extract a summary from an article body using the default marker.
///
/// # Example
///
/// ```rust
/// use quire_content::summary::extract_summary;
///
/// let body = "Intro line\nMore intro\n<!--summary-->\nRest";
/// assert_eq!(extract_summary(body), "Intro line\nMore intro");
///
/// let body = "# Title\none\ntwo";
/// assert_eq!(extract_summary(body), "one\ntwo");
/// ```
pub fn extract_summary(body: &str) -> String {
    extract_summary_with(body, &SummaryOptions::default())
}

/// Extract a summary from an article body.
///
/// Lines are trimmed first. If any line contains the marker, the summary
/// is every line before the first such line. Otherwise see
/// [`fallback_summary`].
pub fn extract_summary_with(body: &str, options: &SummaryOptions) -> String {
    let lines: Vec<&str> = body.split('\n').map(str::trim).collect();

    if !options.marker.is_empty() {
        if let Some(marker_index) = lines.iter().position(|l| l.contains(&options.marker)) {
            return lines[..marker_index].join("\n");
        }
    }

    fallback_summary(&lines, options.fallback_lines)
}

/// Heuristic summary for articles without a marker.
///
/// Takes up to `count` lines after the first line starting with `#`, or the
/// first `count` lines when there is no such line.
pub fn fallback_summary(lines: &[&str], count: usize) -> String {
    let start = match lines.iter().position(|l| l.starts_with('#')) {
        Some(title_index) => title_index + 1,
        None => 0,
    };

    lines
        .iter()
        .skip(start)
        .take(count)
        .copied()
        .collect::<Vec<_>>()
        .join("\n")
}
