//! Typed article metadata read from frontmatter.
//!
//! Only four frontmatter keys matter to the index: `title`, `tags`,
//! `category`, and `date`. Each is optional here; defaults are applied by
//! the index builder, which knows the slug and the build time.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

use crate::markdown::FrontmatterResult;

/// Article metadata extracted from frontmatter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleMeta {
    /// Article title.
    pub title: Option<String>,
    /// Tags, in frontmatter order.
    pub tags: Vec<String>,
    /// Category.
    pub category: Option<String>,
    /// Publication date. Plain YAML dates are normalised by
    /// [`normalize_date`]; quoted strings are kept as written.
    pub date: Option<String>,
}

impl ArticleMeta {
    /// Read metadata from parsed frontmatter.
    ///
    /// # Example
    ///
    /// ```rust
    /// use quire_content::{ArticleMeta, extract_frontmatter};
    ///
    /// let fm = extract_frontmatter("---\ntitle: Hi\ndate: 2024-05-01\n---\nBody");
    /// let meta = ArticleMeta::from_frontmatter(&fm);
    /// assert_eq!(meta.title.as_deref(), Some("Hi"));
    /// assert_eq!(meta.date.as_deref(), Some("2024-05-01T00:00:00.000Z"));
    /// ```
    pub fn from_frontmatter(frontmatter: &FrontmatterResult<'_>) -> Self {
        Self {
            title: frontmatter.get_scalar("title"),
            tags: frontmatter.get_string_list("tags"),
            category: frontmatter.get_scalar("category"),
            date: frontmatter.get_scalar("date").map(|raw| {
                if frontmatter.is_plain_scalar("date") {
                    normalize_date(&raw)
                } else {
                    raw
                }
            }),
        }
    }
}

/// Normalise a frontmatter date to an ISO-8601 UTC timestamp.
///
/// - `YYYY-MM-DD` becomes midnight UTC
/// - RFC 3339 timestamps are converted to UTC
/// - `YYYY-MM-DD HH:MM[:SS]` and `YYYY-MM-DDTHH:MM[:SS]` are taken as UTC
///
/// All of these render with millisecond precision and a `Z` suffix. Any
/// other value is returned unchanged.
///
/// # Example
///
/// ```rust
/// use quire_content::metadata::normalize_date;
///
/// assert_eq!(normalize_date("2023-12-25"), "2023-12-25T00:00:00.000Z");
/// assert_eq!(normalize_date("2023-12-25T08:30:00+08:00"), "2023-12-25T00:30:00.000Z");
/// assert_eq!(normalize_date("last spring"), "last spring");
/// ```
pub fn normalize_date(raw: &str) -> String {
    let trimmed = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return format_utc(midnight.and_utc());
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return format_utc(dt.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ];
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return format_utc(naive.and_utc());
        }
    }

    raw.to_string()
}

/// Render a UTC timestamp the way the index stores dates.
pub fn format_utc(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a stored index date back into a timestamp.
///
/// Accepts everything [`normalize_date`] produces plus bare dates; returns
/// `None` for free-form strings.
pub fn parse_index_date(value: &str) -> Option<DateTime<Utc>> {
    let normalized = normalize_date(value);
    DateTime::parse_from_rfc3339(&normalized)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
