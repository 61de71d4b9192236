//! About-page profile data for Quire.
//!
//! A profile is a single TOML (or JSON) file describing the author:
//! personal info, grouped skills, work history, projects, and contact
//! links.
//!
//! - [`model`]: the typed data and loading
//! - [`validate`]: field-by-field checks with paths like `experience[0].company`
//! - [`stats`]: sorting, filtering, durations and aggregate statistics
//!
//! ```rust
//! use quire_profile::{Profile, summarize};
//!
//! let profile = Profile::from_toml_str("").unwrap();
//! let summary = summarize(&profile);
//! assert!(!summary.is_valid);
//! assert_eq!(summary.issues[0].field, "personalInfo");
//! ```

pub mod model;
pub mod stats;
pub mod validate;

// Re-exports
pub use model::{
    Avatar, Bio, Contact, Experience, PersonalInfo, Profile, Project, Skill, SkillCategory,
};
pub use stats::{ProfileStatistics, ProjectQuery, ProjectSort, YearMonth, format_duration};
pub use validate::{ValidationIssue, ValidationSummary, summarize, validate};
