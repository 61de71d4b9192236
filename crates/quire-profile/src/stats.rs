//! Derived views over a [`Profile`]: sorting, filtering, durations and
//! the aggregate [`ProfileStatistics`].
//!
//! Functions that depend on "now" take a `today: YearMonth` argument so
//! callers (and tests) decide what the current month is.

use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use quire_core::{Error, Result};
use serde::Serialize;

use crate::model::{Contact, Experience, Profile, Project, Skill, SkillCategory};

/// Contact types shown as social links.
pub const SOCIAL_CONTACT_TYPES: [&str; 4] = ["github", "linkedin", "twitter", "website"];

/// Number of skills listed in [`SkillStats::top_skills`].
pub const STATS_TOP_SKILLS: usize = 3;

/// A calendar month, written `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    /// 1 to 12.
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::validation(format!("month out of range: {month}")));
        }
        Ok(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The current month in local time.
    pub fn current() -> Self {
        Self::from_date(chrono::Local::now().date_naive())
    }

    /// Whole months from `self` to `end`; negative if `end` is earlier.
    pub fn months_until(self, end: YearMonth) -> i64 {
        i64::from(end.year - self.year) * 12 + (i64::from(end.month) - i64::from(self.month))
    }
}

impl FromStr for YearMonth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::parse(format!("Invalid year-month '{s}', expected YYYY-MM"));

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.is_empty() || month.len() > 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        Self::new(year, month).map_err(|_| invalid())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

fn parse_month(value: Option<&str>) -> Option<YearMonth> {
    value.and_then(|v| v.parse().ok())
}

/// Months covered by `start..end`, with a missing or unreadable end meaning
/// `today`. `None` when the start cannot be read; never negative.
fn span_months(start: &str, end: Option<&str>, today: YearMonth) -> Option<i64> {
    let start: YearMonth = start.parse().ok()?;
    let end = parse_month(end).unwrap_or(today);
    Some(start.months_until(end).max(0))
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

/// Human-readable length of a period, e.g. "2 years 3 months".
///
/// Under a year only months are shown; whole years omit the months. An
/// unreadable start yields an empty string.
pub fn format_duration(start: &str, end: Option<&str>, today: YearMonth) -> String {
    let Some(months) = span_months(start, end, today) else {
        return String::new();
    };

    let (years, rest) = (months / 12, months % 12);
    match (years, rest) {
        (0, m) => plural(m, "month"),
        (y, 0) => plural(y, "year"),
        (y, m) => format!("{} {}", plural(y, "year"), plural(m, "month")),
    }
}

// ============================================================================
// Experience
// ============================================================================

/// Experiences by start month, newest first. Unreadable starts sort last.
pub fn experiences_newest_first(experiences: &[Experience]) -> Vec<&Experience> {
    let mut sorted: Vec<&Experience> = experiences.iter().collect();
    sorted.sort_by_key(|e| Reverse(e.start_date.parse::<YearMonth>().ok()));
    sorted
}

/// The first position without an end date.
pub fn current_experience(experiences: &[Experience]) -> Option<&Experience> {
    experiences.iter().find(|e| e.is_current())
}

pub fn past_experiences(experiences: &[Experience]) -> Vec<&Experience> {
    experiences.iter().filter(|e| !e.is_current()).collect()
}

pub fn experiences_by_type<'a>(experiences: &'a [Experience], kind: &str) -> Vec<&'a Experience> {
    experiences.iter().filter(|e| e.kind == kind).collect()
}

/// Sum of all experience spans in years, rounded to one decimal.
/// Overlapping positions are counted twice.
pub fn total_experience_years(experiences: &[Experience], today: YearMonth) -> f64 {
    let months: i64 = experiences
        .iter()
        .filter_map(|e| span_months(&e.start_date, e.end_date.as_deref(), today))
        .sum();

    (months as f64 / 12.0 * 10.0).round() / 10.0
}

// ============================================================================
// Projects
// ============================================================================

pub fn featured_projects(projects: &[Project]) -> Vec<&Project> {
    projects.iter().filter(|p| p.is_featured()).collect()
}

pub fn projects_by_status<'a>(projects: &'a [Project], status: &str) -> Vec<&'a Project> {
    projects.iter().filter(|p| p.status == status).collect()
}

pub fn projects_by_category<'a>(projects: &'a [Project], category: &str) -> Vec<&'a Project> {
    projects.iter().filter(|p| p.category == category).collect()
}

/// Projects using a technology whose name contains `technology`,
/// ignoring case.
pub fn projects_by_technology<'a>(projects: &'a [Project], technology: &str) -> Vec<&'a Project> {
    let needle = technology.to_lowercase();
    projects
        .iter()
        .filter(|p| contains_ci(&p.technologies, &needle))
        .collect()
}

/// Projects by start month, newest first. Projects without a readable
/// start sort last.
pub fn projects_newest_first(projects: &[Project]) -> Vec<&Project> {
    let mut sorted: Vec<&Project> = projects.iter().collect();
    sorted.sort_by_key(|p| Reverse(parse_month(p.start_date.as_deref())));
    sorted
}

/// Ordering for [`ProjectQuery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectSort {
    /// Newest start month first.
    Date,
    Title,
}

/// Filter, sort and limit settings for project listings.
#[derive(Debug, Clone, Default)]
pub struct ProjectQuery {
    pub featured: Option<bool>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub technology: Option<String>,
    pub sort: Option<ProjectSort>,
    /// Maximum number of results; 0 means no limit.
    pub limit: usize,
}

impl ProjectQuery {
    pub fn apply<'a>(&self, projects: &'a [Project]) -> Vec<&'a Project> {
        let technology = self.technology.as_deref().map(str::to_lowercase);

        let mut result: Vec<&Project> = projects
            .iter()
            .filter(|p| self.featured.is_none_or(|f| p.is_featured() == f))
            .filter(|p| self.status.as_deref().is_none_or(|s| p.status == s))
            .filter(|p| self.category.as_deref().is_none_or(|c| p.category == c))
            .filter(|p| {
                technology
                    .as_deref()
                    .is_none_or(|t| contains_ci(&p.technologies, t))
            })
            .collect();

        match self.sort {
            Some(ProjectSort::Date) => {
                result.sort_by_key(|p| Reverse(parse_month(p.start_date.as_deref())));
            }
            Some(ProjectSort::Title) => {
                result.sort_by_cached_key(|p| p.title.to_lowercase());
            }
            None => {}
        }

        if self.limit > 0 {
            result.truncate(self.limit);
        }
        result
    }
}

// ============================================================================
// Skills
// ============================================================================

/// Every skill across all categories, in order.
pub fn all_skills(categories: &[SkillCategory]) -> Vec<&Skill> {
    categories.iter().flat_map(|c| c.skills.iter()).collect()
}

/// Skills of the category with the given id.
pub fn skills_in_category<'a>(categories: &'a [SkillCategory], id: &str) -> &'a [Skill] {
    categories
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.skills.as_slice())
        .unwrap_or_default()
}

/// Skills with `min <= level <= max`.
pub fn skills_by_level(categories: &[SkillCategory], min: f64, max: f64) -> Vec<&Skill> {
    all_skills(categories)
        .into_iter()
        .filter(|s| (min..=max).contains(&s.level_or_zero()))
        .collect()
}

/// Skills whose own `category` field equals `kind`.
pub fn skills_by_type<'a>(categories: &'a [SkillCategory], kind: &str) -> Vec<&'a Skill> {
    all_skills(categories)
        .into_iter()
        .filter(|s| s.category == kind)
        .collect()
}

/// The `count` highest-level skills. Equal levels keep their order.
pub fn top_skills(categories: &[SkillCategory], count: usize) -> Vec<&Skill> {
    let mut skills = all_skills(categories);
    skills.sort_by(|a, b| b.level_or_zero().total_cmp(&a.level_or_zero()));
    skills.truncate(count);
    skills
}

/// Mean skill level rounded to the nearest integer; 0 without skills.
pub fn average_skill_level(categories: &[SkillCategory]) -> u32 {
    let skills = all_skills(categories);
    if skills.is_empty() {
        return 0;
    }

    let total: f64 = skills.iter().map(|s| s.level_or_zero()).sum();
    (total / skills.len() as f64).round().max(0.0) as u32
}

// ============================================================================
// Contacts
// ============================================================================

pub fn primary_contacts(contacts: &[Contact]) -> Vec<&Contact> {
    contacts.iter().filter(|c| c.is_primary()).collect()
}

pub fn public_contacts(contacts: &[Contact]) -> Vec<&Contact> {
    contacts.iter().filter(|c| c.is_public()).collect()
}

pub fn contact_by_type<'a>(contacts: &'a [Contact], kind: &str) -> Option<&'a Contact> {
    contacts.iter().find(|c| c.kind == kind)
}

pub fn social_contacts(contacts: &[Contact]) -> Vec<&Contact> {
    contacts
        .iter()
        .filter(|c| SOCIAL_CONTACT_TYPES.contains(&c.kind.as_str()))
        .collect()
}

// ============================================================================
// Text search
// ============================================================================

fn contains_ci(values: &[String], needle: &str) -> bool {
    values.iter().any(|v| v.to_lowercase().contains(needle))
}

fn any_contains(fields: &[&str], needle: &str) -> bool {
    fields.iter().any(|f| f.to_lowercase().contains(needle))
}

/// Projects whose title, description, category or a technology contains
/// `query`, ignoring case.
pub fn search_projects<'a>(projects: &'a [Project], query: &str) -> Vec<&'a Project> {
    let q = query.to_lowercase();
    projects
        .iter()
        .filter(|p| {
            any_contains(&[p.title.as_str(), p.description.as_str(), p.category.as_str()], &q)
                || contains_ci(&p.technologies, &q)
        })
        .collect()
}

pub fn search_skills<'a>(categories: &'a [SkillCategory], query: &str) -> Vec<&'a Skill> {
    let q = query.to_lowercase();
    all_skills(categories)
        .into_iter()
        .filter(|s| any_contains(&[s.name.as_str(), s.category.as_str()], &q))
        .collect()
}

pub fn search_experiences<'a>(experiences: &'a [Experience], query: &str) -> Vec<&'a Experience> {
    let q = query.to_lowercase();
    experiences
        .iter()
        .filter(|e| {
            any_contains(&[e.company.as_str(), e.position.as_str(), e.description.as_str()], &q)
                || contains_ci(&e.technologies, &q)
        })
        .collect()
}

// ============================================================================
// Statistics
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceStats {
    pub total_years: f64,
    /// Position of the current role, or `"N/A"`.
    pub current_position: String,
    pub total_positions: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectStats {
    pub total: usize,
    pub featured: usize,
    pub active: usize,
    pub completed: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopSkill {
    pub name: String,
    pub level: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillStats {
    pub total: usize,
    pub average_level: u32,
    pub categories: usize,
    pub top_skills: Vec<TopSkill>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactStats {
    pub total: usize,
    pub primary: usize,
    pub social: usize,
}

/// Aggregate counts for an about page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileStatistics {
    pub experience: ExperienceStats,
    pub projects: ProjectStats,
    pub skills: SkillStats,
    pub contacts: ContactStats,
}

impl ProfileStatistics {
    pub fn compute(profile: &Profile, today: YearMonth) -> Self {
        let experiences = &profile.experiences;
        let projects = &profile.projects;
        let categories = &profile.skill_categories;
        let contacts = &profile.contacts;

        let current_position = current_experience(experiences)
            .map(|e| e.position.as_str())
            .filter(|p| !p.is_empty())
            .unwrap_or("N/A")
            .to_string();

        Self {
            experience: ExperienceStats {
                total_years: total_experience_years(experiences, today),
                current_position,
                total_positions: experiences.len(),
            },
            projects: ProjectStats {
                total: projects.len(),
                featured: featured_projects(projects).len(),
                active: projects_by_status(projects, "active").len(),
                completed: projects_by_status(projects, "completed").len(),
            },
            skills: SkillStats {
                total: all_skills(categories).len(),
                average_level: average_skill_level(categories),
                categories: categories.len(),
                top_skills: top_skills(categories, STATS_TOP_SKILLS)
                    .into_iter()
                    .map(|s| TopSkill {
                        name: s.name.clone(),
                        level: s.level_or_zero(),
                    })
                    .collect(),
            },
            contacts: ContactStats {
                total: contacts.len(),
                primary: primary_contacts(contacts).len(),
                social: social_contacts(contacts).len(),
            },
        }
    }
}
