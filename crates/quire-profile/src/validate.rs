//! Profile validation.
//!
//! Validation never stops at the first problem: every violation is
//! collected as a [`ValidationIssue`] whose `field` is a path into the
//! profile (`experience[0].company`,
//! `skillCategory[1].skills.skill[2].level`).

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::model::{Contact, Experience, PersonalInfo, Profile, Project, Skill, SkillCategory};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex")
});

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Path of the offending field.
    pub field: String,
    /// Human-readable description.
    pub message: String,
}

impl ValidationIssue {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Outcome of validating a whole profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub is_valid: bool,
    pub error_count: usize,
    pub issues: Vec<ValidationIssue>,
    /// One-line verdict, e.g. "Found 2 validation errors".
    pub summary: String,
}

impl ValidationSummary {
    pub fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        let error_count = issues.len();
        let summary = match error_count {
            0 => "All data is valid".to_string(),
            1 => "Found 1 validation error".to_string(),
            n => format!("Found {n} validation errors"),
        };

        Self {
            is_valid: error_count == 0,
            error_count,
            issues,
            summary,
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn is_url(value: &str) -> bool {
    url::Url::parse(value).is_ok()
}

/// Collects issues under a common field prefix.
struct Issues<'a> {
    prefix: String,
    out: &'a mut Vec<ValidationIssue>,
}

impl<'a> Issues<'a> {
    fn new(prefix: impl Into<String>, out: &'a mut Vec<ValidationIssue>) -> Self {
        Self {
            prefix: prefix.into(),
            out,
        }
    }

    fn path(&self, field: &str) -> String {
        if self.prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", self.prefix, field)
        }
    }

    fn push(&mut self, field: &str, message: impl Into<String>) {
        let path = self.path(field);
        self.out.push(ValidationIssue::new(path, message));
    }

    fn require(&mut self, field: &str, value: &str, what: &str) {
        if is_blank(value) {
            self.push(field, format!("{what} {field} must be a non-empty string"));
        }
    }

    fn require_each(&mut self, field: &str, values: &[String], what: &str, item: &str) {
        for (i, value) in values.iter().enumerate() {
            if is_blank(value) {
                self.push(
                    &format!("{field}[{i}]"),
                    format!("{what} {item}[{i}] must be a non-empty string"),
                );
            }
        }
    }

    fn require_bool(&mut self, field: &str, value: Option<bool>, what: &str) {
        if value.is_none() {
            self.push(field, format!("{what} {field} must be a boolean"));
        }
    }
}

/// Validate a complete profile.
pub fn validate(profile: &Profile) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    match &profile.personal_info {
        Some(info) => validate_personal_info(info, &mut issues),
        None => issues.push(ValidationIssue::new(
            "personalInfo",
            "Personal info is required",
        )),
    }

    for (i, category) in profile.skill_categories.iter().enumerate() {
        validate_skill_category(category, i, &mut issues);
    }
    for (i, experience) in profile.experiences.iter().enumerate() {
        validate_experience(experience, i, &mut issues);
    }
    for (i, project) in profile.projects.iter().enumerate() {
        validate_project(project, i, &mut issues);
    }
    for (i, contact) in profile.contacts.iter().enumerate() {
        validate_contact(contact, i, &mut issues);
    }

    log::debug!("Profile validation found {} issue(s)", issues.len());
    issues
}

/// Validate a profile and wrap the result in a [`ValidationSummary`].
pub fn summarize(profile: &Profile) -> ValidationSummary {
    ValidationSummary::from_issues(validate(profile))
}

fn validate_personal_info(info: &PersonalInfo, out: &mut Vec<ValidationIssue>) {
    let mut issues = Issues::new("", out);
    issues.require("name", &info.name, "Personal info");
    issues.require("title", &info.title, "Personal info");

    match &info.bio {
        Some(bio) => {
            let mut issues = Issues::new("bio", &mut *issues.out);
            issues.require("primary", &bio.primary, "Bio");
            issues.require("secondary", &bio.secondary, "Bio");
        }
        None => issues.push("bio", "Bio must be an object"),
    }

    match &info.avatar {
        Some(avatar) => {
            let mut issues = Issues::new("avatar", &mut *issues.out);
            issues.require("src", &avatar.src, "Avatar");
            issues.require("alt", &avatar.alt, "Avatar");
            issues.require("fallbackInitials", &avatar.fallback_initials, "Avatar");
        }
        None => issues.push("avatar", "Avatar must be an object"),
    }
}

fn validate_skill_category(category: &SkillCategory, index: usize, out: &mut Vec<ValidationIssue>) {
    let prefix = format!("skillCategory[{index}]");
    let mut issues = Issues::new(prefix.clone(), out);
    issues.require("id", &category.id, "Skill category");
    issues.require("title", &category.title, "Skill category");

    for (j, skill) in category.skills.iter().enumerate() {
        validate_skill(skill, &format!("{prefix}.skills.skill[{j}]"), &mut *issues.out);
    }
}

fn validate_skill(skill: &Skill, prefix: &str, out: &mut Vec<ValidationIssue>) {
    let mut issues = Issues::new(prefix, out);
    issues.require("name", &skill.name, "Skill");

    let level_ok = skill
        .level
        .is_some_and(|level| level.is_finite() && (0.0..=100.0).contains(&level));
    if !level_ok {
        issues.push("level", "Skill level must be a number between 0 and 100");
    }

    issues.require("color", &skill.color, "Skill");
    issues.require("category", &skill.category, "Skill");
}

fn validate_experience(experience: &Experience, index: usize, out: &mut Vec<ValidationIssue>) {
    let mut issues = Issues::new(format!("experience[{index}]"), out);
    issues.require("id", &experience.id, "Experience");
    issues.require("company", &experience.company, "Experience");
    issues.require("position", &experience.position, "Experience");
    issues.require("duration", &experience.duration, "Experience");
    issues.require("startDate", &experience.start_date, "Experience");

    if experience.end_date.as_deref().is_some_and(is_blank) {
        issues.push("endDate", "Experience endDate must be a string or null");
    }

    issues.require("description", &experience.description, "Experience");
    issues.require_each(
        "responsibilities",
        &experience.responsibilities,
        "Experience",
        "responsibility",
    );
    issues.require_each(
        "technologies",
        &experience.technologies,
        "Experience",
        "technology",
    );
    issues.require("type", &experience.kind, "Experience");
}

fn validate_project(project: &Project, index: usize, out: &mut Vec<ValidationIssue>) {
    let mut issues = Issues::new(format!("project[{index}]"), out);
    issues.require("id", &project.id, "Project");
    issues.require("title", &project.title, "Project");
    issues.require("description", &project.description, "Project");
    issues.require_each("technologies", &project.technologies, "Project", "technology");

    for (key, link) in &project.links {
        if !link.is_empty() && !is_url(link) {
            issues.push(
                &format!("links.{key}"),
                format!("Project link {key} must be a valid URL"),
            );
        }
    }

    issues.require_bool("featured", project.featured, "Project");
    issues.require("status", &project.status, "Project");
    issues.require("category", &project.category, "Project");
}

fn validate_contact(contact: &Contact, index: usize, out: &mut Vec<ValidationIssue>) {
    let mut issues = Issues::new(format!("contact[{index}]"), out);
    issues.require("id", &contact.id, "Contact");
    issues.require("type", &contact.kind, "Contact");
    issues.require("label", &contact.label, "Contact");
    issues.require("value", &contact.value, "Contact");
    issues.require("url", &contact.url, "Contact");

    if contact.kind == "email" && !EMAIL.is_match(&contact.value) {
        issues.push("value", "Email contact must have valid email format");
    }

    let needs_url = contact.kind != "email" && contact.kind != "wechat" && contact.url != "#";
    if needs_url && !is_url(&contact.url) {
        issues.push("url", "Contact url must be a valid URL");
    }

    issues.require_bool("primary", contact.primary, "Contact");
    issues.require_bool("public", contact.public, "Contact");
}
