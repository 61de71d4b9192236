//! About-page data model.
//!
//! Keys use camelCase on disk (`fallbackInitials`, `startDate`) so profile
//! files read the same as the site's own data. Most fields are optional or
//! defaulted so that an incomplete file still loads; [`crate::validate`]
//! reports what is missing.

use std::collections::BTreeMap;
use std::path::Path;

use quire_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// The complete about-page data set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub personal_info: Option<PersonalInfo>,
    #[serde(default)]
    pub skill_categories: Vec<SkillCategory>,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub contacts: Vec<Contact>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    #[serde(default)]
    pub name: String,
    /// Job title shown under the name.
    #[serde(default)]
    pub title: String,
    pub bio: Option<Bio>,
    pub avatar: Option<Avatar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bio {
    #[serde(default)]
    pub primary: String,
    #[serde(default)]
    pub secondary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Avatar {
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub alt: String,
    /// Initials shown when the image fails to load.
    #[serde(default)]
    pub fallback_initials: String,
}

/// A titled group of skills, e.g. "Backend".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillCategory {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    #[serde(default)]
    pub name: String,
    /// Proficiency, 0 to 100.
    pub level: Option<f64>,
    /// Display gradient.
    #[serde(default)]
    pub color: String,
    /// Kind of skill (`language`, `database`, ...), distinct from the
    /// enclosing [`SkillCategory`].
    #[serde(default)]
    pub category: String,
}

impl Skill {
    /// Level, treating a missing level as 0.
    pub fn level_or_zero(&self) -> f64 {
        self.level.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub position: String,
    /// Human-readable span, e.g. "Mar 2012 - present".
    #[serde(default)]
    pub duration: String,
    /// `YYYY-MM`.
    #[serde(default)]
    pub start_date: String,
    /// `YYYY-MM`; absent for the current position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    /// Employment type, e.g. `full-time`.
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Experience {
    /// Returns `true` for the position without an end date.
    pub fn is_current(&self) -> bool {
        self.end_date.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    /// Named links (`github`, `demo`, ...).
    #[serde(default)]
    pub links: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub featured: Option<bool>,
    /// `active`, `completed`, `in-progress`, ...
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl Project {
    pub fn is_featured(&self) -> bool {
        self.featured.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default)]
    pub id: String,
    /// `email`, `github`, `wechat`, ...
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub url: String,
    pub primary: Option<bool>,
    pub public: Option<bool>,
}

impl Contact {
    pub fn is_primary(&self) -> bool {
        self.primary.unwrap_or(false)
    }

    pub fn is_public(&self) -> bool {
        self.public.unwrap_or(false)
    }
}

impl Profile {
    /// Parse a profile from TOML.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::parse(format!("Invalid profile TOML: {e}")))
    }

    /// Parse a profile from JSON.
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| Error::parse(format!("Invalid profile JSON: {e}")))
    }

    /// Load a profile file. `.json` files are read as JSON, anything else
    /// as TOML.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::not_found(path.to_string_lossy(), "profile"));
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        log::debug!("Loading profile from {}", path.display());
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }
}
