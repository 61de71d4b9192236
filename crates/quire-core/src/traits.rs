//! Configuration management trait.
//!
//! [`ConfigManager`] gives any serde-serializable config struct a TOML file
//! location, loading with defaults, and export to environment variables. The
//! CLI's `config` subcommands are generic over it.

use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::util::paths::expand_tilde;
use crate::{Error, Result};

/// A configuration type backed by a TOML file.
pub trait ConfigManager: Default + Serialize + DeserializeOwned {
    /// Project name, used for the config directory and env var prefix.
    fn project_name() -> &'static str;

    /// Environment variable prefix, e.g. `QUIRE` for project `quire`.
    fn env_prefix() -> String {
        Self::project_name().to_uppercase().replace(['-', ' '], "_")
    }

    /// Environment variable that may hold an explicit config path.
    fn config_env_var() -> String {
        format!("{}_CONFIG", Self::env_prefix())
    }

    /// Default location: `<platform config dir>/<project>/config.toml`.
    fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(Self::project_name()).join("config.toml"))
    }

    /// Resolve the config path.
    ///
    /// Priority: explicit path, then the `<PREFIX>_CONFIG` environment
    /// variable, then [`default_config_path`](Self::default_config_path).
    fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(expand_tilde(path));
        }
        if let Ok(path) = std::env::var(Self::config_env_var()) {
            if !path.trim().is_empty() {
                return Some(expand_tilde(&path));
            }
        }
        Self::default_config_path()
    }

    /// Load configuration from the resolved path.
    ///
    /// A missing file yields [`Default`] values, unless the path was given
    /// explicitly, in which case it is an error.
    fn load(explicit: Option<&str>) -> Result<Self> {
        let Some(path) = Self::resolve_config_path(explicit) else {
            log::debug!("No config directory available, using defaults");
            return Ok(Self::default());
        };

        if !path.exists() {
            if explicit.is_some() {
                return Err(Error::not_found(path.to_string_lossy(), "config file"));
            }
            log::debug!("Config file {:?} not found, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
        let config = toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;
        log::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Serialize to a pretty TOML document.
    fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Flatten the configuration into `PREFIX_SECTION_KEY=value` pairs.
    ///
    /// Arrays are joined with commas; nested tables extend the key.
    fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let value = toml::Value::try_from(self).map_err(|e| Error::config(e.to_string()))?;
        let mut vars = Vec::new();
        flatten_env(&Self::env_prefix(), &value, &mut vars);
        Ok(vars)
    }
}

fn flatten_env(prefix: &str, value: &toml::Value, out: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, child) in table {
                let name = format!("{prefix}_{}", key.to_uppercase().replace('-', "_"));
                flatten_env(&name, child, out);
            }
        }
        toml::Value::Array(items) => {
            let joined = items
                .iter()
                .map(scalar_to_string)
                .collect::<Vec<_>>()
                .join(",");
            out.push((prefix.to_string(), joined));
        }
        other => out.push((prefix.to_string(), scalar_to_string(other))),
    }
}

fn scalar_to_string(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
