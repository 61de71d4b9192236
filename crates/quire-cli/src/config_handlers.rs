//! `quire config` subcommands.
//!
//! Handlers are generic over [`ConfigManager`] and return the text to print,
//! leaving stdout to the caller. Keys are dotted TOML paths such as
//! `search.threshold`.

use std::path::{Path, PathBuf};

use quire_core::{ConfigManager, Error, Result};

use crate::cli::ConfigAction;
use crate::config::QuireConfig;

/// Run a config subcommand against [`QuireConfig`] and return its output.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<String> {
    match action {
        ConfigAction::Path => config_path_report::<QuireConfig>(config_path),
        ConfigAction::Get { key } => config_get::<QuireConfig>(config_path, &key),
        ConfigAction::Set { key, value } => config_set::<QuireConfig>(config_path, &key, &value),
        ConfigAction::Init { file, force } => config_init::<QuireConfig>(file.as_deref(), force),
        ConfigAction::Export => config_export(&QuireConfig::load(config_path)?),
    }
}

/// The resolved config path, with a hint when the file is missing.
pub fn config_path_report<C: ConfigManager>(config_path: Option<&str>) -> Result<String> {
    let path = C::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory for this platform"))?;

    let mut out = path.display().to_string();
    if !path.exists() {
        out.push_str(&format!(
            "\n(file does not exist; run `{} config init` to create it)",
            C::project_name()
        ));
    }
    Ok(out)
}

/// Look up a dotted key in the effective configuration (file merged over
/// defaults).
pub fn config_get<C: ConfigManager>(config_path: Option<&str>, key: &str) -> Result<String> {
    let config = C::load(config_path)?;
    let value = toml::Value::try_from(&config).map_err(|e| Error::config(e.to_string()))?;

    get_nested_value(&value, key)
        .map(format_toml_value)
        .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))
}

/// Write a dotted key into the config file.
///
/// The key must name a known setting and the result must still load as
/// `C`, so typos and type mismatches are rejected before anything is
/// written.
pub fn config_set<C: ConfigManager>(
    config_path: Option<&str>,
    key: &str,
    value: &str,
) -> Result<String> {
    let path = C::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory"))?;

    if !path.exists() {
        return Err(Error::config(format!(
            "Config file does not exist at {}. Run `{} config init` first.",
            path.display(),
            C::project_name()
        )));
    }

    let defaults = toml::Value::try_from(C::default()).map_err(|e| Error::config(e.to_string()))?;
    if get_nested_value(&defaults, key).is_none() {
        return Err(Error::config(format!("Unknown configuration key '{key}'")));
    }

    let mut doc = read_toml(&path)?;
    set_nested_value(&mut doc, key, parse_value(value))?;

    let _: C = doc
        .clone()
        .try_into()
        .map_err(|e| Error::config(format!("Invalid value for '{key}': {e}")))?;

    let toml_str = toml::to_string_pretty(&doc).map_err(|e| Error::config(e.to_string()))?;
    std::fs::write(&path, toml_str).map_err(|e| Error::io_with_path(e, &path))?;

    Ok(format!("Set {key} = {value} in {}", path.display()))
}

/// Write the default configuration to `file` or the default path.
pub fn config_init<C: ConfigManager>(file: Option<&str>, force: bool) -> Result<String> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => C::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    std::fs::write(&path, C::default().to_toml_string()?)
        .map_err(|e| Error::io_with_path(e, &path))?;

    Ok(format!("Config file created at {}", path.display()))
}

/// `KEY=value` lines for every setting.
pub fn config_export<C: ConfigManager>(config: &C) -> Result<String> {
    let lines: Vec<String> = config
        .to_env_vars()?
        .into_iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect();
    Ok(lines.join("\n"))
}

fn read_toml(path: &Path) -> Result<toml::Value> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
    toml::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
}

// ============================================================================
// Dotted-key helpers
// ============================================================================

/// Follow a dotted key through nested tables.
pub fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(value, |current, part| current.as_table()?.get(part))
}

/// Set the value at a dotted key, creating intermediate tables.
pub fn set_nested_value(root: &mut toml::Value, key: &str, value: toml::Value) -> Result<()> {
    let (parents, leaf) = match key.rsplit_once('.') {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, key),
    };
    if leaf.is_empty() {
        return Err(Error::config("Empty key path"));
    }

    let mut current = root;
    for part in parents.into_iter().flat_map(|p| p.split('.')) {
        let table = current
            .as_table_mut()
            .ok_or_else(|| Error::config(format!("Cannot navigate into non-table at '{part}'")))?;
        current = table
            .entry(part.to_string())
            .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
    }

    current
        .as_table_mut()
        .ok_or_else(|| Error::config("Cannot set key on a non-table value"))?
        .insert(leaf.to_string(), value);
    Ok(())
}

/// Interpret a command-line string as a TOML value: boolean, then integer,
/// then float, otherwise string.
pub fn parse_value(s: &str) -> toml::Value {
    match s {
        "true" => toml::Value::Boolean(true),
        "false" => toml::Value::Boolean(false),
        _ => s
            .parse::<i64>()
            .map(toml::Value::Integer)
            .or_else(|_| s.parse::<f64>().map(toml::Value::Float))
            .unwrap_or_else(|_| toml::Value::String(s.to_string())),
    }
}

/// Render a value for stdout; strings are unquoted.
pub fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Array(_) | toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        other => other.to_string(),
    }
}
