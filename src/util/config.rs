//! Configuration file support for vplcfg.
//!
//! vplcfg reads two configuration files:
//! - Global: `<config dir>/vplcfg/config.toml` - User-wide defaults
//! - Project: `./vplcfg.toml` - Project-specific parameters and filters
//!
//! Project values take precedence over global ones; parameter and filter
//! lists from both files are concatenated, global first.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::ops::matcher::PropertyFilter;

/// Name of the project configuration file.
pub const PROJECT_CONFIG_NAME: &str = "vplcfg.toml";

/// vplcfg configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Property paths and values, applied in file order
    pub params: toml::Table,

    /// Capability filters
    #[serde(rename = "filter")]
    pub filters: Vec<FilterEntry>,

    /// Defaults for command-line options
    pub defaults: Defaults,
}

/// One `[[filter]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterEntry {
    pub path: String,
    pub value: toml::Value,
}

/// Defaults for command-line options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Implementation manifest used by `vplcfg match`
    pub manifest: Option<PathBuf>,

    /// Attach missing extension buffers automatically (default: true)
    pub attach_extensions: Option<bool>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        for (path, value) in other.params {
            self.params.insert(path, value);
        }
        self.filters.extend(other.filters);

        if other.defaults.manifest.is_some() {
            self.defaults.manifest = other.defaults.manifest;
        }
        if other.defaults.attach_extensions.is_some() {
            self.defaults.attach_extensions = other.defaults.attach_extensions;
        }
    }

    pub fn attach_extensions(&self) -> bool {
        self.defaults.attach_extensions.unwrap_or(true)
    }

    /// Parameters as `(path, value)` text pairs.
    pub fn param_pairs(&self) -> Result<Vec<(String, String)>> {
        self.params
            .iter()
            .map(|(path, value)| {
                let text = toml_text(value).with_context(|| {
                    format!("param `{}` has an unsupported {} value", path, value.type_str())
                })?;
                Ok((path.clone(), text))
            })
            .collect()
    }

    /// Configured filters.
    pub fn filter_list(&self) -> Result<Vec<PropertyFilter>> {
        self.filters
            .iter()
            .map(|entry| {
                let text = toml_text(&entry.value).with_context(|| {
                    format!(
                        "filter `{}` has an unsupported {} value",
                        entry.path,
                        entry.value.type_str()
                    )
                })?;
                Ok(PropertyFilter::text(entry.path.clone(), text))
            })
            .collect()
    }
}

/// Textual form of a TOML scalar or array. Arrays become comma lists;
/// tables and datetimes have no textual form.
pub fn toml_text(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(if *b { "1" } else { "0" }.to_string()),
        toml::Value::Array(items) => items
            .iter()
            .map(toml_text)
            .collect::<Option<Vec<_>>>()
            .map(|parts| parts.join(",")),
        toml::Value::Datetime(_) | toml::Value::Table(_) => None,
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (./vplcfg.toml)
/// 2. Global config (<config dir>/vplcfg/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    // Load global config first
    if let Some(global_path) = global_path.filter(|p| p.exists()) {
        let global = Config::load_or_default(global_path);
        config.merge(global);
    }

    // Project config overrides global
    if project_path.exists() {
        let project = Config::load_or_default(project_path);
        config.merge(project);
    }

    config
}

/// Get the global vplcfg config path (`<config dir>/vplcfg/config.toml`).
pub fn global_config_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.config_dir().join("vplcfg").join("config.toml"))
}

/// Get the project config path (`<root>/vplcfg.toml`).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(PROJECT_CONFIG_NAME)
}
