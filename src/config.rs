use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_PAGES: usize = 6;
pub const DEFAULT_ALL_LABEL: &str = "All pages";
pub const MAX_PAGES: usize = 64;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub pages: usize,
    pub all_label: String,
    /// Explicit item ids; when empty, `page1..pageN` is generated from `pages`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pages: DEFAULT_PAGES,
            all_label: DEFAULT_ALL_LABEL.to_string(),
            items: Vec::new(),
            labels: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageItem {
    pub id: String,
    pub label: String,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = get_config_file_path()?;

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        check_page_count("pages", config.pages)?;
        check_page_count("items", config.items.len().max(1))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = get_config_file_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let content =
            toml::to_string(self).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        fs::write(&config_path, content).map_err(|e| ConfigError::WriteError(e.to_string()))?;

        tracing::info!(path = %config_path.display(), "Configuration saved");
        Ok(())
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "pages" => {
                let pages: usize = value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    reason: format!("'{}' is not a number", value),
                })?;
                check_page_count(key, pages)?;
                self.pages = pages;
            }
            "all_label" => self.all_label = value.to_string(),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        match key {
            "pages" => Ok(self.pages.to_string()),
            "all_label" => Ok(self.all_label.clone()),
            _ => Err(ConfigError::UnknownKey(key.to_string())),
        }
    }

    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("pages", self.pages.to_string()),
            ("all_label", self.all_label.clone()),
        ]
    }

    /// Applies command-line overrides for a single run.
    pub fn with_overrides(mut self, pages: Option<usize>, items: Vec<String>) -> Self {
        if let Some(pages) = pages {
            self.pages = pages;
            self.items.clear();
        }
        if !items.is_empty() {
            self.items = items;
        }
        self
    }

    pub fn page_items(&self) -> Vec<PageItem> {
        if self.items.is_empty() {
            (1..=self.pages)
                .map(|n| {
                    let id = format!("page{}", n);
                    let label = self
                        .labels
                        .get(&id)
                        .cloned()
                        .unwrap_or_else(|| format!("Page {}", n));
                    PageItem { id, label }
                })
                .collect()
        } else {
            self.items
                .iter()
                .map(|id| PageItem {
                    id: id.clone(),
                    label: self.labels.get(id).cloned().unwrap_or_else(|| id.clone()),
                })
                .collect()
        }
    }
}

fn check_page_count(key: &str, count: usize) -> Result<(), ConfigError> {
    let reason = if count == 0 {
        "at least one page is required".to_string()
    } else if count > MAX_PAGES {
        format!("at most {} pages are supported", MAX_PAGES)
    } else {
        return Ok(());
    };
    Err(ConfigError::InvalidValue {
        key: key.to_string(),
        reason,
    })
}

pub fn get_config_dir() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir().ok_or(ConfigError::ConfigDirNotFound)?;

    Ok(config_dir.join("pagepick"))
}

fn get_config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(get_config_dir()?.join("config.toml"))
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not find config directory")]
    ConfigDirNotFound,
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to write config file: {0}")]
    WriteError(String),
    #[error("Failed to parse config file: {0}")]
    ParseError(String),
    #[error("Failed to serialize config: {0}")]
    SerializeError(String),
    #[error("Unknown configuration key '{0}'. Supported keys: pages, all_label")]
    UnknownKey(String),
    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}
