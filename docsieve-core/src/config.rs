//! Configuration parsing and management.

use crate::tag::{CatalogEntry, TagCatalog};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

/// Main configuration struct matching the docsieve.yml schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Page model file, relative to the config file
    pub page: PathBuf,

    /// Page URL used for `?v=` preselection and version-badge links
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default = "default_marker_class")]
    pub marker_class: String,

    #[serde(default)]
    pub filters: Vec<FilterSpec>,

    // Internal: path to config file (for relative path resolution)
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

fn default_marker_class() -> String {
    String::from("hideable")
}

/// One dropdown registration from the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterSpec {
    /// `name` attribute of the page's selection control
    pub dropdown: String,

    /// Annotate-target path, e.g. `section.doc-section/h2`
    #[serde(default)]
    pub annotate: Option<String>,

    #[serde(default)]
    pub catalog: Vec<CatalogEntry>,
}

impl FilterSpec {
    /// The configured catalog, or `None` when no entries were given
    pub fn catalog(&self) -> Option<TagCatalog> {
        if self.catalog.is_empty() {
            None
        } else {
            Some(TagCatalog::from_entries(self.catalog.clone()))
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = serde_yaml::from_str(&contents)?;

        // Store config file path for relative path resolution
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Get the page model path, resolved relative to the config file
    pub fn page_path(&self) -> PathBuf {
        self.resolve_path(&self.page)
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(config_path) = &self.config_path {
            if let Some(parent) = config_path.parent() {
                parent.join(path)
            } else {
                path.to_path_buf()
            }
        } else {
            path.to_path_buf()
        }
    }
}
