//! Plugin configuration
//!
//! Everything the plugin knows about the site lives here: base URL, logo,
//! the static category list and which stream resolver to use. The defaults
//! describe the live site; a TOML file can override any subset of keys.

use crate::model::{Category, Program};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://www.mitele.es";
pub const DEFAULT_LOGO: &str =
    "http://www.mitele.es/theme-assets/themes/views/themes/mitele/img/logo/mitele-head.png";
pub const DEFAULT_DESCARGAVIDEOS_URL: &str = "http://www.descargavideos.tv";

/// Errors that can occur while loading the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    /// The config file is not valid TOML or has wrongly typed keys
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The unlock resolver was selected but no endpoint was configured
    #[error("The 'unlock' resolver requires 'unlock_api_url' to be set")]
    MissingUnlockEndpoint,
}

/// Where the program list of a category comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryListing {
    /// All categories are sections of the single homepage, keyed by id
    #[default]
    Homepage,
    /// Every category has its own page at `<base>/<id>`
    Section,
}

/// Which external service turns an episode page into stream URLs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolverKind {
    /// Submit the episode page URL to a JSON unlocking API
    Unlock,
    /// Scrape the handler link from descargavideos.tv
    #[default]
    DescargaVideos,
}

impl FromStr for ResolverKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unlock" => Ok(ResolverKind::Unlock),
            "descargavideos" => Ok(ResolverKind::DescargaVideos),
            other => Err(format!(
                "unknown resolver '{}', expected 'unlock' or 'descargavideos'",
                other
            )),
        }
    }
}

/// Complete plugin configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Service title shown by the host
    pub title: String,
    /// URI namespace every navigation identifier starts with
    pub namespace: String,
    /// Site root, without trailing slash
    pub base_url: String,
    pub logo: String,
    /// Static category list shown on the start page, in display order
    pub categories: Vec<Category>,
    /// Programs linked directly from the start page
    pub shortcuts: Vec<Program>,
    pub category_listing: CategoryListing,
    /// Site-relative path of the search endpoint
    pub search_path: String,
    pub resolver: ResolverKind,
    pub unlock_api_url: Option<String>,
    pub descargavideos_url: String,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            title: "mitele".to_string(),
            namespace: "mitele".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            logo: DEFAULT_LOGO.to_string(),
            categories: vec![
                Category::new("series-online", "Series"),
                Category::new("programas-tv", "Programas"),
                Category::new("tv-movies", "TV movies"),
                Category::new("deportes", "Deportes"),
            ],
            shortcuts: vec![Program {
                url: "/programas-tv/mujeres-y-hombres-y-viceversa/".to_string(),
                title: "Mujeres y Hombres y Viceversa".to_string(),
                logo: None,
            }],
            category_listing: CategoryListing::default(),
            search_path: "/buscador/".to_string(),
            resolver: ResolverKind::default(),
            unlock_api_url: None,
            descargavideos_url: DEFAULT_DESCARGAVIDEOS_URL.to_string(),
        }
    }
}

impl PluginConfig {
    /// Parses a TOML document; absent keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut config: PluginConfig = toml::from_str(content)?;
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        Ok(config)
    }

    /// Loads the configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}
