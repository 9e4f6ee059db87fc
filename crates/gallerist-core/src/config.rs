//! Site configuration management.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Placeholder replaced by the page number in numbered page paths.
pub const PAGE_PLACEHOLDER: &str = ":num";

/// Main configuration structure for gallerist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,

    /// Gallery index settings.
    #[serde(default)]
    pub gallery: GalleryConfig,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,

    /// Base URL for the site (e.g., "https://example.com").
    pub base_url: String,

    /// Site description for meta tags.
    #[serde(default)]
    pub description: Option<String>,

    /// Site author name.
    #[serde(default)]
    pub author: Option<String>,
}

/// Gallery index configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryConfig {
    /// Directory the gallery lives under, relative to the site root.
    #[serde(default = "default_gallery_dir")]
    pub dir: String,

    /// Number of items per page. Pagination is disabled when unset.
    #[serde(default)]
    pub paginate: Option<usize>,

    /// Path template for pages 2..N, relative to `dir`.
    #[serde(default = "default_paginate_path")]
    pub paginate_path: String,

    /// URL of the first page. Defaults to `/<dir>/`.
    #[serde(default)]
    pub base_path: Option<String>,

    /// Title of the gallery index page.
    #[serde(default = "default_gallery_title")]
    pub title: String,

    /// Meta description of the gallery index page.
    #[serde(default = "default_gallery_description")]
    pub description: String,
}

/// Resolved pagination settings for one gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Maximum number of items per page; `None` disables pagination.
    pub per_page: Option<usize>,

    /// Canonical URL of page 1.
    pub base_path: String,

    /// Template for pages 2..N; must contain [`PAGE_PLACEHOLDER`].
    pub numbered_path_template: String,

    /// Root every numbered path is placed under.
    pub gallery_root: String,
}

// Default value functions
fn default_gallery_dir() -> String {
    "visualizations".to_string()
}

fn default_paginate_path() -> String {
    format!("page{PAGE_PLACEHOLDER}/")
}

fn default_gallery_title() -> String {
    "Visualization gallery".to_string()
}

fn default_gallery_description() -> String {
    "A gallery of data science visualizations".to_string()
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            dir: default_gallery_dir(),
            paginate: None,
            paginate_path: default_paginate_path(),
            base_path: None,
            title: default_gallery_title(),
            description: default_gallery_description(),
        }
    }
}

impl GalleryConfig {
    /// URL of the gallery index page.
    pub fn index_url(&self) -> String {
        if let Some(base_path) = &self.base_path {
            return base_path.clone();
        }

        let dir = self.dir.trim_matches('/');
        if dir.is_empty() {
            "/".to_string()
        } else {
            format!("/{dir}/")
        }
    }

    /// Pagination settings derived from this gallery.
    pub fn pagination(&self) -> PaginationConfig {
        PaginationConfig {
            per_page: self.paginate,
            base_path: self.index_url(),
            numbered_path_template: self.paginate_path.clone(),
            gallery_root: self.dir.clone(),
        }
    }
}

impl PaginationConfig {
    /// Create pagination settings with a configured page size.
    pub fn new(
        per_page: usize,
        base_path: impl Into<String>,
        numbered_path_template: impl Into<String>,
        gallery_root: impl Into<String>,
    ) -> Self {
        Self {
            per_page: Some(per_page),
            base_path: base_path.into(),
            numbered_path_template: numbered_path_template.into(),
            gallery_root: gallery_root.into(),
        }
    }

    /// Validate page size and path template.
    pub fn validate(&self) -> Result<()> {
        if self.per_page == Some(0) {
            return Err(CoreError::invalid_config(
                "per_page must be a positive integer",
            ));
        }

        if !self.numbered_path_template.contains(PAGE_PLACEHOLDER) {
            return Err(CoreError::invalid_config(format!(
                "numbered path template {:?} has no {PAGE_PLACEHOLDER} placeholder",
                self.numbered_path_template
            )));
        }

        Ok(())
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::invalid_config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::invalid_config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration using the config crate, layering `GALLERIST__*`
    /// environment variables over the file.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        Self::load_layered(path, Self::environment())
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix("GALLERIST")
            .separator("__")
            .try_parsing(true)
    }

    fn load_layered(path: &Path, environment: config::Environment) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(environment)
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.site.title.is_empty() {
            return Err(CoreError::invalid_config("site.title cannot be empty"));
        }

        if self.site.base_url.is_empty() {
            return Err(CoreError::invalid_config("site.base_url cannot be empty"));
        }

        if self.site.base_url.ends_with('/') {
            tracing::warn!("site.base_url should not have a trailing slash");
        }

        self.gallery.pagination().validate()
    }

    /// Get the full URL for a path.
    pub fn url_for(&self, path: &str) -> String {
        let base = self.site.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}
