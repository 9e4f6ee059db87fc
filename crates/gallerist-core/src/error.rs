//! Error types for the gallerist core library.

use thiserror::Error;

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error types for gallerist.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration is malformed or could not be loaded.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A page number outside `[1, total_pages]` was requested.
    #[error("page {page} is out of range (total pages: {total_pages})")]
    OutOfRange { page: usize, total_pages: usize },

    /// A page count that does not match the number of items it pages.
    #[error("{total_pages} pages requested for {total_item_count} items at {per_page} per page")]
    PageCountMismatch {
        total_pages: usize,
        total_item_count: usize,
        per_page: usize,
    },

    /// Frontmatter parsing error.
    #[error("Frontmatter error in {origin}: {message}")]
    Frontmatter { origin: String, message: String },

    /// File system I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic configuration crate error.
    #[error("Config crate error: {0}")]
    ConfigCrate(#[from] config::ConfigError),
}

impl CoreError {
    /// Create a new configuration error with a message.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source.
    pub fn invalid_config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::InvalidConfig {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new out-of-range error.
    pub fn out_of_range(page: usize, total_pages: usize) -> Self {
        Self::OutOfRange { page, total_pages }
    }

    /// Create a new page count mismatch error.
    pub fn page_count_mismatch(
        total_pages: usize,
        total_item_count: usize,
        per_page: usize,
    ) -> Self {
        Self::PageCountMismatch {
            total_pages,
            total_item_count,
            per_page,
        }
    }

    /// Create a new frontmatter error.
    pub fn frontmatter(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Frontmatter {
            origin: origin.into(),
            message: message.into(),
        }
    }

    /// Whether this error came from configuration validation.
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. } | Self::ConfigCrate(_))
    }
}
