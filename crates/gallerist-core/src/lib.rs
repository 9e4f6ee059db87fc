//! gallerist core library
//!
//! Content items, frontmatter ingestion, configuration, and error handling
//! shared by the gallerist pagination engine.

pub mod config;
pub mod content;
pub mod error;
pub mod frontmatter;

pub use config::{Config, GalleryConfig, PAGE_PLACEHOLDER, PaginationConfig};
pub use content::{Item, SourceDocument};
pub use error::{CoreError, Result};
pub use frontmatter::{Frontmatter, GalleryPreview};
