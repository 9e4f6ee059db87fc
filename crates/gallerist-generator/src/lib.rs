//! gallerist generator library
//!
//! The gallery pagination engine: selects paginatable items, partitions them
//! into pages and resolves each page's URL.
//!
//! # Modules
//!
//! - [`collector`] - Item selection and canonical ordering
//! - [`paginate`] - Page counts and page slices
//! - [`paths`] - Page URL resolution
//! - [`build`] - Page tree orchestration

pub mod build;
pub mod collector;
pub mod paginate;
pub mod paths;

pub use build::{GalleryPage, IndexPage, PageDescriptor, PageTarget, PageTreeBuilder};
pub use collector::{ContentIndex, ItemSource, compare_published};
pub use paginate::{Page, build_page, calculate_pages, enabled};
pub use paths::PathResolver;
