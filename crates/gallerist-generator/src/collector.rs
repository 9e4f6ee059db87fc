//! Content selection and ordering.
//!
//! Filters the site's items down to the paginatable ones and puts them in
//! canonical display order (newest first).

use std::cmp::Ordering;

use gallerist_core::{Item, SourceDocument};
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// Read-only view over the site's content items.
pub trait ItemSource {
    /// Items in their original order.
    fn items(&self) -> impl Iterator<Item = &Item>;
}

impl ItemSource for [Item] {
    fn items(&self) -> impl Iterator<Item = &Item> {
        self.iter()
    }
}

impl ItemSource for Vec<Item> {
    fn items(&self) -> impl Iterator<Item = &Item> {
        self.iter()
    }
}

impl<const N: usize> ItemSource for [Item; N] {
    fn items(&self) -> impl Iterator<Item = &Item> {
        self.iter()
    }
}

/// Selects and orders paginatable content.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentIndex;

impl ContentIndex {
    /// Paginatable items, newest first.
    ///
    /// Undated items come after every dated one. Items that compare equal
    /// keep their relative input order.
    pub fn select<S: ItemSource + ?Sized>(source: &S) -> Vec<&Item> {
        let mut items: Vec<_> = source.items().filter(|item| item.paginatable).collect();
        items.sort_by(|a, b| compare_published(a, b));
        debug!(count = items.len(), "selected paginatable items");
        items
    }

    /// Parse source documents into items, in input order.
    ///
    /// Documents with malformed frontmatter are logged and skipped.
    pub fn ingest(documents: &[SourceDocument]) -> Vec<Item> {
        info!(count = documents.len(), "ingesting documents");

        let items: Vec<_> = documents
            .par_iter()
            .filter_map(|doc| match Item::from_document(doc) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!(url = %doc.url, error = %e, "failed to parse document");
                    None
                }
            })
            .collect();

        info!(
            items = items.len(),
            paginatable = items.iter().filter(|i| i.paginatable).count(),
            "ingestion complete"
        );
        items
    }
}

/// Display order: descending by publication date, undated last.
pub fn compare_published(a: &Item, b: &Item) -> Ordering {
    match (&a.published_at, &b.published_at) {
        (Some(a_date), Some(b_date)) => b_date.cmp(a_date),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
