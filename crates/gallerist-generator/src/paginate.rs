//! Page partitioning.
//!
//! Splits a sorted item sequence into fixed-size pages and links each page
//! to its neighbours by number. URLs are filled in by the page tree builder.

use gallerist_core::{CoreError, Item, PaginationConfig, Result};
use serde::Serialize;

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<'a> {
    /// 1-indexed page number.
    pub page_number: usize,

    /// Configured maximum number of items per page.
    pub per_page: usize,

    /// Items shown on this page, in display order.
    pub items: Vec<&'a Item>,

    /// Number of pages in the listing.
    pub total_pages: usize,

    /// Number of items across all pages.
    pub total_item_count: usize,

    /// Number of the preceding page.
    pub previous_page: Option<usize>,

    /// Number of the following page.
    pub next_page: Option<usize>,

    /// URL of the preceding page.
    pub previous_page_url: Option<String>,

    /// URL of the following page.
    pub next_page_url: Option<String>,
}

impl Page<'_> {
    /// Whether this is the canonical first page.
    pub fn is_first(&self) -> bool {
        self.page_number == 1
    }

    /// Whether this is the final page.
    pub fn is_last(&self) -> bool {
        self.page_number == self.total_pages
    }

    /// Render this page as a JSON template context.
    pub fn to_context(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

/// Number of pages needed for `total_item_count` items.
pub fn calculate_pages(total_item_count: usize, per_page: usize) -> Result<usize> {
    if per_page == 0 {
        return Err(CoreError::invalid_config(
            "per_page must be a positive integer",
        ));
    }
    Ok(total_item_count.div_ceil(per_page))
}

/// Build page `page_number` from `sorted_items`.
///
/// Fails with `OutOfRange` unless `1 <= page_number <= total_pages`, and
/// with `PageCountMismatch` when `total_pages` is not the page count of
/// `sorted_items`.
pub fn build_page<'a>(
    sorted_items: &[&'a Item],
    per_page: usize,
    page_number: usize,
    total_pages: usize,
) -> Result<Page<'a>> {
    if per_page == 0 {
        return Err(CoreError::invalid_config(
            "per_page must be a positive integer",
        ));
    }
    if page_number < 1 || page_number > total_pages {
        return Err(CoreError::out_of_range(page_number, total_pages));
    }

    let total_item_count = sorted_items.len();
    if total_pages != total_item_count.div_ceil(per_page) {
        return Err(CoreError::page_count_mismatch(
            total_pages,
            total_item_count,
            per_page,
        ));
    }

    let start = (page_number - 1) * per_page;
    let end = (start + per_page).min(total_item_count);

    Ok(Page {
        page_number,
        per_page,
        items: sorted_items[start..end].to_vec(),
        total_pages,
        total_item_count,
        previous_page: (page_number > 1).then(|| page_number - 1),
        next_page: (page_number < total_pages).then(|| page_number + 1),
        previous_page_url: None,
        next_page_url: None,
    })
}

/// Whether a listing should be paginated at all.
pub fn enabled(config: &PaginationConfig, paginatable_item_count: usize) -> bool {
    config.per_page.is_some() && paginatable_item_count > 0
}
