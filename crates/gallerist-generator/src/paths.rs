//! Page URL resolution.

use gallerist_core::{CoreError, PAGE_PLACEHOLDER, PaginationConfig, Result};

/// Maps page numbers to canonical URLs.
///
/// Page 1 lives at the base path. Pages 2..N substitute their number into
/// the numbered path template, rooted under the gallery root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    base_path: String,
    template: String,
    root: String,
}

impl PathResolver {
    /// Create a resolver, rejecting templates without a page placeholder.
    pub fn new(config: &PaginationConfig) -> Result<Self> {
        if !config.numbered_path_template.contains(PAGE_PLACEHOLDER) {
            return Err(CoreError::invalid_config(format!(
                "numbered path template {:?} has no {PAGE_PLACEHOLDER} placeholder",
                config.numbered_path_template
            )));
        }

        Ok(Self {
            base_path: config.base_path.clone(),
            template: config.numbered_path_template.clone(),
            root: config.gallery_root.clone(),
        })
    }

    /// URL for an optional page number; `None` stays `None`.
    pub fn path_for(&self, page_number: Option<usize>) -> Option<String> {
        page_number.map(|n| self.page_url(n))
    }

    /// URL for a page number. Anything at or below 1 is the canonical page.
    pub fn page_url(&self, page_number: usize) -> String {
        if page_number <= 1 {
            return self.base_path.clone();
        }

        let numbered = self
            .template
            .replacen(PAGE_PLACEHOLDER, &page_number.to_string(), 1);
        normalize(&format!("{}/{numbered}", self.root))
    }

    /// Canonical URL of page 1.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }
}

/// Collapse empty segments and force a single leading slash. A trailing
/// slash survives.
fn normalize(path: &str) -> String {
    let joined = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    if joined.is_empty() {
        return "/".to_string();
    }
    if path.ends_with('/') {
        format!("/{joined}/")
    } else {
        format!("/{joined}")
    }
}
