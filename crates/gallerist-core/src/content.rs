//! Content items and the documents they are ingested from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    frontmatter::{GalleryPreview, parse_frontmatter},
};

/// A raw content document as handed over by the content collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// URL the document is published at.
    pub url: String,

    /// Full document text, frontmatter included.
    pub source: String,
}

impl SourceDocument {
    /// Create a new source document.
    pub fn new(url: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            source: source.into(),
        }
    }
}

/// One content entry eligible for listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Item title.
    pub title: String,

    /// URL path of the item.
    pub url: String,

    /// Short description, used as caption and image alt text.
    #[serde(default)]
    pub description: String,

    /// Preview image reference.
    #[serde(default)]
    pub preview: Option<String>,

    /// Publication date.
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,

    /// Whether the item belongs in paginated listings.
    #[serde(default)]
    pub paginatable: bool,
}

impl Item {
    /// Create a paginatable item with no preview or date.
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            description: String::new(),
            preview: None,
            published_at: None,
            paginatable: true,
        }
    }

    /// Set the publication date.
    #[must_use]
    pub fn with_date(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = Some(published_at);
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the preview image reference.
    #[must_use]
    pub fn with_preview(mut self, preview: impl Into<String>) -> Self {
        self.preview = Some(preview.into());
        self
    }

    /// Set the capability marker.
    #[must_use]
    pub fn paginatable(mut self, paginatable: bool) -> Self {
        self.paginatable = paginatable;
        self
    }

    /// Build an item from a source document.
    ///
    /// The item is paginatable when its frontmatter declares a
    /// `gallery_preview` and it is not a draft.
    pub fn from_document(doc: &SourceDocument) -> Result<Self> {
        let (fm, _body) = parse_frontmatter(&doc.source, &doc.url)?;
        let published_at = fm.published_at(&doc.url)?;

        Ok(Self {
            title: fm.title,
            url: doc.url.clone(),
            description: fm.description.unwrap_or_default(),
            preview: fm
                .gallery_preview
                .as_ref()
                .and_then(GalleryPreview::image)
                .map(str::to_string),
            published_at,
            paginatable: fm.gallery_preview.is_some() && !fm.draft,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_from_document_with_preview() {
        let doc = SourceDocument::new(
            "/visualizations/cme-product-sectors.html",
            r#"---
title: "CME product sectors"
date: 2013-10-01
description: "Open interest by sector"
gallery_preview: /images/cme.png
---

<div id="chart"></div>"#,
        );

        let item = Item::from_document(&doc).expect("ingest");
        assert_eq!(item.title, "CME product sectors");
        assert_eq!(item.url, "/visualizations/cme-product-sectors.html");
        assert_eq!(item.description, "Open interest by sector");
        assert_eq!(item.preview.as_deref(), Some("/images/cme.png"));
        assert_eq!(
            item.published_at,
            Some(Utc.with_ymd_and_hms(2013, 10, 1, 0, 0, 0).unwrap())
        );
        assert!(item.paginatable);
    }

    #[test]
    fn test_from_document_placeholder_preview() {
        let doc = SourceDocument::new(
            "/visualizations/pending.html",
            "---\ntitle: Pending\ngallery_preview: true\n---\n",
        );

        let item = Item::from_document(&doc).expect("ingest");
        assert!(item.paginatable);
        assert!(item.preview.is_none());
        assert!(item.published_at.is_none());
    }

    #[test]
    fn test_from_document_empty_preview_key() {
        let doc = SourceDocument::new(
            "/visualizations/n.html",
            "---\ntitle: N\ngallery_preview:\n---\n",
        );

        let item = Item::from_document(&doc).expect("ingest");
        assert!(item.paginatable);
        assert!(item.preview.is_none());
    }

    #[test]
    fn test_from_document_without_preview_is_not_paginatable() {
        let doc = SourceDocument::new("/about.html", "---\ntitle: About\n---\n");
        let item = Item::from_document(&doc).expect("ingest");
        assert!(!item.paginatable);
    }

    #[test]
    fn test_draft_is_not_paginatable() {
        let doc = SourceDocument::new(
            "/visualizations/wip.html",
            "---\ntitle: WIP\ndraft: true\ngallery_preview: wip.png\n---\n",
        );
        let item = Item::from_document(&doc).expect("ingest");
        assert!(!item.paginatable);
        assert_eq!(item.preview.as_deref(), Some("wip.png"));
    }

    #[test]
    fn test_from_document_bad_date() {
        let doc = SourceDocument::new(
            "/visualizations/bad.html",
            "---\ntitle: Bad\ndate: someday\ngallery_preview: true\n---\n",
        );
        let err = Item::from_document(&doc).unwrap_err();
        assert!(err.to_string().contains("/visualizations/bad.html"));
    }

    #[test]
    fn test_builder_methods() {
        let date = Utc.with_ymd_and_hms(2020, 5, 1, 0, 0, 0).unwrap();
        let item = Item::new("A", "/a.html")
            .with_date(date)
            .with_description("first")
            .with_preview("a.png")
            .paginatable(false);

        assert_eq!(item.published_at, Some(date));
        assert_eq!(item.description, "first");
        assert_eq!(item.preview.as_deref(), Some("a.png"));
        assert!(!item.paginatable);
    }
}
