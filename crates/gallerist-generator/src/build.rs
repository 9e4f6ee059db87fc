//! Page tree generation.
//!
//! Runs selection, pagination and path resolution for one gallery and hands
//! the resulting page sequence to the renderer.

use gallerist_core::{CoreError, GalleryConfig, PaginationConfig, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    collector::{ContentIndex, ItemSource},
    paginate::{Page, build_page, calculate_pages, enabled},
    paths::PathResolver,
};

/// The canonical gallery index page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexPage {
    /// URL of the index (page 1).
    pub url: String,

    /// Title shown on the index.
    pub title: String,

    /// Meta description of the index.
    pub description: String,
}

impl IndexPage {
    /// Index page described by a gallery configuration.
    pub fn from_config(config: &GalleryConfig) -> Self {
        Self {
            url: config.index_url(),
            title: config.title.clone(),
            description: config.description.clone(),
        }
    }
}

/// Output slot for pages 2..N.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageDescriptor {
    /// URL the page is rendered at.
    pub url: String,

    /// Page number this slot holds.
    pub page_number: usize,
}

/// Where a page gets rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageTarget<H> {
    /// The caller's canonical index handle (page 1).
    Root(H),
    /// A numbered page.
    Numbered(PageDescriptor),
}

impl<H> PageTarget<H> {
    /// Whether this is the canonical index slot.
    pub fn is_root(&self) -> bool {
        matches!(self, Self::Root(_))
    }

    /// The root handle, if this is the index slot.
    pub fn root(&self) -> Option<&H> {
        match self {
            Self::Root(handle) => Some(handle),
            Self::Numbered(_) => None,
        }
    }
}

/// A page paired with its render target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryPage<'a, H> {
    /// Where to render.
    pub target: PageTarget<H>,

    /// What to render.
    pub pager: Page<'a>,
}

/// Builds the full page sequence for a gallery.
#[derive(Debug, Clone)]
pub struct PageTreeBuilder {
    config: PaginationConfig,
    resolver: PathResolver,
}

impl PageTreeBuilder {
    /// Create a builder, validating the pagination settings.
    pub fn new(config: PaginationConfig) -> Result<Self> {
        config.validate()?;
        let resolver = PathResolver::new(&config)?;
        Ok(Self { config, resolver })
    }

    /// Create a builder from a gallery configuration.
    pub fn from_gallery(gallery: &GalleryConfig) -> Result<Self> {
        Self::new(gallery.pagination())
    }

    /// Pagination settings in use.
    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    /// URL of a given page.
    pub fn path_for(&self, page_number: Option<usize>) -> Option<String> {
        self.resolver.path_for(page_number)
    }

    /// Whether `source` yields a gallery at all.
    pub fn is_enabled<S: ItemSource + ?Sized>(&self, source: &S) -> bool {
        enabled(
            &self.config,
            source.items().filter(|item| item.paginatable).count(),
        )
    }

    /// Every page of the gallery, in order. Empty when pagination is
    /// disabled or nothing is paginatable.
    pub fn build<'a, S: ItemSource + ?Sized>(&self, source: &'a S) -> Result<Vec<Page<'a>>> {
        let sorted = ContentIndex::select(source);

        let per_page = match self.config.per_page {
            Some(per_page) if enabled(&self.config, sorted.len()) => per_page,
            _ => {
                info!(
                    base_path = %self.config.base_path,
                    items = sorted.len(),
                    "nothing to paginate"
                );
                return Ok(Vec::new());
            }
        };

        let total_pages = calculate_pages(sorted.len(), per_page)?;
        info!(
            base_path = %self.config.base_path,
            items = sorted.len(),
            per_page,
            total_pages,
            "building page tree"
        );

        let pages = (1..=total_pages)
            .map(|page_number| -> Result<Page<'a>> {
                let page = build_page(&sorted, per_page, page_number, total_pages)?;
                debug!(page = page_number, items = page.items.len(), "built page");
                Ok(self.link(page))
            })
            .collect::<Result<Vec<_>>>()?;

        info!(pages = pages.len(), "page tree complete");
        Ok(pages)
    }

    /// Like [`build`](Self::build), with page 1 bound to `root` and pages
    /// 2..N given fresh descriptors at their numbered paths.
    ///
    /// `root` is dropped unused when the gallery is empty.
    pub fn build_with_root<'a, S, H>(
        &self,
        source: &'a S,
        root: H,
    ) -> Result<Vec<GalleryPage<'a, H>>>
    where
        S: ItemSource + ?Sized,
    {
        let mut pages = self.build(source)?.into_iter();
        let Some(first) = pages.next() else {
            return Ok(Vec::new());
        };

        let mut tree = Vec::with_capacity(pages.len() + 1);
        tree.push(GalleryPage {
            target: PageTarget::Root(root),
            pager: first,
        });
        tree.extend(pages.map(|pager| GalleryPage {
            target: PageTarget::Numbered(PageDescriptor {
                url: self.resolver.page_url(pager.page_number),
                page_number: pager.page_number,
            }),
            pager,
        }));

        Ok(tree)
    }

    /// A single page with links resolved, for deep links.
    pub fn page<'a, S: ItemSource + ?Sized>(
        &self,
        source: &'a S,
        page_number: usize,
    ) -> Result<Page<'a>> {
        let sorted = ContentIndex::select(source);

        let per_page = match self.config.per_page {
            Some(per_page) if enabled(&self.config, sorted.len()) => per_page,
            _ => return Err(CoreError::out_of_range(page_number, 0)),
        };

        let total_pages = calculate_pages(sorted.len(), per_page)?;
        let page = build_page(&sorted, per_page, page_number, total_pages)?;
        Ok(self.link(page))
    }

    fn link<'a>(&self, page: Page<'a>) -> Page<'a> {
        Page {
            previous_page_url: self.resolver.path_for(page.previous_page),
            next_page_url: self.resolver.path_for(page.next_page),
            ..page
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use gallerist_core::Item;

    use super::*;

    fn dated(title: &str, day: u32) -> Item {
        Item::new(title, format!("/visualizations/{title}.html"))
            .with_date(Utc.with_ymd_and_hms(2014, 1, day, 0, 0, 0).unwrap())
    }

    fn builder(per_page: Option<usize>) -> PageTreeBuilder {
        PageTreeBuilder::new(PaginationConfig {
            per_page,
            base_path: "/visualizations/".to_string(),
            numbered_path_template: "page:num/".to_string(),
            gallery_root: "visualizations".to_string(),
        })
        .expect("valid config")
    }

    fn titles(page: &Page<'_>) -> Vec<String> {
        page.items.iter().map(|i| i.title.clone()).collect()
    }

    #[test]
    fn test_three_items_two_per_page() {
        let items = vec![dated("C", 1), dated("A", 5), dated("B", 3)];
        let pages = builder(Some(2)).build(&items).unwrap();

        assert_eq!(pages.len(), 2);

        assert_eq!(titles(&pages[0]), ["A", "B"]);
        assert_eq!(pages[0].page_number, 1);
        assert_eq!(pages[0].total_pages, 2);
        assert_eq!(pages[0].previous_page, None);
        assert_eq!(pages[0].next_page, Some(2));
        assert_eq!(pages[0].previous_page_url, None);
        assert_eq!(
            pages[0].next_page_url.as_deref(),
            Some("/visualizations/page2/")
        );

        assert_eq!(titles(&pages[1]), ["C"]);
        assert_eq!(pages[1].previous_page, Some(1));
        assert_eq!(pages[1].next_page, None);
        assert_eq!(
            pages[1].previous_page_url.as_deref(),
            Some("/visualizations/")
        );
        assert_eq!(pages[1].next_page_url, None);
    }

    #[test]
    fn test_empty_corpus() {
        let items: Vec<Item> = Vec::new();
        let builder = builder(Some(3));

        assert!(!builder.is_enabled(&items));
        assert!(builder.build(&items).unwrap().is_empty());
    }

    #[test]
    fn test_no_paginatable_items() {
        let items = vec![dated("about", 1).paginatable(false)];
        let builder = builder(Some(3));

        assert!(!builder.is_enabled(&items));
        assert!(builder.build(&items).unwrap().is_empty());
    }

    #[test]
    fn test_pagination_not_configured() {
        let items = vec![dated("A", 1), dated("B", 2)];
        let builder = builder(None);

        assert!(!builder.is_enabled(&items));
        assert!(builder.build(&items).unwrap().is_empty());
    }

    #[test]
    fn test_exact_fit_single_page() {
        let items: Vec<_> = (1..=4).map(|d| dated(&format!("v{d}"), d)).collect();
        let pages = builder(Some(4)).build(&items).unwrap();

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].items.len(), 4);
        assert_eq!(pages[0].total_pages, 1);
        assert_eq!(pages[0].previous_page_url, None);
        assert_eq!(pages[0].next_page_url, None);
    }

    #[test]
    fn test_interior_links() {
        let items: Vec<_> = (1..=7).map(|d| dated(&format!("v{d}"), d)).collect();
        let pages = builder(Some(2)).build(&items).unwrap();

        assert_eq!(pages.len(), 4);
        assert_eq!(
            pages[1].previous_page_url.as_deref(),
            Some("/visualizations/")
        );
        assert_eq!(
            pages[1].next_page_url.as_deref(),
            Some("/visualizations/page3/")
        );
        assert_eq!(
            pages[2].previous_page_url.as_deref(),
            Some("/visualizations/page2/")
        );
        assert_eq!(titles(&pages[3]), ["v1"]);
    }

    #[test]
    fn test_build_with_root() {
        let items: Vec<_> = (1..=5).map(|d| dated(&format!("v{d}"), d)).collect();
        let root = IndexPage::from_config(&GalleryConfig {
            paginate: Some(2),
            ..Default::default()
        });

        let tree = builder(Some(2)).build_with_root(&items, root.clone()).unwrap();

        assert_eq!(tree.len(), 3);
        assert_eq!(tree[0].target, PageTarget::Root(root));
        assert_eq!(
            tree[0].target.root().map(|r| r.title.as_str()),
            Some("Visualization gallery")
        );
        assert_eq!(
            tree[1].target,
            PageTarget::Numbered(PageDescriptor {
                url: "/visualizations/page2/".to_string(),
                page_number: 2,
            })
        );
        assert_eq!(tree.iter().filter(|p| p.target.is_root()).count(), 1);
        assert_eq!(tree[2].pager.page_number, 3);
    }

    #[test]
    fn test_build_with_root_empty() {
        let items: Vec<Item> = Vec::new();
        let tree = builder(Some(2)).build_with_root(&items, "index").unwrap();
        assert!(tree.is_empty());
    }

    #[test]
    fn test_deep_link_page() {
        let items: Vec<_> = (1..=5).map(|d| dated(&format!("v{d}"), d)).collect();
        let builder = builder(Some(2));

        let page = builder.page(&items, 2).unwrap();
        assert_eq!(titles(&page), ["v3", "v2"]);
        assert_eq!(page.previous_page_url.as_deref(), Some("/visualizations/"));
        assert_eq!(
            page.next_page_url.as_deref(),
            Some("/visualizations/page3/")
        );

        assert!(matches!(
            builder.page(&items, 4),
            Err(CoreError::OutOfRange {
                page: 4,
                total_pages: 3
            })
        ));
        assert!(matches!(
            builder.page(&items, 0),
            Err(CoreError::OutOfRange { page: 0, .. })
        ));
    }

    #[test]
    fn test_deep_link_into_empty_gallery() {
        let items: Vec<Item> = Vec::new();
        assert!(matches!(
            builder(Some(2)).page(&items, 1),
            Err(CoreError::OutOfRange {
                page: 1,
                total_pages: 0
            })
        ));
    }

    #[test]
    fn test_invalid_config_rejected_up_front() {
        let zero = PaginationConfig::new(0, "/g/", "page:num/", "g");
        assert!(PageTreeBuilder::new(zero).unwrap_err().is_invalid_config());

        let no_placeholder = PaginationConfig::new(3, "/g/", "page/", "g");
        assert!(
            PageTreeBuilder::new(no_placeholder)
                .unwrap_err()
                .is_invalid_config()
        );
    }

    #[test]
    fn test_failing_config_never_yields_pages() {
        let items: Vec<_> = (1..=5).map(|d| dated(&format!("v{d}"), d)).collect();
        let config = PaginationConfig::new(0, "/visualizations/", "page:num/", "visualizations");

        let pages = PageTreeBuilder::new(config).and_then(|builder| builder.build(&items));
        assert!(pages.unwrap_err().is_invalid_config());
    }

    #[test]
    fn test_config_accessor() {
        let builder = PageTreeBuilder::from_gallery(&GalleryConfig {
            paginate: Some(7),
            ..Default::default()
        })
        .expect("valid gallery");

        assert_eq!(builder.config().per_page, Some(7));
        assert_eq!(builder.config().base_path, "/visualizations/");
        assert_eq!(builder.config().numbered_path_template, "page:num/");
    }

    #[test]
    fn test_path_for() {
        let builder = builder(Some(2));
        assert_eq!(builder.path_for(Some(1)).as_deref(), Some("/visualizations/"));
        assert_eq!(
            builder.path_for(Some(2)).as_deref(),
            Some("/visualizations/page2/")
        );
        assert_eq!(builder.path_for(None), None);
    }

    #[test]
    fn test_concurrent_passes() {
        let gallery: Vec<_> = (1..=9).map(|d| dated(&format!("g{d}"), d)).collect();
        let blog: Vec<_> = (1..=4).map(|d| dated(&format!("b{d}"), d)).collect();

        let gallery_builder = builder(Some(3));
        let blog_builder = PageTreeBuilder::new(PaginationConfig::new(
            2,
            "/",
            "page/:num/",
            "",
        ))
        .unwrap();

        let (gallery_pages, blog_pages) = std::thread::scope(|s| {
            let g = s.spawn(|| gallery_builder.build(&gallery).map(|p| p.len()));
            let b = s.spawn(|| {
                blog_builder.build(&blog).map(|pages| {
                    pages
                        .iter()
                        .filter_map(|p| p.next_page_url.clone())
                        .collect::<Vec<_>>()
                })
            });
            (g.join().unwrap(), b.join().unwrap())
        });

        assert_eq!(gallery_pages.unwrap(), 3);
        assert_eq!(blog_pages.unwrap(), ["/page/2/"]);
    }
}
