//! Loaded documentation site.

use std::collections::HashSet;

use crate::nav::NavItem;
use crate::page::{Page, PageId};

/// All pages of a documentation source plus their navigation.
///
/// Pages are stored in discovery order and addressed by [`PageId`]. The
/// navigation references pages by id; a page may be absent from it
/// (unlisted) but never referenced without existing.
#[derive(Debug, Default)]
pub struct Site {
    pages: Vec<Page>,
    nav: Vec<NavItem>,
    listed: HashSet<PageId>,
}

impl Site {
    /// Create a site from pages and a navigation referencing them.
    #[must_use]
    pub fn new(pages: Vec<Page>, nav: Vec<NavItem>) -> Self {
        let listed = NavItem::pages(&nav).into_iter().collect();
        Self { pages, nav, listed }
    }

    /// All pages in discovery order.
    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Get page by id.
    #[must_use]
    pub fn page(&self, id: PageId) -> Option<&Page> {
        self.pages.get(id.index())
    }

    /// Iterate pages with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (PageId, &Page)> {
        self.pages
            .iter()
            .enumerate()
            .map(|(i, page)| (PageId::new(i), page))
    }

    /// Navigation tree in display order.
    #[must_use]
    pub fn nav(&self) -> &[NavItem] {
        &self.nav
    }

    /// Check whether a page appears in the navigation.
    #[must_use]
    pub fn is_listed(&self, id: PageId) -> bool {
        self.listed.contains(&id)
    }

    /// Number of pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Check if the site has no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
