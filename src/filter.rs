//! Gallery category filter.
//!
//! One filter button is active at a time. The special value [`ALL`] shows
//! every item; any other value shows only items whose category matches it
//! exactly. Uncategorized items are therefore visible under [`ALL`] only.
//!
//! Filtering is independent of the lightbox: hidden thumbnails stay in the
//! lightbox's navigation order, matching how the gallery page behaves.

use crate::types::ImageDescriptor;
use tracing::debug;

/// Filter value that shows every item.
pub const ALL: &str = "all";

/// Active filter state of a gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryFilter {
    active: String,
}

impl Default for GalleryFilter {
    fn default() -> Self {
        Self {
            active: ALL.to_string(),
        }
    }
}

impl GalleryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently active filter value.
    pub fn active(&self) -> &str {
        &self.active
    }

    /// Make `filter` the active button. Returns `true` if it changed.
    pub fn select(&mut self, filter: &str) -> bool {
        if self.active == filter {
            return false;
        }
        debug!(from = %self.active, to = filter, "filter: select");
        self.active = filter.to_string();
        true
    }

    /// Whether an item with `category` is shown under the active filter.
    pub fn shows(&self, category: Option<&str>) -> bool {
        self.active == ALL || category == Some(self.active.as_str())
    }

    pub fn is_shown(&self, item: &ImageDescriptor) -> bool {
        self.shows(item.category.as_deref())
    }

    /// Visibility flag for every item, in order.
    pub fn visibility(&self, items: &[ImageDescriptor]) -> Vec<bool> {
        items.iter().map(|item| self.is_shown(item)).collect()
    }

    /// Indices of the items shown under the active filter.
    pub fn visible_indices(&self, items: &[ImageDescriptor]) -> Vec<usize> {
        items
            .iter()
            .enumerate()
            .filter(|(_, item)| self.is_shown(item))
            .map(|(i, _)| i)
            .collect()
    }
}

/// Distinct categories in first-seen order, for rendering filter buttons.
pub fn categories(items: &[ImageDescriptor]) -> Vec<&str> {
    let mut out: Vec<&str> = Vec::new();
    for category in items.iter().filter_map(|item| item.category.as_deref()) {
        if !out.contains(&category) {
            out.push(category);
        }
    }
    out
}
