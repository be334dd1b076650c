//! Shared test utilities for the hotel-carousel test suite.
//!
//! Builds a small hotel site on disk and provides lookup helpers that work
//! with scan-phase data ([`ImageDescriptor`] lists).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_site();
//! let manifest = scan(tmp.path()).unwrap();
//!
//! assert_eq!(alts(&manifest.hero), vec!["Lobby at Dusk", "Rooftop Pool", "Garden Suite"]);
//! let deluxe = find_item(&manifest.gallery, "Deluxe King");
//! assert_eq!(deluxe.category.as_deref(), Some("rooms"));
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::types::ImageDescriptor;

// =========================================================================
// Fixture setup
// =========================================================================

/// Write an empty image file at `rel`, creating parent directories.
///
/// Scanning only looks at names, so the bytes never matter.
pub fn write_image(root: &Path, rel: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, b"").unwrap();
}

/// Lay out a hotel site in a temp directory and return it.
///
/// ```text
/// carousel.toml                      interval_ms = 4000
/// hero/010-Lobby-at-Dusk.jpg
/// hero/020-Rooftop-Pool.jpg
/// hero/030-Garden-Suite.jpg
/// gallery/900-Map.png
/// gallery/010-rooms/001-Deluxe-King.jpg (+ .txt caption)
/// gallery/010-rooms/002-Twin-Room.jpg
/// gallery/020-dining/001-Terrace.jpg
/// gallery/030-Spa-and-Pool/001-Sauna.jpg
/// ```
pub fn setup_site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    for rel in [
        "hero/010-Lobby-at-Dusk.jpg",
        "hero/020-Rooftop-Pool.jpg",
        "hero/030-Garden-Suite.jpg",
        "gallery/900-Map.png",
        "gallery/010-rooms/001-Deluxe-King.jpg",
        "gallery/010-rooms/002-Twin-Room.jpg",
        "gallery/020-dining/001-Terrace.jpg",
        "gallery/030-Spa-and-Pool/001-Sauna.jpg",
    ] {
        write_image(root, rel);
    }
    fs::write(
        root.join("gallery/010-rooms/001-Deluxe-King.txt"),
        "King bed with a view over the bay\n",
    )
    .unwrap();
    fs::write(root.join("carousel.toml"), "[slideshow]\ninterval_ms = 4000\n").unwrap();

    tmp
}

// =========================================================================
// Lookups: panic with a clear message on miss
// =========================================================================

/// Find an item by alt text. Panics if not found.
pub fn find_item<'a>(items: &'a [ImageDescriptor], alt: &str) -> &'a ImageDescriptor {
    items.iter().find(|i| i.alt == alt).unwrap_or_else(|| {
        let available = alts(items);
        panic!("item '{alt}' not found. Available: {available:?}")
    })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// All alt texts in order.
pub fn alts(items: &[ImageDescriptor]) -> Vec<&str> {
    items.iter().map(|i| i.alt.as_str()).collect()
}

/// Four-item gallery used by controller-level tests.
pub fn sample_gallery() -> Vec<ImageDescriptor> {
    vec![
        ImageDescriptor::new("gallery/900-Map.png", "Map"),
        ImageDescriptor::new("gallery/010-rooms/001-Deluxe-King.jpg", "Deluxe King")
            .with_caption("King bed with a view over the bay")
            .with_category("rooms"),
        ImageDescriptor::new("gallery/010-rooms/002-Twin-Room.jpg", "Twin Room")
            .with_category("rooms"),
        ImageDescriptor::new("gallery/020-dining/001-Terrace.jpg", "Terrace")
            .with_category("dining"),
    ]
}
