//! Content discovery and manifest generation.
//!
//! Walks a site content directory to discover hero slides and gallery photos,
//! producing a [`Manifest`] of [`ImageDescriptor`]s that the carousels are
//! built from. The manifest is plain JSON so it can be inspected, checked in,
//! or handed to a browser binding.
//!
//! ## Directory Structure
//!
//! ```text
//! site/                              # Content root
//! ├── carousel.toml                  # Carousel configuration (optional)
//! ├── hero/                          # Hero slideshow, one image per slide
//! │   ├── 010-Lobby-at-Dusk.jpg
//! │   └── 020-Rooftop-Pool.jpg
//! └── gallery/                       # Lightbox gallery
//!     ├── 010-rooms/                 # Category "rooms"
//!     │   ├── 001-Deluxe-King.jpg
//!     │   └── 001-Deluxe-King.txt    # Caption sidecar
//!     ├── 020-dining/                # Category "dining"
//!     │   └── 001-Terrace.jpg
//!     └── 900-Map.png                # Uncategorized (shown under "all" only)
//! ```
//!
//! ## Ordering
//!
//! Category directories and images are sorted by their `NNN-` prefix, with
//! unnumbered entries after numbered ones in filename order. The gallery
//! order is uncategorized images first, then each category in turn; it is
//! the order the lightbox navigates in.
//!
//! ## Validation
//!
//! - No duplicate image numbers within one directory
//! - Both `hero/` and `gallery/` are optional; a missing section is empty

use crate::config::{self, CarouselConfig};
use crate::naming::parse_entry_name;
use crate::types::ImageDescriptor;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

pub const HERO_DIR: &str = "hero";
pub const GALLERY_DIR: &str = "gallery";

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "avif"];

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Content root is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("Duplicate image number {0} in {1}")]
    DuplicateNumber(u32, PathBuf),
}

/// Manifest output from the scan stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Hero slideshow slides in display order.
    #[serde(default)]
    pub hero: Vec<ImageDescriptor>,
    /// Gallery photos in lightbox order.
    #[serde(default)]
    pub gallery: Vec<ImageDescriptor>,
    /// Gallery categories in filter-button order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub config: CarouselConfig,
}

/// A gallery category discovered from a subdirectory of `gallery/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Filter value, e.g. `rooms`.
    pub slug: String,
    /// Button label, e.g. `Rooms`.
    pub title: String,
}

/// Scan a content root into a [`Manifest`].
pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let hero_dir = root.join(HERO_DIR);
    let hero = if hero_dir.is_dir() {
        let files = collect_images(&hero_dir)?;
        build_descriptors(&hero_dir, root, &files, None)?
    } else {
        Vec::new()
    };

    let (gallery, categories) = scan_gallery(root)?;

    let config = config::load_config(root)?;

    debug!(
        hero = hero.len(),
        gallery = gallery.len(),
        categories = categories.len(),
        "scan: complete"
    );

    Ok(Manifest {
        hero,
        gallery,
        categories,
        config,
    })
}

/// Walk `gallery/` two levels deep: loose images, then one category per subdirectory.
fn scan_gallery(root: &Path) -> Result<(Vec<ImageDescriptor>, Vec<Category>), ScanError> {
    let gallery_dir = root.join(GALLERY_DIR);
    if !gallery_dir.is_dir() {
        return Ok((Vec::new(), Vec::new()));
    }

    let mut loose = Vec::new();
    let mut by_dir: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();

    let walker = WalkDir::new(&gallery_dir)
        .min_depth(1)
        .max_depth(2)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e.path()));

    for entry in walker {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type().is_dir() {
            if entry.depth() == 1 {
                by_dir.entry(path.to_path_buf()).or_default();
            }
        } else if is_image(path) {
            if entry.depth() == 1 {
                loose.push(path.to_path_buf());
            } else if let Some(parent) = path.parent() {
                by_dir
                    .entry(parent.to_path_buf())
                    .or_default()
                    .push(path.to_path_buf());
            }
        }
    }

    let mut gallery = build_descriptors(&gallery_dir, root, &loose, None)?;

    let mut dirs: Vec<(PathBuf, Vec<PathBuf>)> = by_dir.into_iter().collect();
    dirs.sort_by_key(|(dir, _)| {
        let parsed = parse_entry_name(&file_name(dir));
        (parsed.sort_key(), file_name(dir))
    });

    let mut categories = Vec::new();
    for (dir, files) in dirs {
        if files.is_empty() {
            continue;
        }
        let parsed = parse_entry_name(&file_name(&dir));
        let slug = parsed.slug();
        categories.push(Category {
            slug: slug.clone(),
            title: title_case(&parsed.display_title),
        });
        gallery.extend(build_descriptors(&dir, root, &files, Some(&slug))?);
    }

    Ok((gallery, categories))
}

/// Images directly inside `dir`, by file name. Walk errors propagate.
fn collect_images(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut images = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_dir() && !is_hidden(path) && is_image(path) {
            images.push(path.to_path_buf());
        }
    }
    Ok(images)
}

/// Order one directory's images and turn them into descriptors.
fn build_descriptors(
    dir: &Path,
    root: &Path,
    files: &[PathBuf],
    category: Option<&str>,
) -> Result<Vec<ImageDescriptor>, ScanError> {
    let mut ordered: BTreeMap<(u32, String), &PathBuf> = BTreeMap::new();
    let mut seen_numbers = BTreeSet::new();
    for file in files {
        let stem = file
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let parsed = parse_entry_name(&stem);
        if let Some(num) = parsed.number
            && !seen_numbers.insert(num)
        {
            return Err(ScanError::DuplicateNumber(num, dir.to_path_buf()));
        }
        ordered.insert((parsed.sort_key(), file_name(file)), file);
    }

    let mut descriptors = Vec::with_capacity(ordered.len());
    for file in ordered.values() {
        let stem = file
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let alt = parse_entry_name(&stem).display_title;
        let caption = read_caption(file)?.unwrap_or_else(|| alt.clone());
        descriptors.push(ImageDescriptor {
            src: relative_url(file, root),
            alt,
            caption,
            category: category.map(str::to_string),
        });
    }
    Ok(descriptors)
}

/// Caption from the `.txt` sidecar next to an image, if present and non-empty.
fn read_caption(image: &Path) -> Result<Option<String>, ScanError> {
    let sidecar = image.with_extension("txt");
    if !sidecar.is_file() {
        return Ok(None);
    }
    let content = fs::read_to_string(&sidecar)?.trim().to_string();
    Ok((!content.is_empty()).then_some(content))
}

fn is_image(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Site-relative URL with forward slashes regardless of platform.
fn relative_url(path: &Path, root: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Capitalize the first letter of each word: `"spa and pool"` → `"Spa And Pool"`.
fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
