//! Shared types used by the scanner, the carousels and the simulator.
//!
//! [`ImageDescriptor`] is serialized into the scan manifest and read back by
//! `simulate`, so its field names are part of the manifest format.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A displayable image: a lightbox photo or a hero slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    /// Image URL relative to the site root.
    pub src: String,
    /// Alternative text, from the filename display title.
    pub alt: String,
    /// Caption shown under the image, from a sidecar `.txt` or the alt text.
    pub caption: String,
    /// Gallery category used by filter buttons (e.g. `rooms`, `dining`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ImageDescriptor {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        let alt = alt.into();
        Self {
            src: src.into(),
            caption: alt.clone(),
            alt,
            category: None,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

impl fmt::Display for ImageDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alt.is_empty() {
            write!(f, "({})", self.src)
        } else {
            f.write_str(&self.alt)
        }
    }
}

/// Outcome of loading an item's asset, reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed,
}

/// Loading indicator state of the current item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// The asset was requested and no outcome has been reported yet.
    Loading,
    /// The host reported an outcome. Failed loads settle too.
    Settled(LoadOutcome),
}
