//! Descriptors shared by the scanner, the renderer and the engine.
//!
//! Both types are serialized into `manifest.json` by the `scan` command, so
//! field names are part of the manifest format.

use serde::{Deserialize, Serialize};

/// One gallery image as the visitor sees it.
///
/// The `location` is the image identity: two descriptors with the same
/// location are the same image, whatever their position in a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    /// Image URL relative to the site root (e.g. `gallery/010-Wedding/001-First-Dance.jpg`)
    pub location: String,
    /// Alt text / caption
    pub label: String,
    /// Category key used by the gallery filter (e.g. `wedding`)
    pub category: String,
}

impl ImageDescriptor {
    pub fn new(
        location: impl Into<String>,
        label: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            location: location.into(),
            label: label.into(),
            category: category.into(),
        }
    }
}

/// One hero slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideDescriptor {
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}
