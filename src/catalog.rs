//! The image catalog: every gallery image, in display order, captured once.

use crate::surface::Surface;
use crate::types::ImageDescriptor;

/// Full ordered sequence of gallery images. Never changes after capture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    images: Vec<ImageDescriptor>,
}

impl Catalog {
    pub fn new(images: Vec<ImageDescriptor>) -> Self {
        Self { images }
    }

    /// Capture the catalog from whatever the surface currently displays.
    pub fn capture<S: Surface + ?Sized>(surface: &S) -> Self {
        let images = surface.gallery_items();
        log::debug!("captured catalog of {} images", images.len());
        Self::new(images)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ImageDescriptor> {
        self.images.get(index)
    }

    pub fn images(&self) -> &[ImageDescriptor] {
        &self.images
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ImageDescriptor> {
        self.images.iter()
    }

    /// Index of the first image at `location`.
    pub fn position_of(&self, location: &str) -> Option<usize> {
        self.images.iter().position(|img| img.location == location)
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for img in &self.images {
            if !seen.contains(&img.category.as_str()) {
                seen.push(&img.category);
            }
        }
        seen
    }
}
