//! The rendering surface the engine reads from and projects onto.
//!
//! The engine never decides what markup looks like. It needs a handful of
//! capabilities: enumerate the gallery, flip visibility and "active" flags,
//! show the lightbox, annotate the form. [`Surface`] is that contract.
//!
//! [`MemorySurface`] implements it in memory. It can be built from a catalog
//! directly or captured from rendered page HTML with [`MemorySurface::from_html`],
//! and it is what the `replay` command and the tests drive.

use crate::catalog::Catalog;
use crate::chrome::{ChromeState, ScrollTarget};
use crate::filter::ALL;
use crate::form::{Banner, BannerId, FieldError};
use crate::types::ImageDescriptor;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

pub trait Surface {
    // ---- reading -------------------------------------------------------

    /// Every gallery entry, in document order.
    fn gallery_items(&self) -> Vec<ImageDescriptor>;

    /// Locations of the entries currently shown, in display order.
    fn visible_locations(&self) -> Vec<String>;

    fn slide_count(&self) -> usize;

    /// Scroll-dependent elements with their document offsets.
    fn scroll_targets(&self) -> Vec<ScrollTarget> {
        Vec::new()
    }

    // ---- gallery, slider, lightbox --------------------------------------

    fn set_item_visible(&mut self, index: usize, visible: bool);

    /// Mark slide `index` and its dot active, clearing all others.
    fn set_active_slide(&mut self, index: usize);

    /// Mark the filter control with this key active, clearing all others.
    fn set_active_filter(&mut self, key: &str);

    /// Show the lightbox overlay with `image`, or with nothing when the
    /// filtered view is empty.
    fn show_lightbox(&mut self, image: Option<&ImageDescriptor>);

    fn hide_lightbox(&mut self);

    fn set_scroll_locked(&mut self, locked: bool);

    // ---- contact form ---------------------------------------------------

    fn clear_field_errors(&mut self);

    fn mark_field_error(&mut self, error: &FieldError);

    /// `Some(label)` disables the submit control and relabels it; `None`
    /// restores the original label and re-enables it.
    fn set_submit_busy(&mut self, label: Option<&str>);

    fn reset_form(&mut self);

    fn show_banner(&mut self, banner: &Banner);

    /// Remove a banner. False if it is already gone.
    fn remove_banner(&mut self, id: BannerId) -> bool;

    fn clear_banners(&mut self);

    // ---- page chrome ----------------------------------------------------

    fn set_chrome(&mut self, chrome: ChromeState);

    fn mark_revealed(&mut self, id: &str);

    fn load_image(&mut self, id: &str, src: &str);

    fn scroll_to(&mut self, y: f64);
}

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("invalid selector {selector}: {reason}")]
    Selector { selector: String, reason: String },
}

fn selector(css: &str) -> Result<Selector, CaptureError> {
    Selector::parse(css).map_err(|e| CaptureError::Selector {
        selector: css.to_string(),
        reason: format!("{e:?}"),
    })
}

#[derive(Debug, Clone, PartialEq)]
struct Item {
    image: ImageDescriptor,
    visible: bool,
}

/// In-memory surface that keeps the projected state inspectable.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    items: Vec<Item>,
    display_order: Vec<usize>,
    filter_keys: Vec<String>,
    active_filter: Option<String>,
    slide_count: usize,
    active_slide: Option<usize>,
    lightbox_open: bool,
    lightbox_image: Option<ImageDescriptor>,
    scroll_locked: bool,
    field_errors: Vec<FieldError>,
    submit_label: Option<String>,
    form_resets: usize,
    banners: Vec<Banner>,
    chrome: ChromeState,
    revealed: Vec<String>,
    loaded: Vec<(String, String)>,
    scroll_targets: Vec<ScrollTarget>,
    scroll_y: f64,
}

impl MemorySurface {
    /// A surface showing `catalog` with one filter control per category plus
    /// "all", and `slide_count` hero slides.
    pub fn new(catalog: &Catalog, slide_count: usize) -> Self {
        let mut filter_keys = vec![ALL.to_string()];
        filter_keys.extend(catalog.categories().into_iter().map(str::to_string));
        Self::from_parts(catalog.images().to_vec(), filter_keys, slide_count)
    }

    fn from_parts(images: Vec<ImageDescriptor>, filter_keys: Vec<String>, slide_count: usize) -> Self {
        let items: Vec<Item> = images
            .into_iter()
            .map(|image| Item {
                image,
                visible: true,
            })
            .collect();
        Self {
            display_order: (0..items.len()).collect(),
            items,
            filter_keys,
            slide_count,
            ..Default::default()
        }
    }

    /// Capture a surface from rendered page markup.
    ///
    /// Reads `.slide` elements, `.filter-btn[data-filter]` controls and
    /// `.gallery-item[data-category]` entries with their `img` source and
    /// alt text. Entries without an image are skipped.
    pub fn from_html(html: &str) -> Result<Self, CaptureError> {
        let document = Html::parse_document(html);
        let slide_sel = selector(".slide")?;
        let filter_sel = selector(".filter-btn[data-filter]")?;
        let item_sel = selector(".gallery-item")?;
        let img_sel = selector("img")?;

        let slide_count = document.select(&slide_sel).count();
        let filter_keys = document
            .select(&filter_sel)
            .filter_map(|el| el.value().attr("data-filter"))
            .map(str::to_string)
            .collect();

        let images = document
            .select(&item_sel)
            .enumerate()
            .filter_map(|(i, el)| {
                let captured = capture_item(el, &img_sel);
                if captured.is_none() {
                    log::warn!("gallery item {i} has no image, skipped");
                }
                captured
            })
            .collect();

        Ok(Self::from_parts(images, filter_keys, slide_count))
    }

    pub fn with_scroll_targets(mut self, targets: Vec<ScrollTarget>) -> Self {
        self.scroll_targets = targets;
        self
    }

    /// Rearrange display order without touching visibility, as a partial
    /// re-render might. `order` lists item indices; missing ones keep their
    /// relative order at the end.
    pub fn reorder(&mut self, order: &[usize]) {
        let mut next: Vec<usize> = order
            .iter()
            .copied()
            .filter(|&i| i < self.items.len())
            .collect();
        for i in 0..self.items.len() {
            if !next.contains(&i) {
                next.push(i);
            }
        }
        self.display_order = next;
    }

    // ---- inspection ----------------------------------------------------

    pub fn is_visible(&self, index: usize) -> bool {
        self.items.get(index).is_some_and(|item| item.visible)
    }

    pub fn visible_count(&self) -> usize {
        self.items.iter().filter(|item| item.visible).count()
    }

    pub fn filter_keys(&self) -> &[String] {
        &self.filter_keys
    }

    pub fn active_filter(&self) -> Option<&str> {
        self.active_filter.as_deref()
    }

    pub fn active_slide(&self) -> Option<usize> {
        self.active_slide
    }

    pub fn lightbox_open(&self) -> bool {
        self.lightbox_open
    }

    pub fn lightbox_image(&self) -> Option<&ImageDescriptor> {
        self.lightbox_image.as_ref()
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    pub fn submit_label(&self) -> Option<&str> {
        self.submit_label.as_deref()
    }

    pub fn form_resets(&self) -> usize {
        self.form_resets
    }

    pub fn banners(&self) -> &[Banner] {
        &self.banners
    }

    pub fn chrome(&self) -> ChromeState {
        self.chrome
    }

    pub fn revealed(&self) -> &[String] {
        &self.revealed
    }

    pub fn loaded(&self) -> &[(String, String)] {
        &self.loaded
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }
}

fn capture_item(el: ElementRef<'_>, img_sel: &Selector) -> Option<ImageDescriptor> {
    let category = el.value().attr("data-category").unwrap_or_default();
    let img = el.select(img_sel).next()?;
    let location = img.value().attr("src")?;
    let label = img.value().attr("alt").unwrap_or_default();
    Some(ImageDescriptor::new(location, label, category))
}

impl Surface for MemorySurface {
    fn gallery_items(&self) -> Vec<ImageDescriptor> {
        self.items.iter().map(|item| item.image.clone()).collect()
    }

    fn visible_locations(&self) -> Vec<String> {
        self.display_order
            .iter()
            .filter_map(|&i| self.items.get(i))
            .filter(|item| item.visible)
            .map(|item| item.image.location.clone())
            .collect()
    }

    fn slide_count(&self) -> usize {
        self.slide_count
    }

    fn scroll_targets(&self) -> Vec<ScrollTarget> {
        self.scroll_targets.clone()
    }

    fn set_item_visible(&mut self, index: usize, visible: bool) {
        if let Some(item) = self.items.get_mut(index) {
            item.visible = visible;
        }
    }

    fn set_active_slide(&mut self, index: usize) {
        self.active_slide = (index < self.slide_count).then_some(index);
    }

    fn set_active_filter(&mut self, key: &str) {
        self.active_filter = self
            .filter_keys
            .iter()
            .find(|k| k.as_str() == key)
            .cloned();
    }

    fn show_lightbox(&mut self, image: Option<&ImageDescriptor>) {
        self.lightbox_open = true;
        self.lightbox_image = image.cloned();
    }

    fn hide_lightbox(&mut self) {
        self.lightbox_open = false;
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }

    fn clear_field_errors(&mut self) {
        self.field_errors.clear();
    }

    fn mark_field_error(&mut self, error: &FieldError) {
        self.field_errors.retain(|e| e.field != error.field);
        self.field_errors.push(error.clone());
    }

    fn set_submit_busy(&mut self, label: Option<&str>) {
        self.submit_label = label.map(str::to_string);
    }

    fn reset_form(&mut self) {
        self.form_resets += 1;
    }

    fn show_banner(&mut self, banner: &Banner) {
        // newest first, like a message inserted at the top of the form
        self.banners.insert(0, banner.clone());
    }

    fn remove_banner(&mut self, id: BannerId) -> bool {
        let before = self.banners.len();
        self.banners.retain(|b| b.id != id);
        self.banners.len() != before
    }

    fn clear_banners(&mut self) {
        self.banners.clear();
    }

    fn set_chrome(&mut self, chrome: ChromeState) {
        self.chrome = chrome;
    }

    fn mark_revealed(&mut self, id: &str) {
        self.revealed.push(id.to_string());
    }

    fn load_image(&mut self, id: &str, src: &str) {
        self.loaded.push((id.to_string(), src.to_string()));
    }

    fn scroll_to(&mut self, y: f64) {
        self.scroll_y = y;
    }
}
