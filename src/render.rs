//! Page rendering.
//!
//! Turns a scan [`Manifest`] into the single portfolio page: navbar, hero
//! slider, filterable gallery, lightbox overlay, contact form and back-to-top
//! control. The markup is the contract the engine's surface is captured
//! from, so the class names and data attributes below are load-bearing:
//!
//! | Element | Marker |
//! |---------|--------|
//! | Hero slide | `.slide` (first one `.active`) with a matching `.dot` |
//! | Filter control | `.filter-btn[data-filter]`, `all` first |
//! | Gallery entry | `.gallery-item[data-category]` wrapping one `img` |
//! | Lightbox | `#lightbox` with `#lightboxImage` |
//! | Form field | `#<fieldId>` inside a `.form-group` |
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── hero/
//! │   └── 001-First-Light.jpg
//! └── gallery/
//!     └── 010-Wedding/
//!         └── 001-First-Dance.jpg
//! ```
//!
//! Images are copied verbatim from the content root; only those referenced
//! by the manifest are copied.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating,
//! which escapes every interpolated value.

use crate::config;
use crate::filter::ALL;
use crate::form::Field;
use crate::scan::{Category, Manifest};
use crate::types::{ImageDescriptor, SlideDescriptor};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image listed in manifest not found: {0}")]
    MissingImage(PathBuf),
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// What [`render_site`] wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSummary {
    pub page: PathBuf,
    pub slides: usize,
    pub images: usize,
    pub copied: usize,
}

/// Render `index.html` into `output_dir` and copy the referenced images
/// from `source`.
pub fn render_site(
    manifest: &Manifest,
    source: &Path,
    output_dir: &Path,
) -> Result<RenderSummary, RenderError> {
    fs::create_dir_all(output_dir)?;

    let page = output_dir.join("index.html");
    fs::write(&page, render_page(manifest).into_string())?;
    log::debug!("wrote {}", page.display());

    let locations = manifest
        .slides
        .iter()
        .map(|s| s.location.as_str())
        .chain(manifest.images.iter().map(|i| i.location.as_str()));
    let mut copied = 0;
    for location in locations {
        let from = source.join(location);
        if !from.is_file() {
            return Err(RenderError::MissingImage(from));
        }
        let to = output_dir.join(location);
        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(&from, &to)?;
        copied += 1;
    }

    Ok(RenderSummary {
        page,
        slides: manifest.slides.len(),
        images: manifest.images.len(),
        copied,
    })
}

/// The complete page.
pub fn render_page(manifest: &Manifest) -> Markup {
    let title = &manifest.config.site.title;
    let css = format!(
        "{}\n\n{}",
        config::generate_color_css(&manifest.config.colors),
        CSS_STATIC
    );
    let content = html! {
        (navbar(title))
        (hero(&manifest.slides))
        (gallery(&manifest.config.site.gallery_heading, &manifest.categories, &manifest.images))
        (contact_form())
        (lightbox())
        button #backToTop.back-to-top aria-label="Back to top" { "↑" }
    };
    base_document(title, &css, content)
}

// ============================================================================
// HTML Components
// ============================================================================

fn base_document(title: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                (content)
            }
        }
    }
}

fn navbar(title: &str) -> Markup {
    html! {
        nav #navbar.navbar {
            div.nav-container {
                a.nav-logo href="#home" { (title) }
                ul #navMenu.nav-menu {
                    li { a.nav-link href="#home" { "Home" } }
                    li { a.nav-link href="#gallery" { "Gallery" } }
                    li { a.nav-link href="#contact" { "Contact" } }
                }
                div #navToggle.nav-toggle aria-label="Menu" {
                    span.bar {}
                    span.bar {}
                    span.bar {}
                }
            }
        }
    }
}

fn hero(slides: &[SlideDescriptor]) -> Markup {
    html! {
        section #home.hero {
            div.hero-slider {
                @for (i, slide) in slides.iter().enumerate() {
                    div.slide.active[i == 0] {
                        img src=(slide.location) alt=(slide.caption.as_deref().unwrap_or(""));
                        @if let Some(caption) = &slide.caption {
                            div.slide-caption { p { (caption) } }
                        }
                    }
                }
            }
            @if slides.len() > 1 {
                button.slider-prev aria-label="Previous slide" { "‹" }
                button.slider-next aria-label="Next slide" { "›" }
                div.slider-dots {
                    @for i in 0..slides.len() {
                        span.dot.active[i == 0] data-slide=(i) {}
                    }
                }
            }
        }
    }
}

fn gallery(heading: &str, categories: &[Category], images: &[ImageDescriptor]) -> Markup {
    html! {
        section #gallery.section.scroll-animate {
            h2.section-title { (heading) }
            div.gallery-filters {
                button.filter-btn.active data-filter=(ALL) { "All" }
                @for category in categories {
                    button.filter-btn data-filter=(category.key) { (category.label) }
                }
            }
            div #galleryGrid.gallery-grid {
                @for image in images {
                    div.gallery-item data-category=(image.category) {
                        img src=(image.location) alt=(image.label) loading="lazy";
                        div.gallery-overlay { span { (image.label) } }
                    }
                }
            }
        }
    }
}

fn contact_form() -> Markup {
    html! {
        section #contact.section.scroll-animate {
            h2.section-title { "Get in Touch" }
            form #contactForm.contact-form novalidate {
                @for field in Field::ALL {
                    div.form-group.wide[field == Field::Message] {
                        label for=(field.id()) {
                            (field.label())
                            @if field.is_required() { " *" }
                        }
                        @match field {
                            Field::Message => {
                                textarea id=(field.id()) name=(field.id()) rows="5" {}
                            }
                            _ => {
                                input id=(field.id()) name=(field.id()) type=(input_type(field))
                                    required[field.is_required()];
                            }
                        }
                    }
                }
                button.submit-btn type="submit" { "Send Message" }
            }
        }
    }
}

fn input_type(field: Field) -> &'static str {
    match field {
        Field::Email => "email",
        Field::Phone => "tel",
        Field::EventDate => "date",
        _ => "text",
    }
}

fn lightbox() -> Markup {
    html! {
        div #lightbox.lightbox {
            button.lightbox-close aria-label="Close" { "×" }
            button.lightbox-prev aria-label="Previous image" { "‹" }
            img #lightboxImage src="" alt="";
            button.lightbox-next aria-label="Next image" { "›" }
        }
    }
}
