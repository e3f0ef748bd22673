//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every entity (slide, category, image, replay step) is its semantic
//! identity, with file paths and secondary state shown as indented context
//! lines.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Hero
//! 001 Every love story is beautiful
//!     Source: hero/001-First-Light.jpg
//! 002 (002-Golden-Hour.jpg)
//!
//! Gallery
//! 001 Wedding (3 photos)
//!     Filter: wedding
//!     Source: gallery/010-Wedding/
//!     001 First Dance
//!         Source: 001-First-Dance.jpg
//!
//! Config
//!     config.toml
//! ```
//!
//! ## Replay
//!
//! ```text
//! [     0ms] filter wedding
//!     Gallery: wedding (2 of 3 visible)
//!     Slide: 1 of 3
//! [   250ms] open item 1
//!     Lightbox: 2 gallery/010-Wedding/002-Vows.jpg
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::form::FieldError;
use crate::render::RenderSummary;
use crate::scan::Manifest;
use crate::session::{Snapshot, Transcript};
use crate::site::Event;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Positional index + title, with an optional photo count.
///
/// ```text
/// 001 Wedding (5 photos)
/// ```
fn entity_header(index: usize, title: &str, count: Option<usize>) -> String {
    match count {
        Some(1) => format!("{} {} (1 photo)", format_index(index), title),
        Some(n) => format!("{} {} ({} photos)", format_index(index), title, n),
        None => format!("{} {}", format_index(index), title),
    }
}

/// Titled entries show the title, untitled ones the filename in parens.
///
/// ```text
/// 001 First Dance       // titled
/// 001 (003.jpg)         // untitled, the filename IS the identity
/// ```
fn image_line(index: usize, title: Option<&str>, filename: &str) -> String {
    match title {
        Some(t) if !t.is_empty() => format!("{} {}", format_index(index), t),
        _ => format!("{} ({})", format_index(index), filename),
    }
}

fn file_name(location: &str) -> &str {
    location.rsplit('/').next().unwrap_or(location)
}

// ============================================================================
// Scan
// ============================================================================

/// Format the content inventory found by a scan.
///
/// `has_config_file` reports whether the content root carries a
/// `config.toml`; without one the stock defaults are in effect.
pub fn format_scan_output(manifest: &Manifest, has_config_file: bool) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Hero".to_string());
    if manifest.slides.is_empty() {
        lines.push(format!("{}(no slides)", indent(1)));
    }
    for (i, slide) in manifest.slides.iter().enumerate() {
        let name = file_name(&slide.location);
        lines.push(image_line(i + 1, slide.caption.as_deref(), name));
        if slide.caption.is_some() {
            lines.push(format!("{}Source: {}", indent(1), slide.location));
        }
    }

    lines.push(String::new());
    lines.push("Gallery".to_string());
    if manifest.categories.is_empty() {
        lines.push(format!("{}(no categories)", indent(1)));
    }
    for (i, category) in manifest.categories.iter().enumerate() {
        lines.push(entity_header(i + 1, &category.label, Some(category.count)));
        lines.push(format!("{}Filter: {}", indent(1), category.key));
        lines.push(format!("{}Source: {}/", indent(1), category.path));

        let images = manifest.images.iter().filter(|img| img.category == category.key);
        for (j, image) in images.enumerate() {
            let name = file_name(&image.location);
            let stem = name.rsplit_once('.').map_or(name, |(stem, _)| stem);
            let title = (image.label != stem).then_some(image.label.as_str());
            lines.push(format!("{}{}", indent(1), image_line(j + 1, title, name)));
            lines.push(format!("{}Source: {}", indent(2), name));
        }
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if has_config_file {
        lines.push(format!("{}config.toml", indent(1)));
    } else {
        lines.push(format!("{}(stock defaults)", indent(1)));
    }

    lines
}

pub fn print_scan_output(manifest: &Manifest, has_config_file: bool) {
    for line in format_scan_output(manifest, has_config_file) {
        println!("{}", line);
    }
}

// ============================================================================
// Render
// ============================================================================

pub fn format_render_output(summary: &RenderSummary) -> Vec<String> {
    vec![
        format!("Page → {}", summary.page.display()),
        format!(
            "Rendered {} slides, {} gallery images ({} files copied)",
            summary.slides, summary.images, summary.copied
        ),
    ]
}

pub fn print_render_output(summary: &RenderSummary) {
    for line in format_render_output(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Replay
// ============================================================================

/// Short human label for an event.
pub fn event_label(event: &Event) -> String {
    match event {
        Event::Filter { key } => format!("filter {key}"),
        Event::OpenItem { index } => format!("open item {index}"),
        Event::CloseLightbox => "close lightbox".to_string(),
        Event::BackdropClick => "backdrop click".to_string(),
        Event::LightboxNext => "lightbox next".to_string(),
        Event::LightboxPrev => "lightbox prev".to_string(),
        Event::Key { key } => format!("key {key}"),
        Event::TouchStart { x, y } => format!("touch start ({x}, {y})"),
        Event::TouchMove { x, y } => format!("touch move ({x}, {y})"),
        Event::ChangeSlide { step } => format!("slide {step:+}"),
        Event::JumpToSlide { index } => format!("slide dot {index}"),
        Event::Submit { fields } => format!("submit from {}", fields.email),
        Event::Scroll { y, .. } => format!("scroll to {y}"),
        Event::ToggleMenu => "toggle menu".to_string(),
        Event::JumpToSection { id } => format!("jump to #{id}"),
        Event::ScrollToTop => "scroll to top".to_string(),
    }
}

fn format_snapshot(state: &Snapshot, images: usize, slides: usize) -> Vec<String> {
    let pad = indent(1);
    let mut lines = vec![format!(
        "{pad}Gallery: {} ({} of {} visible)",
        state.filter, state.visible, images
    )];
    if let Some(slide) = state.slide {
        lines.push(format!("{pad}Slide: {} of {}", slide + 1, slides));
    }
    if let Some(lightbox) = &state.lightbox {
        let shown = lightbox.location.as_deref().unwrap_or("(nothing to show)");
        lines.push(format!("{pad}Lightbox: {} {}", lightbox.index + 1, shown));
    }
    if state.submitting {
        lines.push(format!("{pad}Form: sending"));
    }
    for error in &state.field_errors {
        lines.push(format!("{pad}{}", field_error_line(error)));
    }
    for banner in &state.banners {
        lines.push(format!("{pad}Banner: {}", banner.message));
    }
    let chrome = &state.chrome;
    let flags: Vec<&str> = [
        (chrome.navbar_scrolled, "navbar scrolled"),
        (chrome.back_to_top_visible, "back-to-top shown"),
        (chrome.menu_open, "menu open"),
    ]
    .into_iter()
    .filter_map(|(on, label)| on.then_some(label))
    .collect();
    if !flags.is_empty() {
        lines.push(format!("{pad}Chrome: {}", flags.join(", ")));
    }
    lines
}

pub fn format_transcript(transcript: &Transcript) -> Vec<String> {
    let mut lines = Vec::new();
    for record in &transcript.records {
        lines.push(format!("[{:>6}ms] {}", record.at_ms, event_label(&record.event)));
        lines.extend(format_snapshot(&record.state, transcript.images, transcript.slides));
    }
    lines.push(format!("[{:>6}ms] end", transcript.end_ms));
    lines.extend(format_snapshot(&transcript.end, transcript.images, transcript.slides));
    lines
}

pub fn print_transcript(transcript: &Transcript) {
    for line in format_transcript(transcript) {
        println!("{}", line);
    }
}

// ============================================================================
// Form check
// ============================================================================

fn field_error_line(error: &FieldError) -> String {
    format!("{}: {}", error.field.id(), error.message)
}

pub fn format_form_check(errors: &[FieldError]) -> Vec<String> {
    if errors.is_empty() {
        return vec!["Form is valid".to_string()];
    }
    let mut lines = vec![match errors.len() {
        1 => "1 problem".to_string(),
        n => format!("{n} problems"),
    }];
    lines.extend(errors.iter().map(|e| format!("{}{}", indent(1), field_error_line(e))));
    lines
}

pub fn print_form_check(errors: &[FieldError]) {
    for line in format_form_check(errors) {
        println!("{}", line);
    }
}
