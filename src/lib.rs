//! # Lightdeck
//!
//! The interaction engine behind a single-page photography portfolio: a
//! hero slider that auto-advances, a category-filtered gallery, a lightbox
//! that walks the filtered subset, a validated contact form with a simulated
//! submission, and scroll-driven page chrome.
//!
//! The engine is headless. It reads the page through the [`surface::Surface`]
//! trait and projects its state back onto it, so the same state machine can
//! drive real markup, an in-memory surface in tests, or a scripted replay.
//!
//! # Pipeline
//!
//! ```text
//! 1. Scan    content/  →  manifest.json   (filesystem → slides, categories, images)
//! 2. Render  manifest  →  dist/index.html (maud markup + copied images)
//! 3. Replay  page + session.toml → transcript (scraper capture → Site on a virtual clock)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`site`] | The controller: owns all state, dispatches events, runs timers |
//! | [`catalog`] | Immutable image list captured once from the surface |
//! | [`filter`] | Category filter producing the authoritative visible subset |
//! | [`slider`] | Hero slider index with wraparound |
//! | [`lightbox`] | Open/closed state addressed into the filtered subset |
//! | [`input`] | Key and touch normalization into navigation actions |
//! | [`form`] | Contact field validation, submitter trait, banners |
//! | [`chrome`] | Navbar/back-to-top thresholds, reveal, lazy load, menu |
//! | [`scheduler`] | Deterministic virtual-clock task queue |
//! | [`surface`] | Rendering-surface trait and the in-memory surface |
//! | [`scan`] | Content directory → [`scan::Manifest`] |
//! | [`render`] | Manifest → page HTML using Maud |
//! | [`session`] | TOML session scripts and their replay |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`naming`] | `NNN-name` convention parser for slides, categories and images |
//! | [`types`] | Descriptors shared by scan, render and the engine |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## The Filtered View Is Authoritative
//!
//! Gallery visibility and lightbox navigation both derive from one
//! [`filter::FilteredView`]. The surface never decides what is visible; it
//! is told. A click on the n-th visible entry is resolved by image location,
//! so a display order that drifted from the view still opens the image the
//! visitor clicked.
//!
//! ## One Thread, One Clock
//!
//! Every timer (slider autoplay, submission latency, banner dismissal) is a
//! task on a single [`scheduler::Scheduler`] with a virtual clock. Events and
//! tasks run to completion one at a time. Replays are therefore exact: the
//! same session always yields the same transcript.
//!
//! ## Capture From Markup
//!
//! The catalog is captured from rendered HTML with `scraper`, not taken from
//! the manifest, so a replay exercises the same markup contract a browser
//! would see.

pub mod catalog;
pub mod chrome;
pub mod config;
pub mod filter;
pub mod form;
pub mod input;
pub mod lightbox;
pub mod naming;
pub mod output;
pub mod render;
pub mod scan;
pub mod scheduler;
pub mod session;
pub mod site;
pub mod slider;
pub mod surface;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
