//! Scripted visitor sessions.
//!
//! A session is a TOML file listing timed [`Event`]s. Replaying it captures
//! the catalog from rendered page markup, starts a [`Site`] on an in-memory
//! surface and feeds it the events, advancing the virtual clock to each
//! step's time first. The result is a [`Transcript`] of what the visitor
//! would see after every step.
//!
//! ```toml
//! submitter = "accept"        # accept | decline | reject
//! end_ms = 12000              # keep the clock running after the last step
//!
//! [[targets]]                 # scroll-dependent elements (optional)
//! id = "gallery"
//! top = 900.0
//!
//! [[steps]]
//! at_ms = 0
//! type = "filter"
//! key = "wedding"
//!
//! [[steps]]
//! at_ms = 250
//! type = "open_item"
//! index = 1
//! ```
//!
//! Steps must be listed in time order. Several steps may share a time; they
//! run in file order.

use crate::chrome::{ChromeState, ScrollTarget};
use crate::config::SiteConfig;
use crate::form::{Banner, FieldError, SimulatedSubmitter, SubmitBehavior};
use crate::site::{Event, Site};
use crate::surface::{CaptureError, MemorySurface};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Session parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Page capture error: {0}")]
    Capture(#[from] CaptureError),
    #[error("Step {index} at {at_ms}ms comes before the previous step at {previous_ms}ms")]
    OutOfOrder {
        index: usize,
        at_ms: u64,
        previous_ms: u64,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Session {
    /// How the simulated contact endpoint answers
    pub submitter: SubmitBehavior,
    pub targets: Vec<ScrollTarget>,
    pub steps: Vec<Step>,
    /// Clock time to advance to after the last step
    pub end_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Step {
    pub at_ms: u64,
    #[serde(flatten)]
    pub event: Event,
}

/// What the visitor sees at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub filter: String,
    pub visible: usize,
    pub slide: Option<usize>,
    pub lightbox: Option<LightboxSnapshot>,
    pub submitting: bool,
    pub field_errors: Vec<FieldError>,
    pub banners: Vec<Banner>,
    pub chrome: ChromeState,
    pub scroll_y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LightboxSnapshot {
    pub index: usize,
    /// `None` when the filtered view is empty
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub at_ms: u64,
    pub event: Event,
    pub state: Snapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transcript {
    pub images: usize,
    pub slides: usize,
    pub records: Vec<Record>,
    /// State at `end_ms` (or after the last step)
    pub end_ms: u64,
    pub end: Snapshot,
}

pub fn parse_session(text: &str) -> Result<Session, SessionError> {
    let session: Session = toml::from_str(text)?;
    check_order(&session.steps)?;
    Ok(session)
}

pub fn load_session(path: &Path) -> Result<Session, SessionError> {
    let text = fs::read_to_string(path)?;
    parse_session(&text)
}

fn check_order(steps: &[Step]) -> Result<(), SessionError> {
    for (index, pair) in steps.windows(2).enumerate() {
        if pair[1].at_ms < pair[0].at_ms {
            return Err(SessionError::OutOfOrder {
                index: index + 1,
                at_ms: pair[1].at_ms,
                previous_ms: pair[0].at_ms,
            });
        }
    }
    Ok(())
}

/// Replay `session` against the page in `html`.
pub fn replay(session: &Session, html: &str, config: SiteConfig) -> Result<Transcript, SessionError> {
    check_order(&session.steps)?;
    let surface = MemorySurface::from_html(html)?.with_scroll_targets(session.targets.clone());
    let submitter = SimulatedSubmitter::new(session.submitter);
    let mut site = Site::start(config, surface, submitter);
    log::debug!(
        "replaying {} steps over {} images",
        session.steps.len(),
        site.catalog().len()
    );

    let mut records = Vec::with_capacity(session.steps.len());
    for step in &session.steps {
        site.advance_to(step.at_ms);
        site.dispatch(step.event.clone());
        records.push(Record {
            at_ms: step.at_ms,
            event: step.event.clone(),
            state: snapshot(&site),
        });
    }

    let last = session.steps.last().map_or(0, |s| s.at_ms);
    let end_ms = session.end_ms.unwrap_or(last).max(last);
    site.advance_to(end_ms);
    let end = snapshot(&site);
    let transcript = Transcript {
        images: site.catalog().len(),
        slides: site.slider().count(),
        records,
        end_ms,
        end,
    };
    site.shutdown();
    Ok(transcript)
}

fn snapshot(site: &Site<MemorySurface, SimulatedSubmitter>) -> Snapshot {
    let surface = site.surface();
    Snapshot {
        filter: site.view().filter().key().to_string(),
        visible: surface.visible_count(),
        slide: surface.active_slide(),
        lightbox: site.lightbox().active().map(|index| LightboxSnapshot {
            index,
            location: site.lightbox_image().map(|img| img.location.clone()),
        }),
        submitting: site.is_submitting(),
        field_errors: surface.field_errors().to_vec(),
        banners: surface.banners().to_vec(),
        chrome: surface.chrome(),
        scroll_y: surface.scroll_y(),
    }
}
