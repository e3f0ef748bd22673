//! Scroll-driven page chrome: compact navbar, back-to-top button, mobile menu,
//! one-shot reveal of page sections and lazy image loading.

use crate::config::ScrollConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ChromeState {
    pub navbar_scrolled: bool,
    pub back_to_top_visible: bool,
    pub menu_open: bool,
}

/// An element whose appearance depends on the scroll position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollTarget {
    pub id: String,
    /// Offset of the element's top edge from the document top, in px
    pub top: f64,
    /// Deferred image source; `None` for plain reveal targets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lazy_src: Option<String>,
}

/// Admits at most one event per `limit_ms`.
#[derive(Debug, Clone, Default)]
pub struct Throttle {
    limit_ms: u64,
    open_at: Option<u64>,
}

impl Throttle {
    pub fn new(limit_ms: u64) -> Self {
        Self {
            limit_ms,
            open_at: None,
        }
    }

    pub fn admit(&mut self, now: u64) -> bool {
        if self.open_at.is_some_and(|t| now < t) {
            return false;
        }
        self.open_at = Some(now.saturating_add(self.limit_ms));
        true
    }
}

/// What a handled scroll event changed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScrollUpdate {
    pub chrome: ChromeState,
    /// Reveal targets that came into view for the first time
    pub revealed: Vec<String>,
    /// Lazy images to load, as `(id, src)`
    pub loaded: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub struct ScrollTracker {
    config: ScrollConfig,
    targets: Vec<ScrollTarget>,
    done: Vec<bool>,
    throttle: Throttle,
    chrome: ChromeState,
    position: f64,
    viewport_height: f64,
}

impl ScrollTracker {
    pub fn new(config: ScrollConfig, targets: Vec<ScrollTarget>) -> Self {
        let done = vec![false; targets.len()];
        let throttle = Throttle::new(config.throttle_ms);
        Self {
            config,
            targets,
            done,
            throttle,
            chrome: ChromeState::default(),
            position: 0.0,
            viewport_height: 0.0,
        }
    }

    pub fn chrome(&self) -> ChromeState {
        self.chrome
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    /// Handle a scroll to `y` with a viewport `viewport_height` px tall.
    ///
    /// Returns `None` when the event was throttled away.
    pub fn on_scroll(&mut self, now: u64, y: f64, viewport_height: f64) -> Option<ScrollUpdate> {
        if !self.throttle.admit(now) {
            return None;
        }
        self.viewport_height = viewport_height;
        Some(self.apply(y))
    }

    /// Handle a programmatic scroll (section jump, back to top). Not
    /// throttled; uses the viewport height of the last visitor scroll.
    pub fn scroll_to(&mut self, y: f64) -> ScrollUpdate {
        self.apply(y)
    }

    fn apply(&mut self, y: f64) -> ScrollUpdate {
        let viewport_height = self.viewport_height;
        self.position = y;
        self.chrome.navbar_scrolled = y > self.config.navbar_threshold;
        self.chrome.back_to_top_visible = y > self.config.back_to_top_threshold;

        let mut update = ScrollUpdate::default();
        for (target, done) in self.targets.iter().zip(self.done.iter_mut()) {
            if *done {
                continue;
            }
            let viewport_top = target.top - y;
            match &target.lazy_src {
                Some(src) if viewport_top < viewport_height => {
                    update.loaded.push((target.id.clone(), src.clone()));
                    *done = true;
                }
                None if viewport_top < viewport_height - self.config.reveal_offset => {
                    update.revealed.push(target.id.clone());
                    *done = true;
                }
                _ => {}
            }
        }
        update.chrome = self.chrome;
        update
    }

    pub fn toggle_menu(&mut self) -> ChromeState {
        self.chrome.menu_open = !self.chrome.menu_open;
        self.chrome
    }

    /// Close the mobile menu; `true` if it was open.
    pub fn close_menu(&mut self) -> bool {
        let was_open = self.chrome.menu_open;
        self.chrome.menu_open = false;
        was_open
    }

    /// Document offset of a target, if known.
    pub fn target_top(&self, id: &str) -> Option<f64> {
        self.targets.iter().find(|t| t.id == id).map(|t| t.top)
    }
}
