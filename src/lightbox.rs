//! Lightbox state: closed, or open on one member of the filtered view.
//!
//! The open index always addresses the current [`FilteredView`]. Navigation
//! wraps around the view and is inert when the view is empty.

use crate::catalog::Catalog;
use crate::filter::FilteredView;
use crate::slider::{Direction, step_index};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lightbox {
    #[default]
    Closed,
    Open {
        /// Position within the filtered view
        index: usize,
    },
}

impl Lightbox {
    pub fn is_open(&self) -> bool {
        matches!(self, Lightbox::Open { .. })
    }

    /// Open position, if open.
    pub fn active(&self) -> Option<usize> {
        match self {
            Lightbox::Open { index } => Some(*index),
            Lightbox::Closed => None,
        }
    }

    /// Returns whether the lightbox was open.
    pub fn close(&mut self) -> bool {
        let was_open = self.is_open();
        *self = Lightbox::Closed;
        was_open
    }

    /// Step to the neighbouring image of a view of `len` images.
    ///
    /// Returns the new position, or `None` (state untouched) when closed or
    /// the view is empty.
    pub fn step(&mut self, direction: Direction, len: usize) -> Option<usize> {
        match self {
            Lightbox::Open { index } if len > 0 => {
                // a stale index from a larger view is folded back into range first
                *index = step_index(*index % len, direction, len);
                Some(*index)
            }
            _ => None,
        }
    }

    /// Keep the lightbox pointed at the same image after the view changed.
    ///
    /// `shown` is the location displayed before the change. If it is still a
    /// member the index follows it; otherwise the index resets to the start.
    pub fn follow(&mut self, shown: Option<&str>, view: &FilteredView, catalog: &Catalog) {
        if let Lightbox::Open { index } = self {
            *index = shown
                .and_then(|location| view.position_of(catalog, location))
                .unwrap_or(0);
        }
    }
}

/// Resolve a click on the `selection`-th visible gallery entry to a position
/// in the filtered view.
///
/// `visible` lists the locations of the entries the surface currently shows,
/// in display order. The match is by location, so a display order that has
/// drifted from the view still opens the clicked image.
pub fn resolve_selection(
    visible: &[String],
    selection: usize,
    view: &FilteredView,
    catalog: &Catalog,
) -> Option<usize> {
    let location = visible.get(selection)?;
    view.position_of(catalog, location)
}
