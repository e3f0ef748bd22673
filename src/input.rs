//! Raw input normalization: key identifiers and touch points become engine
//! actions.

use crate::slider::Direction;

/// Lightbox actions reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Next,
    Prev,
    Close,
}

/// Map a DOM-style key identifier to a lightbox action.
pub fn key_action(key: &str) -> Option<Action> {
    match key {
        "Escape" => Some(Action::Close),
        "ArrowLeft" => Some(Action::Prev),
        "ArrowRight" => Some(Action::Next),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Classify a drag from `start` to `end`.
///
/// The horizontal component must dominate and exceed `threshold`. A finger
/// moving left (content pulled forward) means [`Direction::Forward`].
pub fn classify_swipe(start: Point, end: Point, threshold: f64) -> Option<Direction> {
    let dx = start.x - end.x;
    let dy = start.y - end.y;
    if dx.abs() <= dy.abs() {
        return None;
    }
    if dx > threshold {
        Some(Direction::Forward)
    } else if dx < -threshold {
        Some(Direction::Backward)
    } else {
        None
    }
}

/// Tracks one touch gesture at a time.
///
/// The first move after a start decides the gesture and consumes the start
/// point, so a long drag produces at most one swipe.
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    start: Option<Point>,
}

impl SwipeTracker {
    pub fn touch_start(&mut self, point: Point) {
        self.start = Some(point);
    }

    pub fn touch_move(&mut self, point: Point, threshold: f64) -> Option<Direction> {
        let start = self.start.take()?;
        classify_swipe(start, point, threshold)
    }

    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_map_to_actions() {
        assert_eq!(key_action("Escape"), Some(Action::Close));
        assert_eq!(key_action("ArrowLeft"), Some(Action::Prev));
        assert_eq!(key_action("ArrowRight"), Some(Action::Next));
        assert_eq!(key_action("Enter"), None);
        assert_eq!(key_action("escape"), None);
    }

    #[test]
    fn left_swipe_is_forward() {
        let dir = classify_swipe(Point::new(200.0, 100.0), Point::new(120.0, 110.0), 50.0);
        assert_eq!(dir, Some(Direction::Forward));
    }

    #[test]
    fn right_swipe_is_backward() {
        let dir = classify_swipe(Point::new(100.0, 100.0), Point::new(180.0, 90.0), 50.0);
        assert_eq!(dir, Some(Direction::Backward));
    }

    #[test]
    fn threshold_is_exclusive() {
        let dir = classify_swipe(Point::new(100.0, 0.0), Point::new(50.0, 0.0), 50.0);
        assert_eq!(dir, None);
        let dir = classify_swipe(Point::new(100.0, 0.0), Point::new(49.0, 0.0), 50.0);
        assert_eq!(dir, Some(Direction::Forward));
    }

    #[test]
    fn vertical_drag_is_ignored() {
        let dir = classify_swipe(Point::new(100.0, 100.0), Point::new(20.0, 300.0), 50.0);
        assert_eq!(dir, None);
    }

    #[test]
    fn diagonal_tie_is_ignored() {
        let dir = classify_swipe(Point::new(100.0, 100.0), Point::new(20.0, 20.0), 50.0);
        assert_eq!(dir, None);
    }

    #[test]
    fn tracker_consumes_start_on_first_move() {
        let mut tracker = SwipeTracker::default();
        tracker.touch_start(Point::new(300.0, 10.0));
        assert!(tracker.is_tracking());
        assert_eq!(
            tracker.touch_move(Point::new(100.0, 10.0), 50.0),
            Some(Direction::Forward)
        );
        assert!(!tracker.is_tracking());
        assert_eq!(tracker.touch_move(Point::new(0.0, 10.0), 50.0), None);
    }

    #[test]
    fn move_without_start_is_ignored() {
        let mut tracker = SwipeTracker::default();
        assert_eq!(tracker.touch_move(Point::new(0.0, 0.0), 50.0), None);
    }

    #[test]
    fn start_at_origin_still_tracks() {
        let mut tracker = SwipeTracker::default();
        tracker.touch_start(Point::new(0.0, 0.0));
        assert_eq!(
            tracker.touch_move(Point::new(80.0, 0.0), 50.0),
            Some(Direction::Backward)
        );
    }
}
