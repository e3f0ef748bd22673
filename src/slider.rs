//! Hero slider state: a cyclic index over a fixed number of slides.

/// Navigation direction shared by the slider and the lightbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// `+1` / `-1`; anything else is not a direction.
    pub fn from_step(step: i64) -> Option<Self> {
        match step {
            1 => Some(Direction::Forward),
            -1 => Some(Direction::Backward),
            _ => None,
        }
    }
}

/// Next index on a ring of `count` positions.
///
/// `count` must be non-zero; callers guard the empty case.
pub fn step_index(current: usize, direction: Direction, count: usize) -> usize {
    debug_assert!(count > 0);
    match direction {
        Direction::Forward => (current + 1) % count,
        Direction::Backward => (current + count - 1) % count,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slider {
    count: usize,
    active: usize,
}

impl Slider {
    /// A slider over `count` slides, starting at slide 0.
    pub fn new(count: usize) -> Self {
        Self { count, active: 0 }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn active(&self) -> usize {
        self.active
    }

    /// Move one slide in `direction`, wrapping. Returns the new active index,
    /// or `None` when there are no slides.
    pub fn advance(&mut self, direction: Direction) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        self.active = step_index(self.active, direction, self.count);
        Some(self.active)
    }

    /// Move `steps` slides forward at once, wrapping.
    pub fn advance_many(&mut self, steps: u64) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        let count = self.count as u64;
        self.active = ((self.active as u64 + steps % count) % count) as usize;
        Some(self.active)
    }

    /// Jump straight to `index`. Out-of-range targets leave the slider as is.
    pub fn jump_to(&mut self, index: usize) -> Option<usize> {
        if index >= self.count {
            return None;
        }
        self.active = index;
        Some(self.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_many_matches_repeated_advance() {
        let mut stepped = Slider::new(3);
        for _ in 0..7 {
            stepped.advance(Direction::Forward);
        }
        let mut jumped = Slider::new(3);
        assert_eq!(jumped.advance_many(7), Some(stepped.active()));
        assert_eq!(Slider::new(0).advance_many(7), None);
        assert_eq!(Slider::new(3).advance_many(u64::MAX), Some((u64::MAX % 3) as usize));
    }

    #[test]
    fn starts_at_zero() {
        assert_eq!(Slider::new(3).active(), 0);
    }

    #[test]
    fn forward_wraps_to_first() {
        let mut slider = Slider::new(3);
        assert_eq!(slider.advance(Direction::Forward), Some(1));
        assert_eq!(slider.advance(Direction::Forward), Some(2));
        assert_eq!(slider.advance(Direction::Forward), Some(0));
    }

    #[test]
    fn backward_wraps_to_last() {
        let mut slider = Slider::new(3);
        assert_eq!(slider.advance(Direction::Backward), Some(2));
    }

    #[test]
    fn single_slide_stays_put() {
        let mut slider = Slider::new(1);
        assert_eq!(slider.advance(Direction::Forward), Some(0));
        assert_eq!(slider.advance(Direction::Backward), Some(0));
    }

    #[test]
    fn no_slides_is_inert() {
        let mut slider = Slider::new(0);
        assert_eq!(slider.advance(Direction::Forward), None);
        assert_eq!(slider.jump_to(0), None);
        assert_eq!(slider.active(), 0);
    }

    #[test]
    fn jump_out_of_range_is_ignored() {
        let mut slider = Slider::new(3);
        slider.jump_to(2);
        assert_eq!(slider.jump_to(3), None);
        assert_eq!(slider.active(), 2);
    }

    #[test]
    fn index_stays_in_range_for_any_sequence() {
        for count in 1..=7 {
            let mut slider = Slider::new(count);
            // deterministic mixed walk
            for i in 0..200usize {
                let dir = if (i * 7 + count) % 3 == 0 {
                    Direction::Backward
                } else {
                    Direction::Forward
                };
                let next = slider.advance(dir).unwrap();
                assert!(next < count);
                assert_eq!(next, slider.active());
            }
        }
    }

    #[test]
    fn direction_from_step() {
        assert_eq!(Direction::from_step(1), Some(Direction::Forward));
        assert_eq!(Direction::from_step(-1), Some(Direction::Backward));
        assert_eq!(Direction::from_step(2), None);
    }
}
