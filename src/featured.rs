//! Featured plants carousel window
//!
//! The home page shows `per_slide` consecutive plants starting at `index`.
//! Navigation wraps at both ends. How many plants fit per slide depends on
//! the viewport and is decided by the caller.

use std::time::Duration;

/// Plants per slide on wide screens.
pub const DEFAULT_PER_SLIDE: usize = 3;

/// Auto-advance period for clients that rotate the carousel.
pub const AUTO_ADVANCE: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    index: usize,
    per_slide: usize,
    len: usize,
}

impl Carousel {
    pub fn new(len: usize, per_slide: usize) -> Self {
        Self {
            index: 0,
            per_slide: per_slide.max(1),
            len,
        }
    }

    /// Start at `index`, clamped to the last valid position.
    pub fn at(len: usize, per_slide: usize, index: usize) -> Self {
        let mut carousel = Self::new(len, per_slide);
        carousel.index = index.min(carousel.max_index());
        carousel
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn max_index(&self) -> usize {
        self.len.saturating_sub(self.per_slide)
    }

    /// Arrows and dots only make sense when not everything fits.
    pub fn is_navigable(&self) -> bool {
        self.len > self.per_slide
    }

    pub fn next(&mut self) {
        self.index = if self.index >= self.max_index() { 0 } else { self.index + 1 };
    }

    pub fn prev(&mut self) {
        self.index = if self.index == 0 { self.max_index() } else { self.index - 1 };
    }

    pub fn next_index(&self) -> usize {
        let mut c = *self;
        c.next();
        c.index
    }

    pub fn prev_index(&self) -> usize {
        let mut c = *self;
        c.prev();
        c.index
    }

    /// Dot positions `0..=max_index`.
    pub fn positions(&self) -> std::ops::RangeInclusive<usize> {
        0..=self.max_index()
    }

    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.index.min(items.len());
        let end = (start + self.per_slide).min(items.len());
        &items[start..end]
    }
}
