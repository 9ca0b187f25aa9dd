//! Responsive carousel geometry and paging.

use std::ops::Range;

/// Gap between adjacent slides, in logical pixels.
pub const SPACE_BETWEEN: f32 = 20.0;

/// Slides visible below the smallest breakpoint.
pub const DEFAULT_PER_VIEW: usize = 1;

/// `(min_width, slides_per_view)`, widest first.
const BREAKPOINTS: &[(f32, usize)] = &[(1024.0, 3), (768.0, 2), (640.0, 1)];

/// Number of slides shown side by side for a viewport width.
pub fn slides_per_view(width: f32) -> usize {
    BREAKPOINTS
        .iter()
        .find(|(min, _)| width >= *min)
        .map(|(_, n)| *n)
        .unwrap_or(DEFAULT_PER_VIEW)
}

/// Width of one slide when `per_view` slides share `available` pixels.
pub fn slide_width(available: f32, per_view: usize) -> f32 {
    let n = per_view.max(1) as f32;
    ((available - SPACE_BETWEEN * (n - 1.0)) / n).max(0.0)
}

/// Which slides are on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    first: usize,
    per_view: usize,
    len: usize,
}

impl Pager {
    pub fn new(len: usize, per_view: usize) -> Self {
        Self {
            first: 0,
            per_view: per_view.max(1),
            len,
        }
    }

    pub fn first(&self) -> usize {
        self.first
    }

    pub fn per_view(&self) -> usize {
        self.per_view
    }

    /// Highest valid first index: the last page is always full.
    fn max_first(&self) -> usize {
        self.len.saturating_sub(self.per_view)
    }

    pub fn can_prev(&self) -> bool {
        self.first > 0
    }

    pub fn can_next(&self) -> bool {
        self.first < self.max_first()
    }

    pub fn prev(&mut self) {
        self.first = self.first.saturating_sub(1);
    }

    pub fn next(&mut self) {
        self.first = (self.first + 1).min(self.max_first());
    }

    /// Apply a new slides-per-view, keeping the position in range.
    pub fn set_per_view(&mut self, per_view: usize) {
        self.per_view = per_view.max(1);
        self.first = self.first.min(self.max_first());
    }

    pub fn visible(&self) -> Range<usize> {
        self.first..(self.first + self.per_view).min(self.len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoints() {
        assert_eq!(slides_per_view(320.0), 1);
        assert_eq!(slides_per_view(640.0), 1);
        assert_eq!(slides_per_view(767.9), 1);
        assert_eq!(slides_per_view(768.0), 2);
        assert_eq!(slides_per_view(1023.0), 2);
        assert_eq!(slides_per_view(1024.0), 3);
        assert_eq!(slides_per_view(2560.0), 3);
    }

    #[test]
    fn test_slide_width_accounts_for_gaps() {
        assert!((slide_width(1040.0, 3) - 1000.0 / 3.0).abs() < 1e-3);
        assert_eq!(slide_width(500.0, 1), 500.0);
        assert_eq!(slide_width(10.0, 3), 0.0);
    }

    #[test]
    fn test_paging_clamps_to_full_last_page() {
        let mut pager = Pager::new(5, 3);
        assert!(!pager.can_prev());
        assert!(pager.can_next());
        pager.next();
        pager.next();
        pager.next();
        assert_eq!(pager.first(), 2);
        assert_eq!(pager.visible(), 2..5);
        assert!(!pager.can_next());
        pager.prev();
        assert_eq!(pager.visible(), 1..4);
    }

    #[test]
    fn test_resize_reclamps() {
        let mut pager = Pager::new(30, 1);
        for _ in 0..29 {
            pager.next();
        }
        assert_eq!(pager.first(), 29);
        pager.set_per_view(3);
        assert_eq!(pager.first(), 27);
        assert_eq!(pager.visible(), 27..30);
    }

    #[test]
    fn test_short_list() {
        let mut pager = Pager::new(2, 3);
        assert_eq!(pager.visible(), 0..2);
        assert!(!pager.can_next());
        pager.next();
        assert_eq!(pager.first(), 0);

        let empty = Pager::new(0, 2);
        assert!(empty.visible().is_empty());
    }
}
