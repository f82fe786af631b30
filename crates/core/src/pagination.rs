use thiserror::Error;

/// Questions shown per page across the whole app.
pub const QUESTIONS_PER_PAGE: usize = 5;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PagerError {
    #[error("cannot page an empty list")]
    Empty,

    #[error("page size must be at least 1")]
    ZeroPageSize,
}

/// Half-open index range `[start, end)` of the items visible on one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    pub start: usize,
    pub end: usize,
}

impl PageBounds {
    #[must_use]
    pub fn len(self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    pub fn indices(self) -> impl Iterator<Item = usize> {
        self.start..self.end
    }
}

/// Fixed-size pagination over a list of questions.
///
/// Pages are derived views: rendering recomputes the slice for the current
/// index, and the union of all pages covers `[0, total)` with no overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    total: usize,
    page_size: usize,
    current: usize,
}

impl Pager {
    /// # Errors
    ///
    /// Returns `PagerError::Empty` for zero items and
    /// `PagerError::ZeroPageSize` for a zero page size.
    pub fn new(total: usize, page_size: usize) -> Result<Self, PagerError> {
        if page_size == 0 {
            return Err(PagerError::ZeroPageSize);
        }
        if total == 0 {
            return Err(PagerError::Empty);
        }
        Ok(Self {
            total,
            page_size,
            current: 0,
        })
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.page_size)
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current + 1 == self.page_count()
    }

    #[must_use]
    pub fn bounds(&self) -> PageBounds {
        let start = self.current * self.page_size;
        let end = (start + self.page_size).min(self.total);
        PageBounds { start, end }
    }

    /// Fraction of the list reached by the end of the current page, in
    /// percent. Drives the progress bar.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let percent = self.bounds().end as f64 / self.total as f64 * 100.0;
        percent
    }

    /// Move forward one page. Returns whether the index changed.
    pub fn advance(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Move back one page. Returns whether the index changed.
    pub fn retreat(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.current -= 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_is_ceil_of_total_over_size() {
        for (total, expected) in [(1, 1), (5, 1), (6, 2), (10, 2), (12, 3), (20, 4)] {
            let pager = Pager::new(total, QUESTIONS_PER_PAGE).unwrap();
            assert_eq!(pager.page_count(), expected, "total={total}");
        }
    }

    #[test]
    fn pages_cover_the_whole_range_without_overlap() {
        for total in 1..=23 {
            let mut pager = Pager::new(total, QUESTIONS_PER_PAGE).unwrap();
            let mut seen = vec![false; total];
            loop {
                for index in pager.bounds().indices() {
                    assert!(!seen[index], "index {index} appeared twice (total={total})");
                    seen[index] = true;
                }
                if !pager.advance() {
                    break;
                }
            }
            assert!(seen.into_iter().all(|covered| covered), "total={total}");
        }
    }

    #[test]
    fn twelve_questions_split_five_five_two() {
        let mut pager = Pager::new(12, QUESTIONS_PER_PAGE).unwrap();
        assert_eq!(pager.bounds(), PageBounds { start: 0, end: 5 });
        assert!(pager.advance());
        assert_eq!(pager.bounds(), PageBounds { start: 5, end: 10 });
        assert!(pager.advance());
        assert_eq!(pager.bounds(), PageBounds { start: 10, end: 12 });
        assert!(pager.is_last());
        assert!(!pager.advance());
    }

    #[test]
    fn moves_clamp_at_both_ends() {
        let mut pager = Pager::new(7, QUESTIONS_PER_PAGE).unwrap();
        assert!(!pager.retreat());
        assert!(pager.advance());
        assert!(!pager.advance());
        assert_eq!(pager.current(), 1);
        assert!(pager.retreat());
        assert_eq!(pager.current(), 0);
    }

    #[test]
    fn progress_tracks_the_end_of_the_current_page() {
        let mut pager = Pager::new(20, QUESTIONS_PER_PAGE).unwrap();
        assert!((pager.progress_percent() - 25.0).abs() < f64::EPSILON);
        pager.advance();
        assert!((pager.progress_percent() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_degenerate_inputs() {
        assert_eq!(Pager::new(0, 5).unwrap_err(), PagerError::Empty);
        assert_eq!(Pager::new(5, 0).unwrap_err(), PagerError::ZeroPageSize);
    }
}
