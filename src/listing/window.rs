//! Client-side paging over an in-memory item list.
//!
//! The storefront shows a growing prefix of the matching items, extended one
//! page at a time as the user scrolls; the admin demo source slices one page
//! at a time. Both use these helpers.

use std::num::NonZeroUsize;

/// Returns the number of pages needed for `total_items`; never below 1.
#[must_use]
pub const fn total_pages(total_items: usize, page_size: NonZeroUsize) -> usize {
    let pages = total_items.div_ceil(page_size.get());
    if pages == 0 { 1 } else { pages }
}

/// Returns the items on 1-based `page`, or an empty slice past the end.
#[must_use]
pub fn page_slice<T>(items: &[T], page_size: NonZeroUsize, page: usize) -> &[T] {
    let size = page_size.get();
    let start = page.saturating_sub(1).saturating_mul(size);
    let end = start.saturating_add(size).min(items.len());
    items.get(start..end).unwrap_or_default()
}

/// Returns every item up to the end of `current_page`.
#[must_use]
pub fn scroll_window<T>(items: &[T], page_size: NonZeroUsize, current_page: usize) -> &[T] {
    let end = current_page.saturating_mul(page_size.get()).min(items.len());
    items.get(..end).unwrap_or_default()
}

/// Infinite-scroll position over a list of known length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollState {
    page_size: NonZeroUsize,
    current_page: usize,
    total_items: usize,
}

impl ScrollState {
    /// Starts scrolling a list of `total_items` from its first page.
    #[must_use]
    pub const fn new(page_size: NonZeroUsize, total_items: usize) -> Self {
        Self {
            page_size,
            current_page: 1,
            total_items,
        }
    }

    /// Resumes at `current_page`, clamped into the available pages.
    #[must_use]
    pub fn restore(page_size: NonZeroUsize, total_items: usize, current_page: usize) -> Self {
        let last = total_pages(total_items, page_size);
        Self {
            page_size,
            current_page: current_page.clamp(1, last),
            total_items,
        }
    }

    /// Returns the last page currently revealed.
    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    /// Returns the number of pages in the list.
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        total_pages(self.total_items, self.page_size)
    }

    /// Returns true once the final page has been revealed.
    #[must_use]
    pub const fn is_last_page(&self) -> bool {
        self.current_page >= self.total_pages()
    }

    /// Returns true while more pages remain to reveal.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        !self.is_last_page()
    }

    /// Reveals the next page; returns false when already at the end.
    pub const fn advance(&mut self) -> bool {
        if self.is_last_page() {
            return false;
        }
        self.current_page = self.current_page.saturating_add(1);
        true
    }

    /// Returns the items revealed so far.
    #[must_use]
    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        scroll_window(items, self.page_size, self.current_page)
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn items() -> Vec<u32> {
        (1..=25).collect()
    }

    fn size(value: usize) -> NonZeroUsize {
        NonZeroUsize::new(value).expect("test page size should be non-zero")
    }

    #[rstest]
    #[case(0, 10, 1)]
    #[case(10, 10, 1)]
    #[case(11, 10, 2)]
    #[case(25, 10, 3)]
    #[case(40, 8, 5)]
    fn total_pages_rounds_up(#[case] total: usize, #[case] page: usize, #[case] expected: usize) {
        assert_eq!(total_pages(total, size(page)), expected);
    }

    #[rstest]
    fn page_slice_returns_partial_last_page(items: Vec<u32>) {
        assert_eq!(page_slice(&items, size(10), 1), (1..=10).collect::<Vec<_>>());
        assert_eq!(page_slice(&items, size(10), 3), &[21, 22, 23, 24, 25]);
        assert!(page_slice(&items, size(10), 4).is_empty());
    }

    #[rstest]
    fn scrolling_reveals_a_growing_prefix(items: Vec<u32>) {
        let mut scroll = ScrollState::new(size(10), items.len());
        assert_eq!(scroll.visible(&items).len(), 10);

        assert!(scroll.advance());
        assert_eq!(scroll.visible(&items).len(), 20);

        assert!(scroll.advance());
        assert_eq!(scroll.visible(&items).len(), 25);
        assert!(scroll.is_last_page());
        assert!(!scroll.advance());
        assert_eq!(scroll.current_page(), 3);
    }

    #[rstest]
    fn restore_clamps_to_last_page(items: Vec<u32>) {
        let scroll = ScrollState::restore(size(8), items.len(), 9);
        assert_eq!(scroll.current_page(), 4);
        assert_eq!(scroll.visible(&items).len(), 25);
        assert!(!scroll.has_next());
    }
}
