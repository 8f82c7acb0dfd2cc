//! Fixed-size pagination.
//!
//! Out-of-range page numbers are clamped into `1..=display_page_count`, so
//! page 0 shows the first page and a page past the end shows the last one.

use serde::Serialize;
use std::num::NonZeroUsize;

pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(size) => size,
    None => unreachable!(),
};

/// One page window over a match list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// Effective 1-based page number after clamping.
    pub page_number: usize,
    /// `ceil(total_items / page_size)`; zero for an empty list.
    pub page_count: usize,
    pub total_items: usize,
    pub is_first_page: bool,
    pub is_last_page: bool,
}

impl<T> Page<'_, T> {
    /// Page count as shown to users: at least 1.
    pub fn display_page_count(&self) -> usize {
        self.page_count.max(1)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn pager(&self) -> PagerState {
        PagerState {
            current: self.page_number,
            total: self.display_page_count(),
            prev_enabled: !self.is_first_page,
            next_enabled: !self.is_last_page,
        }
    }
}

/// Pager widget state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PagerState {
    pub current: usize,
    pub total: usize,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

impl PagerState {
    /// `"Page X of Y"`.
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.current, self.total)
    }
}

/// Number of pages needed for `total_items`.
pub fn page_count(total_items: usize, page_size: NonZeroUsize) -> usize {
    total_items.div_ceil(page_size.get())
}

/// Clamps a requested page into the valid range for `total_items`.
pub fn clamp_page(requested: usize, total_items: usize, page_size: NonZeroUsize) -> usize {
    requested.clamp(1, page_count(total_items, page_size).max(1))
}

/// Returns the window `[(n-1)*size, n*size)` of `matches`, clipped to its length.
pub fn paginate<T>(matches: &[T], page_number: usize, page_size: NonZeroUsize) -> Page<'_, T> {
    let total_items = matches.len();
    let page_count = page_count(total_items, page_size);
    let page_number = clamp_page(page_number, total_items, page_size);

    let start = ((page_number - 1) * page_size.get()).min(total_items);
    let end = (start + page_size.get()).min(total_items);

    Page {
        items: &matches[start..end],
        page_number,
        page_count,
        total_items,
        is_first_page: page_number == 1,
        is_last_page: page_number >= page_count.max(1),
    }
}

#[cfg(test)]
mod tests {
    use super::{clamp_page, page_count, DEFAULT_PAGE_SIZE};

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0, DEFAULT_PAGE_SIZE), 0);
        assert_eq!(page_count(10, DEFAULT_PAGE_SIZE), 1);
        assert_eq!(page_count(11, DEFAULT_PAGE_SIZE), 2);
    }

    #[test]
    fn clamp_page_keeps_empty_lists_on_page_one() {
        assert_eq!(clamp_page(0, 0, DEFAULT_PAGE_SIZE), 1);
        assert_eq!(clamp_page(5, 0, DEFAULT_PAGE_SIZE), 1);
        assert_eq!(clamp_page(5, 25, DEFAULT_PAGE_SIZE), 3);
    }
}
