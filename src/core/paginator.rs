//! # Paginator
//!
//! Windowing over the record store plus the page-validity rules that run
//! after every mutation.
//!
//! ```text
//! page 1        page 2        page 3
//! [0 .. 5)      [5 .. 10)     [10 .. 12)
//! ```
//!
//! Two policies are deliberate and observable:
//! - inserting jumps to the last page so the new record is on screen;
//! - deleting clamps the current page down when it no longer exists.

/// Number of pages needed for `count` records. Zero when the store is empty.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// The records on 1-indexed `page`, clipped to the slice bounds.
pub fn visible_slice<T>(records: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(page_size).min(records.len());
    let end = start.saturating_add(page_size).min(records.len());
    &records[start..end]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    current_page: usize,
    page_size: usize,
}

impl Paginator {
    /// A zero page size is bumped to 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self, count: usize) -> usize {
        total_pages(count, self.page_size)
    }

    pub fn visible<'a, T>(&self, records: &'a [T]) -> &'a [T] {
        visible_slice(records, self.current_page, self.page_size)
    }

    /// Jump to the last page after an insertion. `count` is post-insertion.
    pub fn on_insert(&mut self, count: usize) {
        self.current_page = self.total_pages(count).max(1);
    }

    /// Clamp after a deletion. `count` is post-deletion.
    pub fn on_delete(&mut self, count: usize) {
        let pages = self.total_pages(count);
        if pages > 0 && self.current_page > pages {
            self.current_page = pages;
        } else if count == 0 {
            self.current_page = 1;
        }
    }

    /// Move to `page` if it exists. Out-of-range requests are ignored.
    pub fn request_page(&mut self, page: usize, count: usize) -> bool {
        if page >= 1 && page <= self.total_pages(count) {
            self.current_page = page;
            true
        } else {
            false
        }
    }

    pub fn next_page(&mut self, count: usize) -> bool {
        self.request_page(self.current_page + 1, count)
    }

    pub fn previous_page(&mut self, count: usize) -> bool {
        match self.current_page.checked_sub(1) {
            Some(page) => self.request_page(page, count),
            None => false,
        }
    }
}
