//! Pagination over filtered record lists.
//!
//! Page numbers are 1-based. Any requested page, including zero, negative
//! or past-the-end values, is clamped into `1..=total_pages`, and an empty
//! sequence still has one (empty) page.

use serde::Serialize;

/// Default number of records per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One page of a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Current page after clamping.
    pub page: usize,
    /// Total number of pages, at least 1.
    pub total_pages: usize,
    /// Length of the whole sequence.
    pub total_items: usize,
    /// Page size used for slicing.
    pub page_size: usize,
}

impl<T> Page<T> {
    /// Whether a later page exists.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Whether an earlier page exists.
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Next page number, staying on the last page.
    pub fn next_page(&self) -> usize {
        (self.page + 1).min(self.total_pages)
    }

    /// Previous page number, staying on the first page.
    pub fn previous_page(&self) -> usize {
        self.page.saturating_sub(1).max(1)
    }

    /// 1-based position of the first item, or 0 when empty.
    pub fn start(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1) * self.page_size + 1
        }
    }

    /// 1-based position of the last item, or 0 when empty.
    pub fn end(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.start() + self.items.len() - 1
        }
    }

    /// "Showing 11 to 20 of 42 records".
    pub fn showing(&self) -> String {
        format!(
            "Showing {} to {} of {} records",
            self.start(),
            self.end(),
            self.total_items
        )
    }

    /// Apply `f` to every item, keeping the page metadata.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            total_pages: self.total_pages,
            total_items: self.total_items,
            page_size: self.page_size,
        }
    }
}

/// Number of pages for `total_items`, never less than 1.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1)).max(1)
}

/// Clamp a requested page into `1..=total_pages`.
pub fn clamp_page(page: i64, total_pages: usize) -> usize {
    let last = i64::try_from(total_pages).unwrap_or(i64::MAX).max(1);
    // In range 1..=last, which always fits back into usize.
    usize::try_from(page.clamp(1, last)).unwrap_or(1)
}

/// Slice one page out of `sequence`.
///
/// A page size of 0 is treated as 1.
pub fn paginate<T: Clone>(sequence: &[T], page: i64, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let page = clamp_page(page, total_pages(sequence.len(), page_size));
    slice_page(sequence, page, page_size)
}

/// Slice at an already 1-based `page`, pulling it into range first.
fn slice_page<T: Clone>(sequence: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = sequence.len();
    let total_pages = total_pages(total_items, page_size);
    let page = page.clamp(1, total_pages);

    let start = (page - 1) * page_size;
    let end = (start + page_size).min(total_items);
    let items = sequence.get(start..end).map(<[T]>::to_vec).unwrap_or_default();

    Page {
        items,
        page,
        total_pages,
        total_items,
        page_size,
    }
}

/// Parse a page number typed into a page field.
///
/// Reads an optional sign and leading digits after trimming whitespace,
/// ignoring anything that follows (`"3abc"` is 3). Input without leading
/// digits, or a result of 0, gives 1. Negative values are returned as-is
/// and clamped later.
pub fn parse_page(input: &str) -> i64 {
    let trimmed = input.trim();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    let value = match digits.parse::<i64>() {
        Ok(value) => value,
        // Overflowing input is still a number; saturate.
        Err(_) if !digits.is_empty() => i64::MAX,
        Err(_) => return 1,
    };

    match (negative, value) {
        (_, 0) => 1,
        (true, value) => -value,
        (false, value) => value,
    }
}

/// Current page of a browsing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageState {
    /// Requested page, 1-based.
    pub current: usize,
    /// Records per page.
    pub page_size: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PageState {
    /// First page with the given size (0 is treated as 1).
    pub fn new(page_size: usize) -> Self {
        Self {
            current: 1,
            page_size: page_size.max(1),
        }
    }

    /// Move to `page`, clamped against `total_items`.
    pub fn go_to(&mut self, page: i64, total_items: usize) -> usize {
        self.current = clamp_page(page, total_pages(total_items, self.page_size));
        self.current
    }

    /// Back to the first page.
    pub fn reset(&mut self) {
        self.current = 1;
    }

    /// Slice `sequence` at the current page, clamped against its length.
    pub fn slice<T: Clone>(&self, sequence: &[T]) -> Page<T> {
        slice_page(sequence, self.current, self.page_size)
    }
}
