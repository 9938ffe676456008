//! Page-number pagination over an already-fetched listing.
//!
//! Out-of-range page numbers are clamped rather than rejected, so a stale
//! `?page=9` link still lands on the last page.

use std::ops::Range;

/// Rows per page on the user listing.
pub const USERS_PAGE_SIZE: usize = 5;

/// The resolved page and the slice of rows it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    /// 1-based page actually served after clamping.
    pub page: usize,
    /// Total number of pages; `0` when there are no rows.
    pub total_pages: usize,
    /// Index range into the full listing.
    pub range: Range<usize>,
}

/// Number of pages needed for `total` rows.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Resolve a requested page into a [`PageWindow`].
///
/// Missing or non-positive pages resolve to page 1; pages past the end
/// resolve to the last page.
pub fn paginate(requested: Option<i64>, total: usize, page_size: usize) -> PageWindow {
    let total_pages = total_pages(total, page_size);
    let last = total_pages.max(1);

    let page = match requested {
        Some(p) if p >= 1 => usize::try_from(p).unwrap_or(last).min(last),
        _ => 1,
    };

    let start = ((page - 1) * page_size).min(total);
    let end = (start + page_size).min(total);

    PageWindow {
        page,
        total_pages,
        range: start..end,
    }
}
