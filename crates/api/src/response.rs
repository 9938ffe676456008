//! Shared response envelope types for API handlers.
//!
//! Responses use a `{ "data": ... }` envelope. The user listing adds its
//! pagination fields alongside `data` via [`PageResponse`].

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// One page of a listing plus the numbers needed to render a pager.
#[derive(Debug, Serialize)]
pub struct PageResponse<T: Serialize> {
    pub data: Vec<T>,
    /// 1-based page actually served (after clamping).
    pub page: usize,
    pub page_size: usize,
    /// Rows across all pages.
    pub total: usize,
    pub total_pages: usize,
    /// Milliseconds spent producing the listing.
    pub duration_ms: i64,
}
