//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Page-number pagination (`?page=`).
///
/// Kept as text so a non-numeric page falls back to the first page instead
/// of rejecting the request. The number is clamped to the available pages by
/// `userdir_core::pagination::paginate`.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
}

impl PageParams {
    /// The requested page, or `None` when missing or not an integer.
    pub fn page(&self) -> Option<i64> {
        self.page.as_deref().and_then(|p| p.trim().parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<&str>) -> PageParams {
        PageParams {
            page: page.map(str::to_string),
        }
    }

    #[test]
    fn numeric_page_is_parsed() {
        assert_eq!(params(Some("3")).page(), Some(3));
        assert_eq!(params(Some(" -1 ")).page(), Some(-1));
    }

    #[test]
    fn missing_or_garbage_page_is_none() {
        assert_eq!(params(None).page(), None);
        assert_eq!(params(Some("abc")).page(), None);
        assert_eq!(params(Some("")).page(), None);
        assert_eq!(params(Some("2.5")).page(), None);
    }
}
