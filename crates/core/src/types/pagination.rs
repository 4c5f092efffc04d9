//! Page-based pagination as used by every list endpoint.
//!
//! List responses look like:
//!
//! ```json
//! { "data": [ ... ], "page": 1, "limit": 12, "total": 40, "totalPages": 4 }
//! ```

use serde::{Deserialize, Serialize};

/// Query parameters selecting one page of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PageQuery {
    /// 1-based page number.
    pub page: u32,
    /// Items per page.
    pub limit: u32,
}

impl PageQuery {
    /// Default page size used by the storefront grids.
    pub const DEFAULT_LIMIT: u32 = 12;
    /// Largest page size the client will ask for.
    pub const MAX_LIMIT: u32 = 100;

    /// Build a query, clamping `page` to at least 1 and `limit` to `1..=100`.
    #[must_use]
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, Self::MAX_LIMIT),
        }
    }

    /// The query for the following page.
    #[must_use]
    pub const fn next(self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            limit: self.limit,
        }
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self::new(1, Self::DEFAULT_LIMIT)
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page.
    #[serde(rename = "data")]
    pub items: Vec<T>,
    /// 1-based page number.
    pub page: u32,
    /// Requested page size.
    pub limit: u32,
    /// Total number of items across all pages.
    pub total: u64,
    /// Total number of pages.
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Whether a later page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Whether an earlier page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Whether this page holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Transform the items while keeping the paging metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            limit: self.limit,
            total: self.total,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_clamps() {
        let query = PageQuery::new(0, 1000);
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, PageQuery::MAX_LIMIT);

        let query = PageQuery::new(3, 0);
        assert_eq!(query.limit, 1);
    }

    #[test]
    fn test_page_deserialize() {
        let json = r#"{"data":["a","b"],"page":2,"limit":2,"total":5,"totalPages":3}"#;
        let page: Page<String> = serde_json::from_str(json).unwrap();
        assert_eq!(page.items, vec!["a", "b"]);
        assert!(page.has_next());
        assert!(page.has_previous());
    }

    #[test]
    fn test_last_page() {
        let page = Page::<u8> {
            items: vec![],
            page: 3,
            limit: 10,
            total: 25,
            total_pages: 3,
        };
        assert!(!page.has_next());
        assert!(page.is_empty());
    }

    #[test]
    fn test_page_map() {
        let page = Page {
            items: vec![1, 2],
            page: 1,
            limit: 2,
            total: 2,
            total_pages: 1,
        };
        let mapped = page.map(|n| n * 10);
        assert_eq!(mapped.items, vec![10, 20]);
        assert_eq!(mapped.total, 2);
    }
}
