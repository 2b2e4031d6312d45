//! Pagination metadata for list responses.
//!
//! The backend computes the pagination block; the client never recomputes it.
//! `pages == ceil(total / limit)` is the backend's responsibility and is
//! taken at face value here.

use serde::{Deserialize, Serialize};

/// The pagination block attached to list responses.
///
/// # Example JSON
///
/// ```json
/// { "page": 2, "limit": 10, "total": 42, "pages": 5 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Current page number (1-indexed)
    pub page: i64,
    /// Items per page
    pub limit: i64,
    /// Total number of items across all pages
    pub total: i64,
    /// Total number of pages
    pub pages: i64,
}

impl PageInfo {
    /// Whether pages remain after this one.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.page < self.pages
    }

    /// The next page number, if any.
    #[must_use]
    pub fn next_page(&self) -> Option<i64> {
        self.has_more().then(|| self.page + 1)
    }
}

/// A page of items plus its pagination block.
#[derive(Debug, Clone)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: PageInfo,
}
