//! API Response types
//!
//! Standardized API response structures consumed by the dashboard.

use serde::{Deserialize, Serialize};

/// Unified API response structure
///
/// All API responses follow this format:
/// ```json
/// {
///     "success": true,
///     "message": "Success",
///     "data": { ... }
/// }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
    /// Response data (omitted on errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: "Success".to_string(),
            data: Some(data),
        }
    }

    /// Create a successful response with custom message
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

/// Pagination query parameters (`?page=1&limit=10`)
///
/// `page` is 1-based; out-of-range values are clamped by [`PageQuery::normalize`].
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    10
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl PageQuery {
    /// Clamp page/limit to sane values (page >= 1, 1 <= limit <= 100)
    pub fn normalize(&self) -> (u32, u32) {
        (self.page.max(1), self.limit.clamp(1, 100))
    }

    /// Offset of the first record of this page
    pub fn start(&self) -> u32 {
        let (page, limit) = self.normalize();
        (page - 1) * limit
    }
}

/// A page of results with pagination metadata
///
/// Serialized as `{ "items": [...], "total": N, "page": 1, "limit": 10, "totalPages": M }`.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Create a page; `total_pages` is derived from `total` and `limit`
    pub fn new(items: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            total.div_ceil(limit as u64) as u32
        };
        Self {
            items,
            total,
            page,
            limit,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_query_normalizes_out_of_range_values() {
        let q = PageQuery { page: 0, limit: 500 };
        assert_eq!(q.normalize(), (1, 100));
        assert_eq!(q.start(), 0);
    }

    #[test]
    fn page_derives_total_pages() {
        let page = Page::new(vec![1, 2, 3], 23, 1, 10);
        assert_eq!(page.total_pages, 3);

        let empty: Page<i32> = Page::new(vec![], 0, 1, 10);
        assert_eq!(empty.total_pages, 0);
    }
}
