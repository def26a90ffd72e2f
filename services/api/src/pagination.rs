//! Shared pagination contract for list endpoints
//!
//! Every resource lists with a 1-indexed `page` and a bounded `limit`, and
//! reports the total row count plus the derived number of pages.

use serde::Serialize;

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 100;

/// Normalized page/limit pair taken from the query string
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageParams {
    pub page: u32,
    pub limit: u32,
}

impl PageParams {
    /// Normalize raw query values: page defaults to 1, limit defaults to 10
    /// and is clamped to 1..=100
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        let page = page.unwrap_or(1).max(1);
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        Self { page, limit }
    }

    /// Row offset for the current page
    pub fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.limit as i64
    }

    /// Page size as a bind-ready value
    pub fn limit_i64(&self) -> i64 {
        self.limit as i64
    }
}

/// Pagination block included in every list response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    pub total_pages: i64,
}

impl Pagination {
    /// Build the pagination block, computing `totalPages = ceil(total / limit)`
    pub fn new(params: PageParams, total: i64) -> Self {
        let limit = params.limit as i64;
        let total_pages = (total + limit - 1) / limit;
        Self {
            page: params.page,
            limit: params.limit,
            total,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PageParams::new(None, None);
        assert_eq!(params, PageParams { page: 1, limit: 10 });
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_page_and_limit_are_clamped() {
        let params = PageParams::new(Some(0), Some(0));
        assert_eq!(params, PageParams { page: 1, limit: 1 });

        let params = PageParams::new(Some(3), Some(500));
        assert_eq!(
            params,
            PageParams {
                page: 3,
                limit: 100
            }
        );
    }

    #[test]
    fn test_offset_is_one_indexed() {
        let params = PageParams::new(Some(2), Some(10));
        assert_eq!(params.offset(), 10);
    }

    #[test]
    fn test_total_pages_is_ceiling() {
        let params = PageParams::new(Some(1), Some(10));
        assert_eq!(Pagination::new(params, 0).total_pages, 0);
        assert_eq!(Pagination::new(params, 1).total_pages, 1);
        assert_eq!(Pagination::new(params, 10).total_pages, 1);
        assert_eq!(Pagination::new(params, 11).total_pages, 2);
        assert_eq!(Pagination::new(params, 95).total_pages, 10);
    }
}
