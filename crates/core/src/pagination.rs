//! Page-based pagination shared by every list endpoint.
//!
//! Callers pass raw `page` / `limit` query values; anything missing or
//! non-numeric falls back to the defaults, and the results are clamped so a
//! store never sees a page below 1 or a limit outside `[1, MAX_LIMIT]`.

use std::collections::HashMap;

use serde::Serialize;

/// First page.
pub const DEFAULT_PAGE: i64 = 1;

/// Items per page when the caller does not ask for a specific limit.
pub const DEFAULT_LIMIT: i64 = 20;

/// Upper bound on items per page.
pub const MAX_LIMIT: i64 = 100;

/// A normalized page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Clamp explicit values. A zero limit counts as "not given".
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = page.filter(|p| *p != 0).unwrap_or(DEFAULT_PAGE).max(1);
        let limit = limit
            .filter(|l| *l != 0)
            .unwrap_or(DEFAULT_LIMIT)
            .clamp(1, MAX_LIMIT);
        Self { page, limit }
    }

    /// Parse raw query-string values.
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        Self::new(page.and_then(parse_int), limit.and_then(parse_int))
    }

    /// Read `page` and `limit` out of a raw query map.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        Self::from_raw(
            params.get("page").map(String::as_str),
            params.get("limit").map(String::as_str),
        )
    }

    /// Number of items to skip. Saturates for pages far past any data.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

fn parse_int(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// Pagination metadata returned alongside a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(request: PageRequest, total: i64) -> Self {
        let total_pages = if total <= 0 {
            0
        } else {
            (total + request.limit - 1) / request.limit
        };
        Self {
            page: request.page,
            limit: request.limit,
            total,
            total_pages,
            has_next: request.page < total_pages,
            has_prev: request.page > 1,
        }
    }
}

/// One page of results plus its metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, request: PageRequest, total: i64) -> Self {
        Self {
            data,
            pagination: PaginationMeta::new(request, total),
        }
    }

    /// Convert every item, keeping the metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}
