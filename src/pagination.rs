use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const HEADER_TOTAL: &str = "x-total";
pub const HEADER_PAGE: &str = "x-page";
pub const HEADER_PER_PAGE: &str = "x-per-page";

pub const QUERY_PAGE_NUMBER: &str = "page[number]";
pub const QUERY_PAGE_SIZE: &str = "page[size]";

/// Outbound page request. Zero means "let the server decide".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// 1-indexed page number.
    pub cursor: u32,
    pub page_size: u32,
}

impl Pagination {
    pub fn new(cursor: u32, page_size: u32) -> Self {
        Self { cursor, page_size }
    }

    pub fn to_query(&self) -> BTreeMap<String, String> {
        let mut q = BTreeMap::new();
        if self.cursor != 0 {
            q.insert(QUERY_PAGE_NUMBER.to_string(), self.cursor.to_string());
        }
        if self.page_size != 0 {
            q.insert(QUERY_PAGE_SIZE.to_string(), self.page_size.to_string());
        }
        q
    }
}

/// Query parameters for an optional page request; `None` yields nothing.
pub fn pagination_query(p: Option<&Pagination>) -> BTreeMap<String, String> {
    p.map(Pagination::to_query).unwrap_or_default()
}

/// Pagination info decoded from the `X-Total`/`X-Page`/`X-Per-Page` headers.
///
/// Pages start at 1. Derived fields are computed once in [`PaginationResponse::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationResponse {
    #[serde(skip)]
    offset: u64,
    #[serde(rename = "pages")]
    num_pages: u64,
    #[serde(rename = "total")]
    num_items: u64,
    #[serde(rename = "items")]
    items_per_page: u64,
    #[serde(rename = "current")]
    current_page: u64,
    #[serde(rename = "next", skip_serializing_if = "Option::is_none")]
    next_page: Option<u64>,
    #[serde(rename = "prev", skip_serializing_if = "Option::is_none")]
    prev_page: Option<u64>,
    #[serde(skip)]
    has_prev: bool,
    #[serde(skip)]
    has_next: bool,
}

impl PaginationResponse {
    pub fn new(num_items: u64, items_per_page: u64, current_page: u64) -> Self {
        // A zero page size cannot be divided into pages.
        let num_pages = if items_per_page == 0 {
            0
        } else {
            num_items.div_ceil(items_per_page)
        };
        let offset = current_page.saturating_sub(1).saturating_mul(items_per_page);
        let has_prev = current_page > 1;
        let has_next = current_page < num_pages;
        Self {
            offset,
            num_pages,
            num_items,
            items_per_page,
            current_page,
            prev_page: has_prev.then(|| current_page - 1),
            next_page: has_next.then(|| current_page + 1),
            has_prev,
            has_next,
        }
    }

    /// Decode pagination headers. Returns `None` when any of the three headers
    /// is missing or not an unsigned integer; not every endpoint paginates.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let num_items = header_u64(headers, HEADER_TOTAL)?;
        let current_page = header_u64(headers, HEADER_PAGE)?;
        let items_per_page = header_u64(headers, HEADER_PER_PAGE)?;
        Some(Self::new(num_items, items_per_page, current_page))
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn num_pages(&self) -> u64 {
        self.num_pages
    }

    pub fn num_items(&self) -> u64 {
        self.num_items
    }

    pub fn items_per_page(&self) -> u64 {
        self.items_per_page
    }

    pub fn current_page(&self) -> u64 {
        self.current_page
    }

    pub fn prev_page(&self) -> Option<u64> {
        self.prev_page
    }

    pub fn next_page(&self) -> Option<u64> {
        self.next_page
    }

    pub fn has_prev(&self) -> bool {
        self.has_prev
    }

    pub fn has_next(&self) -> bool {
        self.has_next
    }

    /// Page request for the following page, keeping the same page size.
    pub fn next_request(&self) -> Option<Pagination> {
        let next = u32::try_from(self.next_page?).ok()?;
        let size = u32::try_from(self.items_per_page).ok()?;
        Some(Pagination::new(next, size))
    }
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
}
