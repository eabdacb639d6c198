//! Pagination utilities

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Number of products shown per listing page
pub const PAGE_SIZE: usize = 10;

/// A page number as requested in the query string
///
/// # Example
/// ```text
/// GET /?page=2
/// GET /?page=last
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNumber {
    /// A 1-based page number
    Number(usize),
    /// Whatever the last page turns out to be
    Last,
}

impl Default for PageNumber {
    fn default() -> Self {
        PageNumber::Number(1)
    }
}

/// Errors produced when a requested page cannot be served
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    #[error("page number '{0}' is not a positive integer")]
    Invalid(String),

    #[error("page {page} is past the last page ({total_pages})")]
    OutOfRange { page: usize, total_pages: usize },
}

impl FromStr for PageNumber {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "last" {
            return Ok(PageNumber::Last);
        }
        match s.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(PageNumber::Number(n)),
            _ => Err(PageError::Invalid(s.to_string())),
        }
    }
}

impl PageNumber {
    /// Parse an optional `page` query value; absent or blank means page 1
    pub fn parse(raw: Option<&str>) -> Result<Self, PageError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(PageNumber::default()),
            Some(s) => s.parse(),
        }
    }

    /// Resolve to a concrete page for a result set of `total` items
    ///
    /// The first page always exists, even when there is nothing to show.
    pub fn resolve(self, total: usize, per_page: usize) -> Result<usize, PageError> {
        let total_pages = total_pages(total, per_page);
        match self {
            PageNumber::Last => Ok(total_pages),
            PageNumber::Number(n) if n <= total_pages => Ok(n),
            PageNumber::Number(n) => Err(PageError::OutOfRange {
                page: n,
                total_pages,
            }),
        }
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageNumber::Number(n) => write!(f, "{}", n),
            PageNumber::Last => f.write_str("last"),
        }
    }
}

fn total_pages(total: usize, per_page: usize) -> usize {
    total.div_ceil(per_page.max(1)).max(1)
}

/// One page of results plus its metadata
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub per_page: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages, at least 1
    pub total_pages: usize,

    pub has_next: bool,

    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(page: usize, per_page: usize, total: usize) -> Self {
        let per_page = per_page.max(1);
        let total_pages = total_pages(total, per_page);

        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Number of items to skip to reach this page
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.per_page
    }
}
