use crate::shared::response::{PaginationLinks, PaginationMeta};
use axum::http::Uri;
use serde::Deserialize;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;
/// Largest page number whose offset still fits an `i64`
pub const MAX_PAGE_NUMBER: i64 = i64::MAX / MAX_PAGE_SIZE;

/// `page[number]` / `page[size]` query parameters
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_number")]
    pub number: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

fn default_number() -> i64 {
    1
}

fn default_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            number: default_number(),
            size: default_size(),
        }
    }
}

impl PageParams {
    /// Clamp page number and size into accepted bounds
    pub fn normalized(self) -> Self {
        Self {
            number: self.number.clamp(1, MAX_PAGE_NUMBER),
            size: self.size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn limit(&self) -> i64 {
        self.size
    }

    pub fn offset(&self) -> i64 {
        self.number.saturating_sub(1).max(0).saturating_mul(self.size.max(0))
    }

    pub fn meta(&self, total: i64) -> PaginationMeta {
        PaginationMeta::new(self.number, self.size, total)
    }
}

/// A page of results plus the total row count
#[derive(Debug, Clone)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: PageParams,
}

impl<T> Paginated<T> {
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
        }
    }
}

/// Pagination link builder
pub struct PaginationLinkBuilder {
    base_url: String,
    page_number: i64,
    page_size: i64,
    total_pages: i64,
}

impl PaginationLinkBuilder {
    /// Create a new pagination link builder from a URI
    /// Automatically extracts the path from the URI
    pub fn from_uri(uri: &Uri, page_number: i64, page_size: i64, total: i64) -> Self {
        Self::new(uri.path(), page_number, page_size, total)
    }

    pub fn new(base_url: impl Into<String>, page_number: i64, page_size: i64, total: i64) -> Self {
        let total_pages = PaginationMeta::new(page_number, page_size, total).total_pages;

        Self {
            base_url: base_url.into(),
            page_number,
            page_size,
            total_pages,
        }
    }

    pub fn build(self) -> PaginationLinks {
        let mut links = PaginationLinks::new()
            .with_self(self.page_link(self.page_number))
            .with_first(self.page_link(1));

        if self.total_pages > 0 {
            links = links.with_last(self.page_link(self.total_pages));
        }

        if self.page_number > 1 {
            links = links.with_prev(self.page_link(self.page_number - 1));
        }

        if self.page_number < self.total_pages {
            links = links.with_next(self.page_link(self.page_number + 1));
        }

        links
    }

    fn page_link(&self, page: i64) -> String {
        format!(
            "{}?page[number]={}&page[size]={}",
            self.base_url, page, self.page_size
        )
    }
}
