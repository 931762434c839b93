use serde::Serialize;
use utoipa::ToSchema;

/// Success envelope: a message, the payload and optional pagination blocks
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PaginationMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<PaginationLinks>,
}

impl<T> ApiResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
            meta: None,
            links: None,
        }
    }

    pub fn with_meta(mut self, meta: PaginationMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn with_links(mut self, links: PaginationLinks) -> Self {
        self.links = Some(links);
        self
    }
}

/// Envelope for endpoints that only acknowledge an action
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl PaginationMeta {
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        let total_pages = if total > 0 && per_page > 0 {
            (total + per_page - 1) / per_page
        } else {
            0
        };

        Self {
            page,
            per_page,
            total,
            total_pages,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct PaginationLinks {
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl PaginationLinks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_self(mut self, link: String) -> Self {
        self.self_link = Some(link);
        self
    }

    pub fn with_first(mut self, link: String) -> Self {
        self.first = Some(link);
        self
    }

    pub fn with_last(mut self, link: String) -> Self {
        self.last = Some(link);
        self
    }

    pub fn with_prev(mut self, link: String) -> Self {
        self.prev = Some(link);
        self
    }

    pub fn with_next(mut self, link: String) -> Self {
        self.next = Some(link);
        self
    }
}
