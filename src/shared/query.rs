use crate::shared::error::AppError;
use crate::shared::pagination::PageParams;
use axum::{extract::FromRequestParts, http::request::Parts};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use time::Date;
use time::macros::format_description;

/// Extractor that deserializes query strings into some type using `serde_qs`.
/// This supports nested query parameters like `page[number]=1`.
pub struct Qs<T>(pub T);

impl<T, S> FromRequestParts<S> for Qs<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query = parts.uri.query().unwrap_or("");
        match serde_qs::Config::default().deserialize_str::<T>(query) {
            Ok(value) => Ok(Qs(value)),
            Err(e) => {
                tracing::warn!("Failed to parse query string: {}", e);
                Err(AppError::ValidationError(format!(
                    "Invalid query parameters: {}",
                    e
                )))
            }
        }
    }
}

/// `filter[search]`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchFilter {
    pub search: Option<String>,
}

impl SearchFilter {
    /// Trimmed search term, `None` when blank
    pub fn term(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// Query of a searchable, paginated listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchListParams {
    #[serde(default)]
    pub page: PageParams,
    #[serde(default)]
    pub filter: SearchFilter,
}

/// Parse an optional `YYYY-MM-DD` filter value
pub fn parse_date_param(field: &str, value: Option<&str>) -> Result<Option<Date>, AppError> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    parse_date(field, value).map(Some)
}

/// Parse a required `YYYY-MM-DD` value
pub fn parse_date(field: &str, value: &str) -> Result<Date, AppError> {
    Date::parse(value.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| AppError::ValidationError(format!("{} must be a YYYY-MM-DD date", field)))
}
