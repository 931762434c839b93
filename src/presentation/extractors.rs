use crate::domain::auth::{ACCESS_TOKEN_TYPE, AuthService, Claims};
use crate::infrastructure::state::AppState;
use crate::shared::error::AppError;
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use uuid::Uuid;

/// Cookie carrying the access token for browser clients
pub const SESSION_COOKIE: &str = "session_token";

/// Authenticated user extractor.
/// Reads the JWT from `Authorization: Bearer`, falling back to the session cookie.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub claims: Claims,
    pub user_id: Uuid,
    pub session_id: Uuid,
}

fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, AppError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value
        .to_str()
        .map_err(|_| AppError::Unauthorized("Invalid Authorization header".to_string()))?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(Some)
        .ok_or_else(|| AppError::Unauthorized("Invalid Authorization header format".to_string()))
}

pub(crate) fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = match bearer_token(&parts.headers)? {
            Some(token) => token,
            None => cookie_value(&parts.headers, SESSION_COOKIE)
                .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?,
        };

        let claims = state
            .auth_service
            .validate_token(token)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))?;

        if claims.token_type != ACCESS_TOKEN_TYPE {
            return Err(AppError::Unauthorized("Invalid token type".to_string()));
        }

        let user_id = claims
            .user_id()
            .map_err(|e| AppError::Unauthorized(e.to_string()))?;
        let session_id = claims
            .session_id()
            .map_err(|e| AppError::Unauthorized(e.to_string()))?;

        Ok(AuthUser {
            claims,
            user_id,
            session_id,
        })
    }
}
