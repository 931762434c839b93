use crate::domain::auth::{AuthService, NewRefreshToken, RefreshTokenRepository};
use crate::domain::users::User;
use crate::shared::error::AppError;
use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use time::OffsetDateTime;
use uuid::Uuid;

pub const REFRESH_TOKEN_LENGTH: usize = 64;

/// Common response structure for token operations
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub session_id: Uuid,
}

/// Token lifetimes in seconds
#[derive(Debug, Clone, Copy)]
pub struct TokenLifetimes {
    pub access_token_expiry: i64,
    pub refresh_token_expiry: i64,
}

/// Generate SHA-256 hash of a token string
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Opaque refresh secret drawn from the thread-local CSPRNG
pub fn generate_refresh_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(REFRESH_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// A fresh refresh secret plus the record to persist for it
pub fn new_refresh_token(
    user_id: Uuid,
    session_id: Uuid,
    refresh_token_expiry: i64,
) -> (String, NewRefreshToken) {
    let refresh_token = generate_refresh_token();
    let record = NewRefreshToken {
        user_id,
        session_id,
        token_hash: hash_token(&refresh_token),
        expires_at: OffsetDateTime::now_utc() + time::Duration::seconds(refresh_token_expiry),
    };
    (refresh_token, record)
}

pub fn token_response(
    access_token: String,
    refresh_token: String,
    session_id: Uuid,
    access_token_expiry: i64,
) -> TokenResponse {
    TokenResponse {
        access_token,
        refresh_token,
        token_type: "Bearer".to_string(),
        expires_in: access_token_expiry,
        session_id,
    }
}

/// Open a new session for `user` and store its first refresh token
pub async fn start_session(
    user: &User,
    auth_service: &Arc<dyn AuthService>,
    refresh_token_repo: &Arc<dyn RefreshTokenRepository>,
    lifetimes: TokenLifetimes,
) -> Result<TokenResponse, AppError> {
    let session_id = Uuid::new_v4();

    let access_token = auth_service
        .generate_access_token(user.id, user.role, session_id)
        .map_err(AppError::InternalServerError)?;

    let (refresh_token, record) =
        new_refresh_token(user.id, session_id, lifetimes.refresh_token_expiry);

    refresh_token_repo
        .create(record)
        .await
        .map_err(AppError::InternalServerError)?;

    Ok(token_response(
        access_token,
        refresh_token,
        session_id,
        lifetimes.access_token_expiry,
    ))
}
