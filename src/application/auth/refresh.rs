use crate::application::auth::token_utils::{
    TokenLifetimes, TokenResponse, hash_token, new_refresh_token, token_response,
};
use crate::domain::auth::{AuthService, RefreshTokenRepository};
use crate::domain::users::UserRepository;
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,

    pub session_id: Uuid,
}

pub type RefreshTokenResponse = TokenResponse;

const INVALID_REFRESH_TOKEN: &str = "Invalid or expired refresh token";

/// Rotates a refresh token within its session.
///
/// Presenting anything but the session's current token (unknown, expired or
/// already rotated) is treated as possible theft and revokes the whole session.
pub struct RefreshTokenUseCase {
    refresh_token_repo: Arc<dyn RefreshTokenRepository>,
    user_repo: Arc<dyn UserRepository>,
    auth_service: Arc<dyn AuthService>,
    lifetimes: TokenLifetimes,
}

impl RefreshTokenUseCase {
    pub fn new(
        refresh_token_repo: Arc<dyn RefreshTokenRepository>,
        user_repo: Arc<dyn UserRepository>,
        auth_service: Arc<dyn AuthService>,
        lifetimes: TokenLifetimes,
    ) -> Self {
        Self {
            refresh_token_repo,
            user_repo,
            auth_service,
            lifetimes,
        }
    }

    #[tracing::instrument(skip(self, req), fields(session_id = %req.session_id))]
    pub async fn execute(
        &self,
        req: RefreshTokenRequest,
    ) -> Result<RefreshTokenResponse, AppError> {
        let session_id = req.session_id;
        let token_hash = hash_token(&req.refresh_token);

        let Some(stored) = self
            .refresh_token_repo
            .find_active(session_id, &token_hash)
            .await
            .map_err(AppError::InternalServerError)?
        else {
            let revoked = self.revoke_session(session_id).await?;
            tracing::warn!(
                %session_id,
                revoked,
                "Refresh token mismatch, session revoked"
            );
            return Err(AppError::Unauthorized(INVALID_REFRESH_TOKEN.to_string()));
        };

        let user = self
            .user_repo
            .find_by_id(stored.user_id)
            .await
            .map_err(AppError::InternalServerError)?;

        let user = match user {
            Some(user) if user.is_active => user,
            _ => {
                self.revoke_session(session_id).await?;
                return Err(AppError::Unauthorized(
                    "User no longer has access".to_string(),
                ));
            }
        };

        let (refresh_token, replacement) =
            new_refresh_token(user.id, session_id, self.lifetimes.refresh_token_expiry);

        // Revoke-and-insert is one transaction; losing a concurrent race means reuse
        let rotated = self
            .refresh_token_repo
            .rotate(stored.id, replacement)
            .await
            .map_err(AppError::InternalServerError)?;

        if rotated.is_none() {
            let revoked = self.revoke_session(session_id).await?;
            tracing::warn!(
                %session_id,
                revoked,
                "Refresh token rotated concurrently, session revoked"
            );
            return Err(AppError::Unauthorized(INVALID_REFRESH_TOKEN.to_string()));
        }

        let access_token = self
            .auth_service
            .generate_access_token(user.id, user.role, session_id)
            .map_err(AppError::InternalServerError)?;

        Ok(token_response(
            access_token,
            refresh_token,
            session_id,
            self.lifetimes.access_token_expiry,
        ))
    }

    async fn revoke_session(&self, session_id: Uuid) -> Result<u64, AppError> {
        self.refresh_token_repo
            .revoke_session(session_id)
            .await
            .map_err(AppError::InternalServerError)
    }
}
