use crate::application::auth::token_utils::{TokenLifetimes, TokenResponse, start_session};
use crate::domain::auth::{AuthService, RefreshTokenRepository};
use crate::domain::password::PasswordHashingService;
use crate::domain::users::{User, UserRepository, normalize_email};
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "budi@example.com")]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Authenticated user plus the token pair of the new session
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: User,
    pub tokens: TokenResponse,
}

pub struct LoginUseCase {
    user_repo: Arc<dyn UserRepository>,
    refresh_token_repo: Arc<dyn RefreshTokenRepository>,
    auth_service: Arc<dyn AuthService>,
    password_service: Arc<dyn PasswordHashingService>,
    lifetimes: TokenLifetimes,
}

impl LoginUseCase {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        refresh_token_repo: Arc<dyn RefreshTokenRepository>,
        auth_service: Arc<dyn AuthService>,
        password_service: Arc<dyn PasswordHashingService>,
        lifetimes: TokenLifetimes,
    ) -> Self {
        Self {
            user_repo,
            refresh_token_repo,
            auth_service,
            password_service,
            lifetimes,
        }
    }

    #[tracing::instrument(skip(self, req), fields(email = %req.email))]
    pub async fn execute(&self, req: LoginRequest) -> Result<LoginResult, AppError> {
        let email = normalize_email(&req.email);

        let user = self
            .user_repo
            .find_by_email(&email)
            .await
            .map_err(AppError::InternalServerError)?
            .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

        let valid_password = self
            .password_service
            .verify_password(&req.password, &user.password_hash)
            .map_err(AppError::InternalServerError)?;

        if !valid_password {
            return Err(AppError::Unauthorized(
                "Invalid email or password".to_string(),
            ));
        }

        if !user.is_active {
            return Err(AppError::Forbidden("Account is inactive".to_string()));
        }

        let tokens = start_session(
            &user,
            &self.auth_service,
            &self.refresh_token_repo,
            self.lifetimes,
        )
        .await?;

        tracing::info!(user_id = %user.id, session_id = %tokens.session_id, "User logged in");

        Ok(LoginResult { user, tokens })
    }
}
