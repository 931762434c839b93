use crate::domain::auth::RefreshTokenRepository;
use crate::domain::password::PasswordHashingService;
use crate::domain::users::{UpdateUser, UserRepository};
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,

    #[validate(length(min = 8, message = "New password must be at least 8 characters"))]
    #[schema(min_length = 8)]
    pub new_password: String,
}

pub struct ChangePasswordUseCase {
    user_repo: Arc<dyn UserRepository>,
    refresh_token_repo: Arc<dyn RefreshTokenRepository>,
    password_service: Arc<dyn PasswordHashingService>,
}

impl ChangePasswordUseCase {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        refresh_token_repo: Arc<dyn RefreshTokenRepository>,
        password_service: Arc<dyn PasswordHashingService>,
    ) -> Self {
        Self {
            user_repo,
            refresh_token_repo,
            password_service,
        }
    }

    /// Every session of the user is logged out afterwards
    #[tracing::instrument(skip(self, req))]
    pub async fn execute(&self, user_id: Uuid, req: ChangePasswordRequest) -> Result<(), AppError> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let valid = self
            .password_service
            .verify_password(&req.current_password, &user.password_hash)?;
        if !valid {
            return Err(AppError::ValidationError(
                "Current password is incorrect".to_string(),
            ));
        }

        let password_hash = self.password_service.hash_password(&req.new_password)?;
        self.user_repo
            .update(
                user_id,
                UpdateUser {
                    password_hash: Some(password_hash),
                    ..Default::default()
                },
            )
            .await?;

        let revoked = self.refresh_token_repo.revoke_all_for_user(user_id).await?;
        tracing::info!(%user_id, revoked, "Password changed, sessions revoked");

        Ok(())
    }
}
