use crate::domain::auth::RefreshTokenRepository;
use crate::domain::users::{UpdateUser, UserRepository};
use crate::shared::error::AppError;
use std::sync::Arc;
use uuid::Uuid;

/// Employees are never hard-deleted: the account is deactivated and logged out
pub struct DeactivateUserUseCase {
    repo: Arc<dyn UserRepository>,
    refresh_token_repo: Arc<dyn RefreshTokenRepository>,
}

impl DeactivateUserUseCase {
    pub fn new(
        repo: Arc<dyn UserRepository>,
        refresh_token_repo: Arc<dyn RefreshTokenRepository>,
    ) -> Self {
        Self {
            repo,
            refresh_token_repo,
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, actor_id: Uuid, id: Uuid) -> Result<(), AppError> {
        if actor_id == id {
            return Err(AppError::Forbidden(
                "You cannot deactivate your own account".to_string(),
            ));
        }

        self.repo
            .update(
                id,
                UpdateUser {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let revoked = self.refresh_token_repo.revoke_all_for_user(id).await?;
        tracing::info!(user_id = %id, revoked, "User deactivated");

        Ok(())
    }
}
