use crate::domain::auth::RefreshTokenRepository;
use crate::shared::error::AppError;
use std::sync::Arc;
use uuid::Uuid;

pub struct LogoutUseCase {
    refresh_token_repo: Arc<dyn RefreshTokenRepository>,
}

impl LogoutUseCase {
    pub fn new(refresh_token_repo: Arc<dyn RefreshTokenRepository>) -> Self {
        Self { refresh_token_repo }
    }

    /// Revokes every refresh token of the session; returns how many were active
    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, session_id: Uuid) -> Result<u64, AppError> {
        self.refresh_token_repo
            .revoke_session(session_id)
            .await
            .map_err(AppError::InternalServerError)
    }
}
