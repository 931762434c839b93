use crate::domain::auth::RefreshTokenRepository;
use crate::shared::error::AppError;
use std::sync::Arc;
use time::{Duration, OffsetDateTime};

/// Expired refresh tokens are kept this long so reuse can still be detected
pub const EXPIRED_TOKEN_RETENTION: Duration = Duration::days(7);

pub struct PurgeExpiredTokensUseCase {
    refresh_token_repo: Arc<dyn RefreshTokenRepository>,
    retention: Duration,
}

impl PurgeExpiredTokensUseCase {
    pub fn new(refresh_token_repo: Arc<dyn RefreshTokenRepository>) -> Self {
        Self {
            refresh_token_repo,
            retention: EXPIRED_TOKEN_RETENTION,
        }
    }

    pub async fn execute(&self) -> Result<u64, AppError> {
        self.execute_at(OffsetDateTime::now_utc()).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute_at(&self, now: OffsetDateTime) -> Result<u64, AppError> {
        let deleted = self
            .refresh_token_repo
            .delete_expired(now - self.retention)
            .await?;

        if deleted > 0 {
            tracing::info!(deleted, "Purged expired refresh tokens");
        }
        Ok(deleted)
    }
}
