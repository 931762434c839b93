use crate::domain::auth::{NewRefreshToken, RefreshToken, RefreshTokenRepository};
use crate::infrastructure::db::DbPool;
use crate::infrastructure::db::models::auth::RefreshTokenDbModel;
use anyhow::Result;
use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

pub struct PostgresRefreshTokenRepository {
    pool: DbPool,
}

impl PostgresRefreshTokenRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

const INSERT_TOKEN: &str = r#"
    INSERT INTO refresh_tokens (user_id, session_id, token_hash, expires_at)
    VALUES ($1, $2, $3, $4)
    RETURNING id, user_id, session_id, token_hash, expires_at, revoked_at, created_at
"#;

#[async_trait]
impl RefreshTokenRepository for PostgresRefreshTokenRepository {
    #[tracing::instrument(skip(self, token), fields(session_id = %token.session_id))]
    async fn create(&self, token: NewRefreshToken) -> Result<RefreshToken> {
        let token_db = sqlx::query_as::<_, RefreshTokenDbModel>(INSERT_TOKEN)
            .bind(token.user_id)
            .bind(token.session_id)
            .bind(&token.token_hash)
            .bind(token.expires_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(token_db.into())
    }

    #[tracing::instrument(skip(self, token_hash))]
    async fn find_active(
        &self,
        session_id: Uuid,
        token_hash: &str,
    ) -> Result<Option<RefreshToken>> {
        let token_db = sqlx::query_as::<_, RefreshTokenDbModel>(
            r#"
            SELECT id, user_id, session_id, token_hash, expires_at, revoked_at, created_at
            FROM refresh_tokens
            WHERE session_id = $1
              AND token_hash = $2
              AND revoked_at IS NULL
              AND expires_at > NOW()
            "#,
        )
        .bind(session_id)
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(token_db.map(Into::into))
    }

    #[tracing::instrument(skip(self, replacement))]
    async fn rotate(
        &self,
        old_id: Uuid,
        replacement: NewRefreshToken,
    ) -> Result<Option<RefreshToken>> {
        let mut tx = self.pool.begin().await?;

        let revoked = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked_at = NOW()
            WHERE id = $1 AND revoked_at IS NULL AND expires_at > NOW()
            "#,
        )
        .bind(old_id)
        .execute(&mut *tx)
        .await?;

        if revoked.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let token_db = sqlx::query_as::<_, RefreshTokenDbModel>(INSERT_TOKEN)
            .bind(replacement.user_id)
            .bind(replacement.session_id)
            .bind(&replacement.token_hash)
            .bind(replacement.expires_at)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Some(token_db.into()))
    }

    #[tracing::instrument(skip(self))]
    async fn revoke_session(&self, session_id: Uuid) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked_at = NOW()
            WHERE session_id = $1 AND revoked_at IS NULL
            "#,
        )
        .bind(session_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    #[tracing::instrument(skip(self))]
    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked_at = NOW()
            WHERE user_id = $1 AND revoked_at IS NULL
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    #[tracing::instrument(skip(self))]
    async fn delete_expired(&self, before: OffsetDateTime) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM refresh_tokens
            WHERE expires_at <= $1
            "#,
        )
        .bind(before)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
