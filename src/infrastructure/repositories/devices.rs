use crate::domain::devices::{Device, DevicePlatform, DeviceRepository};
use crate::infrastructure::db::DbPool;
use crate::infrastructure::db::models::auth::DeviceDbModel;
use async_trait::async_trait;
use uuid::Uuid;

#[derive(Clone)]
pub struct PostgresDeviceRepository {
    pool: DbPool,
}

impl PostgresDeviceRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeviceRepository for PostgresDeviceRepository {
    #[tracing::instrument(skip(self, push_token))]
    async fn upsert(
        &self,
        user_id: Uuid,
        push_token: &str,
        platform: DevicePlatform,
    ) -> Result<Device, anyhow::Error> {
        // A token moves to whoever registered it last
        let device = sqlx::query_as::<_, DeviceDbModel>(
            r#"
            INSERT INTO devices (user_id, push_token, platform)
            VALUES ($1, $2, $3)
            ON CONFLICT (push_token) DO UPDATE SET
                user_id = EXCLUDED.user_id,
                platform = EXCLUDED.platform,
                last_seen_at = NOW()
            RETURNING id, user_id, push_token, platform, last_seen_at, created_at
            "#,
        )
        .bind(user_id)
        .bind(push_token)
        .bind(platform.as_str())
        .fetch_one(&self.pool)
        .await?;

        device.try_into()
    }

    #[tracing::instrument(skip(self))]
    async fn push_tokens_for_user(&self, user_id: Uuid) -> Result<Vec<String>, anyhow::Error> {
        let tokens: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT push_token FROM devices
            WHERE user_id = $1
            ORDER BY last_seen_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tokens.into_iter().map(|(token,)| token).collect())
    }

    #[tracing::instrument(skip(self, push_token))]
    async fn delete_for_user(&self, user_id: Uuid, push_token: &str) -> Result<bool, anyhow::Error> {
        let result = sqlx::query("DELETE FROM devices WHERE user_id = $1 AND push_token = $2")
            .bind(user_id)
            .bind(push_token)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(skip(self, push_tokens), fields(count = push_tokens.len()))]
    async fn delete_tokens(&self, push_tokens: &[String]) -> Result<u64, anyhow::Error> {
        if push_tokens.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query("DELETE FROM devices WHERE push_token = ANY($1)")
            .bind(push_tokens)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
