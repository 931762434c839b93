use crate::domain::notifications::{NewNotification, Notification, NotificationRepository};
use crate::infrastructure::db::DbPool;
use crate::infrastructure::db::models::notifications::NotificationDbModel;
use async_trait::async_trait;
use uuid::Uuid;

#[derive(Clone)]
pub struct PostgresNotificationRepository {
    pool: DbPool,
}

impl PostgresNotificationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PostgresNotificationRepository {
    #[tracing::instrument(skip(self, notification), fields(user_id = %notification.user_id))]
    async fn create(&self, notification: NewNotification) -> Result<Notification, anyhow::Error> {
        let notification = sqlx::query_as::<_, NotificationDbModel>(
            r#"
            INSERT INTO notifications (user_id, event_code, title, body)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, event_code, title, body, read_at, created_at, deleted_at
            "#,
        )
        .bind(notification.user_id)
        .bind(notification.event_code)
        .bind(notification.title)
        .bind(notification.body)
        .fetch_one(&self.pool)
        .await?;

        Ok(notification.into())
    }

    #[tracing::instrument(skip(self))]
    async fn find_recent(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Notification>, anyhow::Error> {
        self.find_by_user(user_id, limit, 0).await
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_user(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, anyhow::Error> {
        let notifications = sqlx::query_as::<_, NotificationDbModel>(
            r#"
            SELECT id, user_id, event_code, title, body, read_at, created_at, deleted_at
            FROM notifications
            WHERE user_id = $1 AND deleted_at IS NULL
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications.into_iter().map(Into::into).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn count_by_user(&self, user_id: Uuid) -> Result<i64, anyhow::Error> {
        let result: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND deleted_at IS NULL",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    #[tracing::instrument(skip(self))]
    async fn count_unread(&self, user_id: Uuid) -> Result<i64, anyhow::Error> {
        let result: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM notifications
            WHERE user_id = $1 AND deleted_at IS NULL AND read_at IS NULL
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    #[tracing::instrument(skip(self))]
    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> Result<bool, anyhow::Error> {
        // Already-read rows still count as found; read_at keeps its first value
        let result = sqlx::query(
            r#"
            UPDATE notifications
            SET read_at = COALESCE(read_at, NOW())
            WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(skip(self))]
    async fn mark_all_read(&self, user_id: Uuid) -> Result<u64, anyhow::Error> {
        let result = sqlx::query(
            r#"
            UPDATE notifications
            SET read_at = NOW()
            WHERE user_id = $1 AND read_at IS NULL AND deleted_at IS NULL
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    #[tracing::instrument(skip(self))]
    async fn soft_delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, anyhow::Error> {
        let result = sqlx::query(
            r#"
            UPDATE notifications
            SET deleted_at = NOW()
            WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
