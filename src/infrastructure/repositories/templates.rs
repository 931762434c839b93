use crate::domain::notifications::{
    NewNotificationTemplate, NotificationTemplate, NotificationTemplateRepository,
    UpdateNotificationTemplate,
};
use crate::infrastructure::db::DbPool;
use crate::infrastructure::db::models::notifications::NotificationTemplateDbModel;
use async_trait::async_trait;
use uuid::Uuid;

#[derive(Clone)]
pub struct PostgresNotificationTemplateRepository {
    pool: DbPool,
}

impl PostgresNotificationTemplateRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationTemplateRepository for PostgresNotificationTemplateRepository {
    #[tracing::instrument(skip(self))]
    async fn find_active_by_event(
        &self,
        event_code: &str,
    ) -> Result<Option<NotificationTemplate>, anyhow::Error> {
        let template = sqlx::query_as::<_, NotificationTemplateDbModel>(
            r#"
            SELECT id, event_code, title_template, body_template, is_active, created_at, updated_at
            FROM notification_templates
            WHERE event_code = $1 AND is_active = TRUE
            "#,
        )
        .bind(event_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(template.map(Into::into))
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<NotificationTemplate>, anyhow::Error> {
        let template = sqlx::query_as::<_, NotificationTemplateDbModel>(
            r#"
            SELECT id, event_code, title_template, body_template, is_active, created_at, updated_at
            FROM notification_templates
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(template.map(Into::into))
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_event(
        &self,
        event_code: &str,
    ) -> Result<Option<NotificationTemplate>, anyhow::Error> {
        let template = sqlx::query_as::<_, NotificationTemplateDbModel>(
            r#"
            SELECT id, event_code, title_template, body_template, is_active, created_at, updated_at
            FROM notification_templates
            WHERE event_code = $1
            "#,
        )
        .bind(event_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(template.map(Into::into))
    }

    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<NotificationTemplate>, anyhow::Error> {
        let templates = sqlx::query_as::<_, NotificationTemplateDbModel>(
            r#"
            SELECT id, event_code, title_template, body_template, is_active, created_at, updated_at
            FROM notification_templates
            ORDER BY event_code ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(templates.into_iter().map(Into::into).collect())
    }

    #[tracing::instrument(skip(self, template), fields(event_code = %template.event_code))]
    async fn create(
        &self,
        template: NewNotificationTemplate,
    ) -> Result<NotificationTemplate, anyhow::Error> {
        let template = sqlx::query_as::<_, NotificationTemplateDbModel>(
            r#"
            INSERT INTO notification_templates (event_code, title_template, body_template, is_active)
            VALUES ($1, $2, $3, $4)
            RETURNING id, event_code, title_template, body_template, is_active, created_at, updated_at
            "#,
        )
        .bind(template.event_code)
        .bind(template.title_template)
        .bind(template.body_template)
        .bind(template.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(template.into())
    }

    #[tracing::instrument(skip(self, update))]
    async fn update(
        &self,
        id: Uuid,
        update: UpdateNotificationTemplate,
    ) -> Result<Option<NotificationTemplate>, anyhow::Error> {
        let template = sqlx::query_as::<_, NotificationTemplateDbModel>(
            r#"
            UPDATE notification_templates SET
                title_template = COALESCE($2, title_template),
                body_template = COALESCE($3, body_template),
                is_active = COALESCE($4, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, event_code, title_template, body_template, is_active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(update.title_template)
        .bind(update.body_template)
        .bind(update.is_active)
        .fetch_optional(&self.pool)
        .await?;

        Ok(template.map(Into::into))
    }
}
