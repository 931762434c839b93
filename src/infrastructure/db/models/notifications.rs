use crate::domain::notifications::{Notification, NotificationTemplate};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct NotificationDbModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub event_code: String,
    pub title: String,
    pub body: String,
    pub read_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub deleted_at: Option<OffsetDateTime>,
}

impl From<NotificationDbModel> for Notification {
    fn from(model: NotificationDbModel) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            event_code: model.event_code,
            title: model.title,
            body: model.body,
            read_at: model.read_at,
            created_at: model.created_at,
            deleted_at: model.deleted_at,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct NotificationTemplateDbModel {
    pub id: Uuid,
    pub event_code: String,
    pub title_template: String,
    pub body_template: String,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<NotificationTemplateDbModel> for NotificationTemplate {
    fn from(model: NotificationTemplateDbModel) -> Self {
        Self {
            id: model.id,
            event_code: model.event_code,
            title_template: model.title_template,
            body_template: model.body_template,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
