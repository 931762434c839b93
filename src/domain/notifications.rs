use async_trait::async_trait;
use std::collections::BTreeMap;
use time::OffsetDateTime;
use uuid::Uuid;

/// Values substituted into `{key}` placeholders
pub type TemplateData = BTreeMap<String, String>;

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub event_code: String,
    pub title: String,
    pub body: String,
    pub read_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub deleted_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: Uuid,
    pub event_code: String,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct NotificationTemplate {
    pub id: Uuid,
    pub event_code: String,
    pub title_template: String,
    pub body_template: String,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl NotificationTemplate {
    /// Returns the rendered `(title, body)`
    pub fn render(&self, data: &TemplateData) -> (String, String) {
        (
            render_template(&self.title_template, data),
            render_template(&self.body_template, data),
        )
    }
}

#[derive(Debug, Clone)]
pub struct NewNotificationTemplate {
    pub event_code: String,
    pub title_template: String,
    pub body_template: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateNotificationTemplate {
    pub title_template: Option<String>,
    pub body_template: Option<String>,
    pub is_active: Option<bool>,
}

/// Replaces every `{key}` present in `data` with its value.
///
/// Substitution is a single left-to-right pass: inserted values are never
/// rescanned, nothing is escaped, and unknown placeholders are kept verbatim.
pub fn render_template(template: &str, data: &TemplateData) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        match after.find('}') {
            Some(close) => {
                let key = &after[..close];
                match data.get(key) {
                    Some(value) => out.push_str(value),
                    None => {
                        // resume right after the brace: `{{key}}` still renders the inner key
                        out.push('{');
                        rest = after;
                        continue;
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(&self, notification: NewNotification) -> Result<Notification, anyhow::Error>;
    async fn find_recent(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Notification>, anyhow::Error>;
    async fn find_by_user(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, anyhow::Error>;
    async fn count_by_user(&self, user_id: Uuid) -> Result<i64, anyhow::Error>;
    async fn count_unread(&self, user_id: Uuid) -> Result<i64, anyhow::Error>;
    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> Result<bool, anyhow::Error>;
    async fn mark_all_read(&self, user_id: Uuid) -> Result<u64, anyhow::Error>;
    async fn soft_delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, anyhow::Error>;
}

#[async_trait]
pub trait NotificationTemplateRepository: Send + Sync {
    async fn find_active_by_event(
        &self,
        event_code: &str,
    ) -> Result<Option<NotificationTemplate>, anyhow::Error>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<NotificationTemplate>, anyhow::Error>;
    async fn find_by_event(
        &self,
        event_code: &str,
    ) -> Result<Option<NotificationTemplate>, anyhow::Error>;
    async fn find_all(&self) -> Result<Vec<NotificationTemplate>, anyhow::Error>;
    async fn create(
        &self,
        template: NewNotificationTemplate,
    ) -> Result<NotificationTemplate, anyhow::Error>;
    async fn update(
        &self,
        id: Uuid,
        update: UpdateNotificationTemplate,
    ) -> Result<Option<NotificationTemplate>, anyhow::Error>;
}
