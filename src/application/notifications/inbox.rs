use crate::domain::notifications::{Notification, NotificationRepository};
use crate::shared::error::AppError;
use crate::shared::pagination::{PageParams, Paginated};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;
use uuid::Uuid;

pub const DEFAULT_RECENT_LIMIT: i64 = 10;
pub const MAX_RECENT_LIMIT: i64 = 50;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecentNotificationsQuery {
    /// Number of notifications, 1 to 50 (default 10)
    pub limit: Option<i64>,
}

impl RecentNotificationsQuery {
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_RECENT_LIMIT)
            .clamp(1, MAX_RECENT_LIMIT)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListNotificationsRequest {
    #[serde(default)]
    pub page: PageParams,
}

fn not_found() -> AppError {
    AppError::NotFound("Notification not found".to_string())
}

/// Read side and per-user mutations of the notification inbox
pub struct NotificationInbox {
    repo: Arc<dyn NotificationRepository>,
}

impl NotificationInbox {
    pub fn new(repo: Arc<dyn NotificationRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip(self))]
    pub async fn recent(
        &self,
        user_id: Uuid,
        query: RecentNotificationsQuery,
    ) -> Result<Vec<Notification>, AppError> {
        Ok(self.repo.find_recent(user_id, query.limit()).await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(
        &self,
        user_id: Uuid,
        req: ListNotificationsRequest,
    ) -> Result<Paginated<Notification>, AppError> {
        let page = req.page.normalized();
        let (items, total) = futures::try_join!(
            self.repo.find_by_user(user_id, page.limit(), page.offset()),
            self.repo.count_by_user(user_id),
        )?;

        Ok(Paginated { items, total, page })
    }

    pub async fn unread_count(&self, user_id: Uuid) -> Result<i64, AppError> {
        Ok(self.repo.count_unread(user_id).await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn mark_read(&self, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
        if !self.repo.mark_read(id, user_id).await? {
            return Err(not_found());
        }
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn mark_all_read(&self, user_id: Uuid) -> Result<u64, AppError> {
        Ok(self.repo.mark_all_read(user_id).await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
        if !self.repo.soft_delete(id, user_id).await? {
            return Err(not_found());
        }
        Ok(())
    }
}
