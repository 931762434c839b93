use crate::application::notifications::dispatch::NotificationDispatcher;
use crate::domain::notifications::{Notification, TemplateData};
use crate::domain::users::UserRepository;
use crate::shared::error::AppError;
use crate::shared::validation::validate_upper_code;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SendNotificationRequest {
    #[validate(custom(function = "validate_upper_code"))]
    #[schema(example = "LEAVE_APPROVED")]
    pub event_code: String,
    pub user_id: Uuid,
    /// Placeholder values substituted into the template
    #[serde(default)]
    pub data: TemplateData,
}

/// Manual dispatch of any event to a single user
pub struct SendNotificationUseCase {
    users: Arc<dyn UserRepository>,
    dispatcher: NotificationDispatcher,
}

impl SendNotificationUseCase {
    pub fn new(users: Arc<dyn UserRepository>, dispatcher: NotificationDispatcher) -> Self {
        Self { users, dispatcher }
    }

    #[tracing::instrument(skip(self, req), fields(event_code = %req.event_code, user_id = %req.user_id))]
    pub async fn execute(&self, req: SendNotificationRequest) -> Result<Notification, AppError> {
        if self.users.find_by_id(req.user_id).await?.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        self.dispatcher
            .dispatch(&req.event_code, req.user_id, &req.data)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("No active template for {}", req.event_code))
            })
    }
}
