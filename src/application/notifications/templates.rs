use crate::domain::notifications::{
    NewNotificationTemplate, NotificationTemplate, NotificationTemplateRepository,
    UpdateNotificationTemplate,
};
use crate::infrastructure::db::is_unique_violation;
use crate::shared::error::AppError;
use crate::shared::validation::validate_upper_code;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTemplateRequest {
    #[validate(
        length(min = 1, max = 100, message = "Event code must be between 1 and 100 characters"),
        custom(function = "validate_upper_code")
    )]
    #[schema(example = "LEAVE_APPROVED")]
    pub event_code: String,
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    #[schema(example = "Leave approved")]
    pub title_template: String,
    #[validate(length(min = 1, message = "Body must not be empty"))]
    #[schema(example = "Hi {name}, your leave from {start_date} to {end_date} was approved")]
    pub body_template: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTemplateRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title_template: Option<String>,
    #[validate(length(min = 1, message = "Body must not be empty"))]
    pub body_template: Option<String>,
    pub is_active: Option<bool>,
}

fn not_found() -> AppError {
    AppError::NotFound("Notification template not found".to_string())
}

fn duplicate(event_code: &str) -> AppError {
    AppError::Conflict(format!("Template for {} already exists", event_code))
}

pub struct ListTemplatesUseCase {
    repo: Arc<dyn NotificationTemplateRepository>,
}

impl ListTemplatesUseCase {
    pub fn new(repo: Arc<dyn NotificationTemplateRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> Result<Vec<NotificationTemplate>, AppError> {
        Ok(self.repo.find_all().await?)
    }
}

pub struct CreateTemplateUseCase {
    repo: Arc<dyn NotificationTemplateRepository>,
}

impl CreateTemplateUseCase {
    pub fn new(repo: Arc<dyn NotificationTemplateRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip(self, req), fields(event_code = %req.event_code))]
    pub async fn execute(&self, req: CreateTemplateRequest) -> Result<NotificationTemplate, AppError> {
        if self.repo.find_by_event(&req.event_code).await?.is_some() {
            return Err(duplicate(&req.event_code));
        }

        let event_code = req.event_code.clone();
        self.repo
            .create(NewNotificationTemplate {
                event_code: req.event_code,
                title_template: req.title_template,
                body_template: req.body_template,
                is_active: req.is_active,
            })
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    duplicate(&event_code)
                } else {
                    AppError::InternalServerError(e)
                }
            })
    }
}

pub struct GetTemplateUseCase {
    repo: Arc<dyn NotificationTemplateRepository>,
}

impl GetTemplateUseCase {
    pub fn new(repo: Arc<dyn NotificationTemplateRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: Uuid) -> Result<NotificationTemplate, AppError> {
        self.repo.find_by_id(id).await?.ok_or_else(not_found)
    }
}

pub struct UpdateTemplateUseCase {
    repo: Arc<dyn NotificationTemplateRepository>,
}

impl UpdateTemplateUseCase {
    pub fn new(repo: Arc<dyn NotificationTemplateRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip(self, req))]
    pub async fn execute(
        &self,
        id: Uuid,
        req: UpdateTemplateRequest,
    ) -> Result<NotificationTemplate, AppError> {
        self.repo
            .update(
                id,
                UpdateNotificationTemplate {
                    title_template: req.title_template,
                    body_template: req.body_template,
                    is_active: req.is_active,
                },
            )
            .await?
            .ok_or_else(not_found)
    }
}
