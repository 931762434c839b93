//! Job positions, optionally scoped to a department

use crate::domain::positions::{NewPosition, Position, PositionRepository, UpdatePosition};
use crate::infrastructure::db::is_foreign_key_violation;
use crate::shared::error::AppError;
use crate::shared::pagination::{PageParams, Paginated};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePositionRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    #[schema(example = "Software Engineer")]
    pub name: String,
    pub department_id: Option<Uuid>,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdatePositionRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: Option<String>,
    pub department_id: Option<Uuid>,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PositionFilterParams {
    pub search: Option<String>,
    pub department_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListPositionsRequest {
    #[serde(default)]
    pub page: PageParams,
    #[serde(default)]
    pub filter: PositionFilterParams,
}

fn department_error(e: anyhow::Error) -> AppError {
    if is_foreign_key_violation(&e) {
        AppError::ValidationError("Department does not exist".to_string())
    } else {
        AppError::InternalServerError(e)
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Position not found".to_string())
}

pub struct CreatePositionUseCase {
    repo: Arc<dyn PositionRepository>,
}

impl CreatePositionUseCase {
    pub fn new(repo: Arc<dyn PositionRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip(self, req))]
    pub async fn execute(&self, req: CreatePositionRequest) -> Result<Position, AppError> {
        self.repo
            .create(NewPosition {
                name: req.name.trim().to_string(),
                department_id: req.department_id,
                description: req.description,
            })
            .await
            .map_err(department_error)
    }
}

pub struct ListPositionsUseCase {
    repo: Arc<dyn PositionRepository>,
}

impl ListPositionsUseCase {
    pub fn new(repo: Arc<dyn PositionRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, req: ListPositionsRequest) -> Result<Paginated<Position>, AppError> {
        let page = req.page.normalized();
        let search = req
            .filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        let department_id = req.filter.department_id;

        let (items, total) = futures::try_join!(
            self.repo
                .find_all(search, department_id, page.limit(), page.offset()),
            self.repo.count(search, department_id),
        )?;

        Ok(Paginated { items, total, page })
    }
}

pub struct GetPositionUseCase {
    repo: Arc<dyn PositionRepository>,
}

impl GetPositionUseCase {
    pub fn new(repo: Arc<dyn PositionRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: Uuid) -> Result<Position, AppError> {
        self.repo.find_by_id(id).await?.ok_or_else(not_found)
    }
}

pub struct UpdatePositionUseCase {
    repo: Arc<dyn PositionRepository>,
}

impl UpdatePositionUseCase {
    pub fn new(repo: Arc<dyn PositionRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip(self, req))]
    pub async fn execute(&self, id: Uuid, req: UpdatePositionRequest) -> Result<Position, AppError> {
        self.repo
            .update(
                id,
                UpdatePosition {
                    name: req.name.map(|n| n.trim().to_string()),
                    department_id: req.department_id,
                    description: req.description,
                },
            )
            .await
            .map_err(department_error)?
            .ok_or_else(not_found)
    }
}

pub struct DeletePositionUseCase {
    repo: Arc<dyn PositionRepository>,
}

impl DeletePositionUseCase {
    pub fn new(repo: Arc<dyn PositionRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(not_found());
        }
        Ok(())
    }
}
