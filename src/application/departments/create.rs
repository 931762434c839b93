use crate::domain::departments::{Department, DepartmentRepository, NewDepartment};
use crate::infrastructure::db::is_unique_violation;
use crate::shared::error::AppError;
use crate::shared::validation::validate_upper_code;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Codes are stored upper-cased, so `hr` and `HR` collide
pub(crate) fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

pub(crate) fn validate_department_code(code: &str) -> Result<(), ValidationError> {
    validate_upper_code(&normalize_code(code))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDepartmentRequest {
    #[validate(
        length(min = 1, max = 32, message = "Code must be between 1 and 32 characters"),
        custom(function = "validate_department_code")
    )]
    #[schema(example = "HR", max_length = 32)]
    pub code: String,
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    #[schema(example = "Human Resources")]
    pub name: String,
    pub description: Option<String>,
}

impl CreateDepartmentRequest {
    pub async fn validate_unique_code(
        &self,
        repo: &Arc<dyn DepartmentRepository>,
    ) -> Result<(), AppError> {
        if repo
            .find_by_code(&normalize_code(&self.code))
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "Department code already exists".to_string(),
            ));
        }
        Ok(())
    }
}

pub struct CreateDepartmentUseCase {
    repo: Arc<dyn DepartmentRepository>,
}

impl CreateDepartmentUseCase {
    pub fn new(repo: Arc<dyn DepartmentRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip(self, req), fields(code = %req.code))]
    pub async fn execute(&self, req: CreateDepartmentRequest) -> Result<Department, AppError> {
        req.validate_unique_code(&self.repo).await?;

        let new_department = NewDepartment {
            code: normalize_code(&req.code),
            name: req.name.trim().to_string(),
            description: req.description,
        };

        self.repo.create(new_department).await.map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Department code already exists".to_string())
            } else {
                AppError::InternalServerError(e)
            }
        })
    }
}
