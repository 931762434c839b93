use crate::application::departments::create::{normalize_code, validate_department_code};
use crate::domain::departments::{Department, DepartmentRepository, UpdateDepartment};
use crate::infrastructure::db::is_unique_violation;
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateDepartmentRequest {
    #[validate(
        length(min = 1, max = 32, message = "Code must be between 1 and 32 characters"),
        custom(function = "validate_department_code")
    )]
    pub code: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
}

pub struct UpdateDepartmentUseCase {
    repo: Arc<dyn DepartmentRepository>,
}

impl UpdateDepartmentUseCase {
    pub fn new(repo: Arc<dyn DepartmentRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip(self, req))]
    pub async fn execute(
        &self,
        id: Uuid,
        req: UpdateDepartmentRequest,
    ) -> Result<Department, AppError> {
        let code = req.code.as_deref().map(normalize_code);

        if let Some(code) = &code {
            let taken = self
                .repo
                .find_by_code(code)
                .await?
                .is_some_and(|other| other.id != id);
            if taken {
                return Err(AppError::Conflict(
                    "Department code already exists".to_string(),
                ));
            }
        }

        let update = UpdateDepartment {
            code,
            name: req.name.map(|n| n.trim().to_string()),
            description: req.description,
        };

        self.repo
            .update(id, update)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::Conflict("Department code already exists".to_string())
                } else {
                    AppError::InternalServerError(e)
                }
            })?
            .ok_or_else(|| AppError::NotFound("Department not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::departments::NewDepartment;
    use crate::infrastructure::repositories::mock::MockDepartmentRepository;

    async fn seed(repo: &MockDepartmentRepository, code: &str) -> Department {
        repo.create(NewDepartment {
            code: code.to_string(),
            name: format!("{} department", code),
            description: None,
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_update_department() {
        let repo = MockDepartmentRepository::new();
        let department = seed(&repo, "OPS").await;
        let use_case = UpdateDepartmentUseCase::new(Arc::new(repo));

        let updated = use_case
            .execute(
                department.id,
                UpdateDepartmentRequest {
                    name: Some("Operations".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.code, "OPS");
        assert_eq!(updated.name, "Operations");
    }

    #[tokio::test]
    async fn test_update_department_code_conflict() {
        let repo = MockDepartmentRepository::new();
        let ops = seed(&repo, "OPS").await;
        seed(&repo, "FIN").await;
        let use_case = UpdateDepartmentUseCase::new(Arc::new(repo));

        let result = use_case
            .execute(
                ops.id,
                UpdateDepartmentRequest {
                    code: Some("fin".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_missing_department() {
        let use_case = UpdateDepartmentUseCase::new(Arc::new(MockDepartmentRepository::new()));
        let result = use_case
            .execute(Uuid::new_v4(), UpdateDepartmentRequest::default())
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
