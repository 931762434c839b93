use crate::domain::departments::{Department, DepartmentRepository};
use crate::shared::error::AppError;
use std::sync::Arc;
use uuid::Uuid;

pub struct GetDepartmentUseCase {
    repo: Arc<dyn DepartmentRepository>,
}

impl GetDepartmentUseCase {
    pub fn new(repo: Arc<dyn DepartmentRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: Uuid) -> Result<Department, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Department not found".to_string()))
    }
}
