use crate::domain::departments::DepartmentRepository;
use crate::shared::error::AppError;
use std::sync::Arc;
use uuid::Uuid;

pub struct DeleteDepartmentUseCase {
    repo: Arc<dyn DepartmentRepository>,
}

impl DeleteDepartmentUseCase {
    pub fn new(repo: Arc<dyn DepartmentRepository>) -> Self {
        Self { repo }
    }

    /// Members and positions of the department are detached, not deleted
    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound("Department not found".to_string()));
        }
        Ok(())
    }
}
