use crate::domain::users::{User, UserFilter, UserRepository, UserRole};
use crate::shared::error::AppError;
use crate::shared::pagination::{PageParams, Paginated};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// `filter[...]` query parameters of the employee listing
#[derive(Debug, Default, Deserialize)]
pub struct UserFilterParams {
    pub department_id: Option<Uuid>,
    pub role: Option<UserRole>,
    pub search: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListUsersRequest {
    #[serde(default)]
    pub page: PageParams,
    #[serde(default)]
    pub filter: UserFilterParams,
}

pub struct ListUsersUseCase {
    repo: Arc<dyn UserRepository>,
}

impl ListUsersUseCase {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, req: ListUsersRequest) -> Result<Paginated<User>, AppError> {
        let page = req.page.normalized();
        let filter = UserFilter {
            department_id: req.filter.department_id,
            role: req.filter.role,
            search: req.filter.search.map(|s| s.trim().to_string()),
            active: req.filter.active,
        };

        let (items, total) = futures::try_join!(
            self.repo.find_all(&filter, page.limit(), page.offset()),
            self.repo.count(&filter),
        )?;

        Ok(Paginated { items, total, page })
    }
}
