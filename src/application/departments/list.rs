use crate::domain::departments::{Department, DepartmentRepository};
use crate::shared::error::AppError;
use crate::shared::pagination::Paginated;
use crate::shared::query::SearchListParams;
use std::sync::Arc;

pub type ListDepartmentsRequest = SearchListParams;

pub struct ListDepartmentsUseCase {
    repo: Arc<dyn DepartmentRepository>,
}

impl ListDepartmentsUseCase {
    pub fn new(repo: Arc<dyn DepartmentRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(
        &self,
        req: ListDepartmentsRequest,
    ) -> Result<Paginated<Department>, AppError> {
        let page = req.page.normalized();
        let search = req.filter.term();

        let (items, total) = futures::try_join!(
            self.repo.find_all(search, page.limit(), page.offset()),
            self.repo.count(search),
        )?;

        Ok(Paginated { items, total, page })
    }
}
