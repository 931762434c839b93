use crate::domain::leave::{LeaveFilter, LeaveRequest, LeaveRequestRepository, LeaveStatus};
use crate::shared::error::AppError;
use crate::shared::pagination::{PageParams, Paginated};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
pub struct LeaveFilterParams {
    pub status: Option<LeaveStatus>,
    pub user_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListLeaveRequest {
    #[serde(default)]
    pub page: PageParams,
    #[serde(default)]
    pub filter: LeaveFilterParams,
}

pub struct ListLeaveUseCase {
    leave_repo: Arc<dyn LeaveRequestRepository>,
}

impl ListLeaveUseCase {
    pub fn new(leave_repo: Arc<dyn LeaveRequestRepository>) -> Self {
        Self { leave_repo }
    }

    /// Requests of a single user; only the status filter applies
    pub async fn own(
        &self,
        user_id: Uuid,
        req: ListLeaveRequest,
    ) -> Result<Paginated<LeaveRequest>, AppError> {
        let filter = LeaveFilter {
            user_id: Some(user_id),
            department_id: None,
            status: req.filter.status,
        };
        self.run(req.page, filter).await
    }

    pub async fn all(&self, req: ListLeaveRequest) -> Result<Paginated<LeaveRequest>, AppError> {
        let filter = LeaveFilter {
            user_id: req.filter.user_id,
            department_id: req.filter.department_id,
            status: req.filter.status,
        };
        self.run(req.page, filter).await
    }

    #[tracing::instrument(skip(self))]
    async fn run(
        &self,
        page: PageParams,
        filter: LeaveFilter,
    ) -> Result<Paginated<LeaveRequest>, AppError> {
        let page = page.normalized();
        let (items, total) = futures::try_join!(
            self.leave_repo.find_all(&filter, page.limit(), page.offset()),
            self.leave_repo.count(&filter),
        )?;

        Ok(Paginated { items, total, page })
    }
}
