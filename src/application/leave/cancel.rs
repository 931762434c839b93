use crate::domain::leave::{LeaveRequest, LeaveRequestRepository, LeaveStatus, LeaveStatusChange};
use crate::shared::error::AppError;
use std::sync::Arc;
use uuid::Uuid;

pub struct CancelLeaveUseCase {
    leave_repo: Arc<dyn LeaveRequestRepository>,
}

impl CancelLeaveUseCase {
    pub fn new(leave_repo: Arc<dyn LeaveRequestRepository>) -> Self {
        Self { leave_repo }
    }

    /// Only the requester may cancel, and only while pending
    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, user_id: Uuid, id: Uuid) -> Result<LeaveRequest, AppError> {
        let request = self
            .leave_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Leave request not found".to_string()))?;

        if request.user_id != user_id {
            return Err(AppError::Forbidden(
                "Only the requester can cancel this leave request".to_string(),
            ));
        }
        if !request.status.can_transition_to(LeaveStatus::Cancelled) {
            return Err(AppError::Conflict(format!(
                "Leave request is already {}",
                request.status
            )));
        }

        self.leave_repo
            .transition_from_pending(
                id,
                LeaveStatusChange {
                    status: LeaveStatus::Cancelled,
                    reviewed_by: None,
                    review_note: None,
                },
            )
            .await?
            .ok_or_else(|| AppError::Conflict("Leave request is no longer pending".to_string()))
    }
}
