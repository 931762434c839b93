use crate::application::leave::notify_requester;
use crate::application::notifications::dispatch::NotificationDispatcher;
use crate::application::notifications::events;
use crate::domain::leave::{LeaveRequest, LeaveRequestRepository, LeaveStatus, LeaveStatusChange};
use crate::domain::users::UserRepository;
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveDecision {
    Approve,
    Reject,
}

impl LeaveDecision {
    fn status(self) -> LeaveStatus {
        match self {
            LeaveDecision::Approve => LeaveStatus::Approved,
            LeaveDecision::Reject => LeaveStatus::Rejected,
        }
    }

    fn event_code(self) -> &'static str {
        match self {
            LeaveDecision::Approve => events::LEAVE_APPROVED,
            LeaveDecision::Reject => events::LEAVE_REJECTED,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct ReviewLeaveRequest {
    #[validate(length(max = 1000, message = "Note must be at most 1000 characters"))]
    pub note: Option<String>,
}

pub struct ReviewLeaveUseCase {
    leave_repo: Arc<dyn LeaveRequestRepository>,
    user_repo: Arc<dyn UserRepository>,
    dispatcher: NotificationDispatcher,
}

impl ReviewLeaveUseCase {
    pub fn new(
        leave_repo: Arc<dyn LeaveRequestRepository>,
        user_repo: Arc<dyn UserRepository>,
        dispatcher: NotificationDispatcher,
    ) -> Self {
        Self {
            leave_repo,
            user_repo,
            dispatcher,
        }
    }

    #[tracing::instrument(skip(self, req))]
    pub async fn execute(
        &self,
        reviewer_id: Uuid,
        id: Uuid,
        decision: LeaveDecision,
        req: ReviewLeaveRequest,
    ) -> Result<LeaveRequest, AppError> {
        let request = self
            .leave_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Leave request not found".to_string()))?;

        if request.user_id == reviewer_id {
            return Err(AppError::Forbidden(
                "You cannot review your own leave request".to_string(),
            ));
        }
        let next = decision.status();
        if !request.status.can_transition_to(next) {
            return Err(AppError::Conflict(format!(
                "Leave request is already {}",
                request.status
            )));
        }

        // Conditional on status = 'pending', so two reviewers cannot both win
        let reviewed = self
            .leave_repo
            .transition_from_pending(
                id,
                LeaveStatusChange {
                    status: next,
                    reviewed_by: Some(reviewer_id),
                    review_note: req.note.filter(|n| !n.trim().is_empty()),
                },
            )
            .await?
            .ok_or_else(|| AppError::Conflict("Leave request is no longer pending".to_string()))?;

        tracing::info!(leave_id = %reviewed.id, status = %reviewed.status, "Leave request reviewed");

        let requester = match self.user_repo.find_by_id(reviewed.user_id).await {
            Ok(user) => user,
            Err(e) => {
                tracing::error!("Failed to load leave requester: {:?}", e);
                None
            }
        };
        notify_requester(
            &self.dispatcher,
            decision.event_code(),
            &reviewed,
            requester.as_ref(),
        )
        .await;

        Ok(reviewed)
    }
}
