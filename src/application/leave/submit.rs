use crate::application::leave::notify_requester;
use crate::application::notifications::dispatch::NotificationDispatcher;
use crate::application::notifications::events;
use crate::application::users::active_user;
use crate::domain::leave::{LeaveRequest, LeaveRequestRepository, LeaveType, NewLeaveRequest};
use crate::domain::users::UserRepository;
use crate::shared::error::AppError;
use crate::shared::query::parse_date;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubmitLeaveRequest {
    pub leave_type: LeaveType,
    #[schema(example = "2025-03-10")]
    pub start_date: String,
    #[schema(example = "2025-03-12")]
    pub end_date: String,
    #[validate(length(min = 1, max = 1000, message = "Reason must be between 1 and 1000 characters"))]
    pub reason: String,
}

pub struct SubmitLeaveUseCase {
    leave_repo: Arc<dyn LeaveRequestRepository>,
    user_repo: Arc<dyn UserRepository>,
    dispatcher: NotificationDispatcher,
}

impl SubmitLeaveUseCase {
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
        user_id: Uuid,
        req: SubmitLeaveRequest,
    ) -> Result<LeaveRequest, AppError> {
        let start_date = parse_date("start_date", &req.start_date)?;
        let end_date = parse_date("end_date", &req.end_date)?;
        if end_date < start_date {
            return Err(AppError::ValidationError(
                "end_date must not be before start_date".to_string(),
            ));
        }

        let reason = req.reason.trim().to_string();
        if reason.is_empty() {
            return Err(AppError::ValidationError("Reason is required".to_string()));
        }

        let requester = active_user(&self.user_repo, user_id).await?;

        let overlapping = self
            .leave_repo
            .find_overlapping(user_id, start_date, end_date)
            .await?;
        if !overlapping.is_empty() {
            return Err(AppError::Conflict(
                "Leave request overlaps an existing pending or approved request".to_string(),
            ));
        }

        let request = self
            .leave_repo
            .create(NewLeaveRequest {
                user_id,
                leave_type: req.leave_type,
                start_date,
                end_date,
                reason,
            })
            .await?;

        tracing::info!(leave_id = %request.id, days = request.days(), "Leave request submitted");
        notify_requester(
            &self.dispatcher,
            events::LEAVE_SUBMITTED,
            &request,
            Some(&requester),
        )
        .await;

        Ok(request)
    }
}
