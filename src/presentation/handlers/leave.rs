use crate::application::leave::cancel::CancelLeaveUseCase;
use crate::application::leave::list::{ListLeaveRequest, ListLeaveUseCase};
use crate::application::leave::review::{LeaveDecision, ReviewLeaveRequest, ReviewLeaveUseCase};
use crate::application::leave::submit::{SubmitLeaveRequest, SubmitLeaveUseCase};
use crate::infrastructure::repositories::leave::PostgresLeaveRequestRepository;
use crate::infrastructure::repositories::users::PostgresUserRepository;
use crate::infrastructure::state::AppState;
use crate::presentation::dtos::{LeaveResource, paginated};
use crate::presentation::extractors::AuthUser;
use crate::presentation::handlers::notifications::dispatcher;
use crate::shared::error::{AppError, ErrorResponse};
use crate::shared::query::Qs;
use crate::shared::response::ApiResponse;
use crate::shared::validation::ValidatedJson;
use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

fn leave_repo(state: &AppState) -> Arc<PostgresLeaveRequestRepository> {
    Arc::new(PostgresLeaveRequestRepository::new(state.pool.clone()))
}

/// Submit a leave request for the caller
#[utoipa::path(
    post,
    path = "/api/leave",
    request_body = SubmitLeaveRequest,
    responses(
        (status = 201, description = "Leave request submitted", body = ApiResponse<LeaveResource>),
        (status = 409, description = "Overlaps an existing request", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "leave",
    security(("bearer_auth" = []))
)]
pub async fn submit_leave(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(req): ValidatedJson<SubmitLeaveRequest>,
) -> Result<impl IntoResponse, AppError> {
    let use_case = SubmitLeaveUseCase::new(
        leave_repo(&state),
        Arc::new(PostgresUserRepository::new(state.pool.clone())),
        dispatcher(&state),
    );
    let request = use_case.execute(auth_user.user_id, req).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            "Leave request submitted",
            LeaveResource::from(request),
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/leave",
    params(
        ("page[number]" = Option<i64>, Query, description = "Page number, starts at 1"),
        ("page[size]" = Option<i64>, Query, description = "Page size, at most 100"),
        ("filter[status]" = Option<String>, Query, description = "pending, approved, rejected or cancelled")
    ),
    responses(
        (status = 200, description = "Own leave requests", body = ApiResponse<Vec<LeaveResource>>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "leave",
    security(("bearer_auth" = []))
)]
pub async fn my_leave(
    State(state): State<AppState>,
    auth_user: AuthUser,
    uri: Uri,
    Qs(req): Qs<ListLeaveRequest>,
) -> Result<impl IntoResponse, AppError> {
    let result = ListLeaveUseCase::new(leave_repo(&state))
        .own(auth_user.user_id, req)
        .await?;

    Ok(Json(paginated::<_, LeaveResource>(
        "Leave requests",
        &uri,
        result,
    )))
}

#[utoipa::path(
    post,
    path = "/api/leave/{id}/cancel",
    params(("id" = Uuid, Path, description = "Leave request ID")),
    responses(
        (status = 200, description = "Leave request cancelled", body = ApiResponse<LeaveResource>),
        (status = 403, description = "Not the requester", body = ErrorResponse),
        (status = 404, description = "Leave request not found", body = ErrorResponse),
        (status = 409, description = "Not pending", body = ErrorResponse)
    ),
    tag = "leave",
    security(("bearer_auth" = []))
)]
pub async fn cancel_leave(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let request = CancelLeaveUseCase::new(leave_repo(&state))
        .execute(auth_user.user_id, id)
        .await?;

    Ok(Json(ApiResponse::new(
        "Leave request cancelled",
        LeaveResource::from(request),
    )))
}

#[utoipa::path(
    get,
    path = "/api/admin/leave",
    params(
        ("page[number]" = Option<i64>, Query, description = "Page number, starts at 1"),
        ("page[size]" = Option<i64>, Query, description = "Page size, at most 100"),
        ("filter[status]" = Option<String>, Query, description = "pending, approved, rejected or cancelled"),
        ("filter[user_id]" = Option<Uuid>, Query, description = "Requester"),
        ("filter[department_id]" = Option<Uuid>, Query, description = "Requester's department")
    ),
    responses(
        (status = 200, description = "Leave requests", body = ApiResponse<Vec<LeaveResource>>),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    tag = "leave",
    security(("bearer_auth" = []))
)]
pub async fn list_leave(
    State(state): State<AppState>,
    uri: Uri,
    Qs(req): Qs<ListLeaveRequest>,
) -> Result<impl IntoResponse, AppError> {
    let result = ListLeaveUseCase::new(leave_repo(&state)).all(req).await?;

    Ok(Json(paginated::<_, LeaveResource>(
        "Leave requests",
        &uri,
        result,
    )))
}

async fn review(
    state: AppState,
    reviewer_id: Uuid,
    id: Uuid,
    decision: LeaveDecision,
    req: ReviewLeaveRequest,
) -> Result<LeaveResource, AppError> {
    let use_case = ReviewLeaveUseCase::new(
        leave_repo(&state),
        Arc::new(PostgresUserRepository::new(state.pool.clone())),
        dispatcher(&state),
    );

    let request = use_case.execute(reviewer_id, id, decision, req).await?;
    Ok(LeaveResource::from(request))
}

#[utoipa::path(
    post,
    path = "/api/admin/leave/{id}/approve",
    params(("id" = Uuid, Path, description = "Leave request ID")),
    request_body = ReviewLeaveRequest,
    responses(
        (status = 200, description = "Leave request approved", body = ApiResponse<LeaveResource>),
        (status = 403, description = "Own request or not a reviewer", body = ErrorResponse),
        (status = 404, description = "Leave request not found", body = ErrorResponse),
        (status = 409, description = "Already reviewed", body = ErrorResponse)
    ),
    tag = "leave",
    security(("bearer_auth" = []))
)]
pub async fn approve_leave(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<ReviewLeaveRequest>,
) -> Result<impl IntoResponse, AppError> {
    let resource = review(state, auth_user.user_id, id, LeaveDecision::Approve, req).await?;

    Ok(Json(ApiResponse::new("Leave request approved", resource)))
}

#[utoipa::path(
    post,
    path = "/api/admin/leave/{id}/reject",
    params(("id" = Uuid, Path, description = "Leave request ID")),
    request_body = ReviewLeaveRequest,
    responses(
        (status = 200, description = "Leave request rejected", body = ApiResponse<LeaveResource>),
        (status = 403, description = "Own request or not a reviewer", body = ErrorResponse),
        (status = 404, description = "Leave request not found", body = ErrorResponse),
        (status = 409, description = "Already reviewed", body = ErrorResponse)
    ),
    tag = "leave",
    security(("bearer_auth" = []))
)]
pub async fn reject_leave(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<ReviewLeaveRequest>,
) -> Result<impl IntoResponse, AppError> {
    let resource = review(state, auth_user.user_id, id, LeaveDecision::Reject, req).await?;

    Ok(Json(ApiResponse::new("Leave request rejected", resource)))
}
