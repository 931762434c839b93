use crate::application::attendance::check_in::{AttendanceRequest, CheckInUseCase};
use crate::application::attendance::check_out::CheckOutUseCase;
use crate::application::attendance::history::{AttendanceHistoryRequest, AttendanceHistoryUseCase};
use crate::application::attendance::list::{ListAttendanceRequest, ListAttendanceUseCase};
use crate::infrastructure::repositories::attendance::PostgresAttendanceRepository;
use crate::infrastructure::repositories::locations::PostgresLocationRepository;
use crate::infrastructure::repositories::shifts::PostgresShiftRepository;
use crate::infrastructure::repositories::users::PostgresUserRepository;
use crate::infrastructure::state::AppState;
use crate::presentation::dtos::{AttendanceResource, paginated};
use crate::presentation::extractors::AuthUser;
use crate::shared::error::{AppError, ErrorResponse};
use crate::shared::query::Qs;
use crate::shared::response::ApiResponse;
use crate::shared::validation::ValidatedJson;
use axum::{
    Json,
    extract::State,
    http::{StatusCode, Uri},
    response::IntoResponse,
};
use std::sync::Arc;

/// Record today's check-in. Requires coordinates when a work location is assigned.
#[utoipa::path(
    post,
    path = "/api/attendance/check-in",
    request_body = AttendanceRequest,
    responses(
        (status = 201, description = "Checked in", body = ApiResponse<AttendanceResource>),
        (status = 403, description = "Account inactive", body = ErrorResponse),
        (status = 409, description = "Already checked in today", body = ErrorResponse),
        (status = 422, description = "Outside the geofence or missing coordinates", body = ErrorResponse)
    ),
    tag = "attendance",
    security(("bearer_auth" = []))
)]
pub async fn check_in(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(req): ValidatedJson<AttendanceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let use_case = CheckInUseCase::new(
        Arc::new(PostgresUserRepository::new(state.pool.clone())),
        Arc::new(PostgresLocationRepository::new(state.pool.clone())),
        Arc::new(PostgresShiftRepository::new(state.pool.clone())),
        Arc::new(PostgresAttendanceRepository::new(state.pool)),
        state.utc_offset,
    );

    let attendance = use_case.execute(auth_user.user_id, req).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            "Checked in",
            AttendanceResource::from(attendance),
        )),
    ))
}

#[utoipa::path(
    post,
    path = "/api/attendance/check-out",
    request_body = AttendanceRequest,
    responses(
        (status = 200, description = "Checked out", body = ApiResponse<AttendanceResource>),
        (status = 404, description = "No check-in today", body = ErrorResponse),
        (status = 409, description = "Already checked out", body = ErrorResponse),
        (status = 422, description = "Outside the geofence or missing coordinates", body = ErrorResponse)
    ),
    tag = "attendance",
    security(("bearer_auth" = []))
)]
pub async fn check_out(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(req): ValidatedJson<AttendanceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let use_case = CheckOutUseCase::new(
        Arc::new(PostgresUserRepository::new(state.pool.clone())),
        Arc::new(PostgresLocationRepository::new(state.pool.clone())),
        Arc::new(PostgresAttendanceRepository::new(state.pool)),
        state.utc_offset,
    );

    let attendance = use_case.execute(auth_user.user_id, req).await?;

    Ok(Json(ApiResponse::new(
        "Checked out",
        AttendanceResource::from(attendance),
    )))
}

/// The caller's attendance history, newest first
#[utoipa::path(
    get,
    path = "/api/attendance/me",
    params(
        ("page[number]" = Option<i64>, Query, description = "Page number, starts at 1"),
        ("page[size]" = Option<i64>, Query, description = "Page size, at most 100")
    ),
    responses(
        (status = 200, description = "Attendance history", body = ApiResponse<Vec<AttendanceResource>>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "attendance",
    security(("bearer_auth" = []))
)]
pub async fn my_attendance(
    State(state): State<AppState>,
    auth_user: AuthUser,
    uri: Uri,
    Qs(req): Qs<AttendanceHistoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    let use_case =
        AttendanceHistoryUseCase::new(Arc::new(PostgresAttendanceRepository::new(state.pool)));
    let result = use_case.execute(auth_user.user_id, req).await?;

    Ok(Json(paginated::<_, AttendanceResource>(
        "Attendance history",
        &uri,
        result,
    )))
}

/// Attendance report across employees
#[utoipa::path(
    get,
    path = "/api/admin/absensi",
    params(
        ("page[number]" = Option<i64>, Query, description = "Page number, starts at 1"),
        ("page[size]" = Option<i64>, Query, description = "Page size, at most 100"),
        ("filter[date_from]" = Option<String>, Query, description = "YYYY-MM-DD, inclusive"),
        ("filter[date_to]" = Option<String>, Query, description = "YYYY-MM-DD, inclusive"),
        ("filter[user_id]" = Option<uuid::Uuid>, Query, description = "Employee"),
        ("filter[department_id]" = Option<uuid::Uuid>, Query, description = "Department"),
        ("filter[status]" = Option<String>, Query, description = "present or late")
    ),
    responses(
        (status = 200, description = "Attendance records", body = ApiResponse<Vec<AttendanceResource>>),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 422, description = "Invalid date range", body = ErrorResponse)
    ),
    tag = "attendance",
    security(("bearer_auth" = []))
)]
pub async fn list_attendance(
    State(state): State<AppState>,
    uri: Uri,
    Qs(req): Qs<ListAttendanceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let use_case =
        ListAttendanceUseCase::new(Arc::new(PostgresAttendanceRepository::new(state.pool)));
    let result = use_case.execute(req).await?;

    Ok(Json(paginated::<_, AttendanceResource>(
        "Attendance records",
        &uri,
        result,
    )))
}
