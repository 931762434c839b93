use crate::application::shifts::{
    CreateShiftRequest, CreateShiftUseCase, DeleteShiftUseCase, GetShiftUseCase,
    ListShiftsRequest, ListShiftsUseCase, UpdateShiftRequest, UpdateShiftUseCase,
};
use crate::infrastructure::db::DbPool;
use crate::infrastructure::repositories::shifts::PostgresShiftRepository;
use crate::presentation::dtos::{ShiftResource, paginated};
use crate::shared::error::{AppError, ErrorResponse};
use crate::shared::query::Qs;
use crate::shared::response::{ApiResponse, MessageResponse};
use crate::shared::validation::ValidatedJson;
use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

fn repo(pool: DbPool) -> Arc<PostgresShiftRepository> {
    Arc::new(PostgresShiftRepository::new(pool))
}

#[utoipa::path(
    post,
    path = "/api/shifts",
    request_body = CreateShiftRequest,
    responses(
        (status = 201, description = "Shift created", body = ApiResponse<ShiftResource>),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "shifts",
    security(("bearer_auth" = []))
)]
pub async fn create_shift(
    State(pool): State<DbPool>,
    ValidatedJson(req): ValidatedJson<CreateShiftRequest>,
) -> Result<impl IntoResponse, AppError> {
    let shift = CreateShiftUseCase::new(repo(pool)).execute(req).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            "Shift created",
            ShiftResource::from(shift),
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/shifts",
    params(
        ("page[number]" = Option<i64>, Query, description = "Page number, starts at 1"),
        ("page[size]" = Option<i64>, Query, description = "Page size, at most 100"),
        ("filter[search]" = Option<String>, Query, description = "Name contains")
    ),
    responses(
        (status = 200, description = "Shifts", body = ApiResponse<Vec<ShiftResource>>)
    ),
    tag = "shifts",
    security(("bearer_auth" = []))
)]
pub async fn list_shifts(
    State(pool): State<DbPool>,
    uri: Uri,
    Qs(req): Qs<ListShiftsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let result = ListShiftsUseCase::new(repo(pool)).execute(req).await?;

    Ok(Json(paginated::<_, ShiftResource>(
        "Shifts",
        &uri,
        result,
    )))
}

#[utoipa::path(
    get,
    path = "/api/shifts/{id}",
    params(("id" = Uuid, Path, description = "Shift ID")),
    responses(
        (status = 200, description = "Shift found", body = ApiResponse<ShiftResource>),
        (status = 404, description = "Shift not found", body = ErrorResponse)
    ),
    tag = "shifts",
    security(("bearer_auth" = []))
)]
pub async fn get_shift(
    State(pool): State<DbPool>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let shift = GetShiftUseCase::new(repo(pool)).execute(id).await?;

    Ok(Json(ApiResponse::new(
        "Shift found",
        ShiftResource::from(shift),
    )))
}

#[utoipa::path(
    put,
    path = "/api/shifts/{id}",
    params(("id" = Uuid, Path, description = "Shift ID")),
    request_body = UpdateShiftRequest,
    responses(
        (status = 200, description = "Shift updated", body = ApiResponse<ShiftResource>),
        (status = 404, description = "Shift not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "shifts",
    security(("bearer_auth" = []))
)]
pub async fn update_shift(
    State(pool): State<DbPool>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateShiftRequest>,
) -> Result<impl IntoResponse, AppError> {
    let shift = UpdateShiftUseCase::new(repo(pool))
        .execute(id, req)
        .await?;

    Ok(Json(ApiResponse::new(
        "Shift updated",
        ShiftResource::from(shift),
    )))
}

#[utoipa::path(
    delete,
    path = "/api/shifts/{id}",
    params(("id" = Uuid, Path, description = "Shift ID")),
    responses(
        (status = 200, description = "Shift deleted", body = MessageResponse),
        (status = 404, description = "Shift not found", body = ErrorResponse)
    ),
    tag = "shifts",
    security(("bearer_auth" = []))
)]
pub async fn delete_shift(
    State(pool): State<DbPool>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    DeleteShiftUseCase::new(repo(pool)).execute(id).await?;

    Ok(Json(MessageResponse::new("Shift deleted")))
}
