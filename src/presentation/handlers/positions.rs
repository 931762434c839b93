use crate::application::positions::{
    CreatePositionRequest, CreatePositionUseCase, DeletePositionUseCase, GetPositionUseCase,
    ListPositionsRequest, ListPositionsUseCase, UpdatePositionRequest, UpdatePositionUseCase,
};
use crate::infrastructure::db::DbPool;
use crate::infrastructure::repositories::positions::PostgresPositionRepository;
use crate::presentation::dtos::{PositionResource, paginated};
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

fn repo(pool: DbPool) -> Arc<PostgresPositionRepository> {
    Arc::new(PostgresPositionRepository::new(pool))
}

#[utoipa::path(
    post,
    path = "/api/positions",
    request_body = CreatePositionRequest,
    responses(
        (status = 201, description = "Position created", body = ApiResponse<PositionResource>),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "positions",
    security(("bearer_auth" = []))
)]
pub async fn create_position(
    State(pool): State<DbPool>,
    ValidatedJson(req): ValidatedJson<CreatePositionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let position = CreatePositionUseCase::new(repo(pool)).execute(req).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            "Position created",
            PositionResource::from(position),
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/positions",
    params(
        ("page[number]" = Option<i64>, Query, description = "Page number, starts at 1"),
        ("page[size]" = Option<i64>, Query, description = "Page size, at most 100"),
        ("filter[search]" = Option<String>, Query, description = "Name contains"),
        ("filter[department_id]" = Option<Uuid>, Query, description = "Department")
    ),
    responses(
        (status = 200, description = "Positions", body = ApiResponse<Vec<PositionResource>>)
    ),
    tag = "positions",
    security(("bearer_auth" = []))
)]
pub async fn list_positions(
    State(pool): State<DbPool>,
    uri: Uri,
    Qs(req): Qs<ListPositionsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let result = ListPositionsUseCase::new(repo(pool)).execute(req).await?;

    Ok(Json(paginated::<_, PositionResource>(
        "Positions",
        &uri,
        result,
    )))
}

#[utoipa::path(
    get,
    path = "/api/positions/{id}",
    params(("id" = Uuid, Path, description = "Position ID")),
    responses(
        (status = 200, description = "Position found", body = ApiResponse<PositionResource>),
        (status = 404, description = "Position not found", body = ErrorResponse)
    ),
    tag = "positions",
    security(("bearer_auth" = []))
)]
pub async fn get_position(
    State(pool): State<DbPool>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let position = GetPositionUseCase::new(repo(pool)).execute(id).await?;

    Ok(Json(ApiResponse::new(
        "Position found",
        PositionResource::from(position),
    )))
}

#[utoipa::path(
    put,
    path = "/api/positions/{id}",
    params(("id" = Uuid, Path, description = "Position ID")),
    request_body = UpdatePositionRequest,
    responses(
        (status = 200, description = "Position updated", body = ApiResponse<PositionResource>),
        (status = 404, description = "Position not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "positions",
    security(("bearer_auth" = []))
)]
pub async fn update_position(
    State(pool): State<DbPool>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdatePositionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let position = UpdatePositionUseCase::new(repo(pool))
        .execute(id, req)
        .await?;

    Ok(Json(ApiResponse::new(
        "Position updated",
        PositionResource::from(position),
    )))
}

#[utoipa::path(
    delete,
    path = "/api/positions/{id}",
    params(("id" = Uuid, Path, description = "Position ID")),
    responses(
        (status = 200, description = "Position deleted", body = MessageResponse),
        (status = 404, description = "Position not found", body = ErrorResponse)
    ),
    tag = "positions",
    security(("bearer_auth" = []))
)]
pub async fn delete_position(
    State(pool): State<DbPool>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    DeletePositionUseCase::new(repo(pool)).execute(id).await?;

    Ok(Json(MessageResponse::new("Position deleted")))
}
