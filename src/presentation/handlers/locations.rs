use crate::application::locations::{
    CreateLocationRequest, CreateLocationUseCase, DeleteLocationUseCase, GetLocationUseCase,
    ListLocationsRequest, ListLocationsUseCase, UpdateLocationRequest, UpdateLocationUseCase,
};
use crate::infrastructure::db::DbPool;
use crate::infrastructure::repositories::locations::PostgresLocationRepository;
use crate::presentation::dtos::{LocationResource, paginated};
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

fn repo(pool: DbPool) -> Arc<PostgresLocationRepository> {
    Arc::new(PostgresLocationRepository::new(pool))
}

#[utoipa::path(
    post,
    path = "/api/locations",
    request_body = CreateLocationRequest,
    responses(
        (status = 201, description = "Location created", body = ApiResponse<LocationResource>),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "locations",
    security(("bearer_auth" = []))
)]
pub async fn create_location(
    State(pool): State<DbPool>,
    ValidatedJson(req): ValidatedJson<CreateLocationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let location = CreateLocationUseCase::new(repo(pool)).execute(req).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            "Location created",
            LocationResource::from(location),
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/locations",
    params(
        ("page[number]" = Option<i64>, Query, description = "Page number, starts at 1"),
        ("page[size]" = Option<i64>, Query, description = "Page size, at most 100"),
        ("filter[search]" = Option<String>, Query, description = "Name contains")
    ),
    responses(
        (status = 200, description = "Locations", body = ApiResponse<Vec<LocationResource>>)
    ),
    tag = "locations",
    security(("bearer_auth" = []))
)]
pub async fn list_locations(
    State(pool): State<DbPool>,
    uri: Uri,
    Qs(req): Qs<ListLocationsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let result = ListLocationsUseCase::new(repo(pool)).execute(req).await?;

    Ok(Json(paginated::<_, LocationResource>(
        "Locations",
        &uri,
        result,
    )))
}

#[utoipa::path(
    get,
    path = "/api/locations/{id}",
    params(("id" = Uuid, Path, description = "Location ID")),
    responses(
        (status = 200, description = "Location found", body = ApiResponse<LocationResource>),
        (status = 404, description = "Location not found", body = ErrorResponse)
    ),
    tag = "locations",
    security(("bearer_auth" = []))
)]
pub async fn get_location(
    State(pool): State<DbPool>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let location = GetLocationUseCase::new(repo(pool)).execute(id).await?;

    Ok(Json(ApiResponse::new(
        "Location found",
        LocationResource::from(location),
    )))
}

#[utoipa::path(
    put,
    path = "/api/locations/{id}",
    params(("id" = Uuid, Path, description = "Location ID")),
    request_body = UpdateLocationRequest,
    responses(
        (status = 200, description = "Location updated", body = ApiResponse<LocationResource>),
        (status = 404, description = "Location not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "locations",
    security(("bearer_auth" = []))
)]
pub async fn update_location(
    State(pool): State<DbPool>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateLocationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let location = UpdateLocationUseCase::new(repo(pool))
        .execute(id, req)
        .await?;

    Ok(Json(ApiResponse::new(
        "Location updated",
        LocationResource::from(location),
    )))
}

#[utoipa::path(
    delete,
    path = "/api/locations/{id}",
    params(("id" = Uuid, Path, description = "Location ID")),
    responses(
        (status = 200, description = "Location deleted", body = MessageResponse),
        (status = 404, description = "Location not found", body = ErrorResponse)
    ),
    tag = "locations",
    security(("bearer_auth" = []))
)]
pub async fn delete_location(
    State(pool): State<DbPool>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    DeleteLocationUseCase::new(repo(pool)).execute(id).await?;

    Ok(Json(MessageResponse::new("Location deleted")))
}
