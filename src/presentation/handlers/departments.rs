use crate::application::departments::create::{CreateDepartmentRequest, CreateDepartmentUseCase};
use crate::application::departments::delete::DeleteDepartmentUseCase;
use crate::application::departments::get::GetDepartmentUseCase;
use crate::application::departments::list::{ListDepartmentsRequest, ListDepartmentsUseCase};
use crate::application::departments::update::{UpdateDepartmentRequest, UpdateDepartmentUseCase};
use crate::infrastructure::db::DbPool;
use crate::infrastructure::repositories::departments::PostgresDepartmentRepository;
use crate::presentation::dtos::{DepartmentResource, paginated};
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

fn repo(pool: DbPool) -> Arc<PostgresDepartmentRepository> {
    Arc::new(PostgresDepartmentRepository::new(pool))
}

#[utoipa::path(
    post,
    path = "/api/departements",
    request_body = CreateDepartmentRequest,
    responses(
        (status = 201, description = "Department created", body = ApiResponse<DepartmentResource>),
        (status = 409, description = "Code already exists", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "departments",
    security(("bearer_auth" = []))
)]
pub async fn create_department(
    State(pool): State<DbPool>,
    ValidatedJson(req): ValidatedJson<CreateDepartmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let department = CreateDepartmentUseCase::new(repo(pool)).execute(req).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            "Department created",
            DepartmentResource::from(department),
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/departements",
    params(
        ("page[number]" = Option<i64>, Query, description = "Page number, starts at 1"),
        ("page[size]" = Option<i64>, Query, description = "Page size, at most 100"),
        ("filter[search]" = Option<String>, Query, description = "Code or name contains")
    ),
    responses(
        (status = 200, description = "Departments", body = ApiResponse<Vec<DepartmentResource>>)
    ),
    tag = "departments",
    security(("bearer_auth" = []))
)]
pub async fn list_departments(
    State(pool): State<DbPool>,
    uri: Uri,
    Qs(req): Qs<ListDepartmentsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let result = ListDepartmentsUseCase::new(repo(pool)).execute(req).await?;

    Ok(Json(paginated::<_, DepartmentResource>(
        "Departments",
        &uri,
        result,
    )))
}

#[utoipa::path(
    get,
    path = "/api/departements/{id}",
    params(("id" = Uuid, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department found", body = ApiResponse<DepartmentResource>),
        (status = 404, description = "Department not found", body = ErrorResponse)
    ),
    tag = "departments",
    security(("bearer_auth" = []))
)]
pub async fn get_department(
    State(pool): State<DbPool>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let department = GetDepartmentUseCase::new(repo(pool)).execute(id).await?;

    Ok(Json(ApiResponse::new(
        "Department found",
        DepartmentResource::from(department),
    )))
}

#[utoipa::path(
    put,
    path = "/api/departements/{id}",
    params(("id" = Uuid, Path, description = "Department ID")),
    request_body = UpdateDepartmentRequest,
    responses(
        (status = 200, description = "Department updated", body = ApiResponse<DepartmentResource>),
        (status = 404, description = "Department not found", body = ErrorResponse),
        (status = 409, description = "Code already exists", body = ErrorResponse)
    ),
    tag = "departments",
    security(("bearer_auth" = []))
)]
pub async fn update_department(
    State(pool): State<DbPool>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateDepartmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let department = UpdateDepartmentUseCase::new(repo(pool))
        .execute(id, req)
        .await?;

    Ok(Json(ApiResponse::new(
        "Department updated",
        DepartmentResource::from(department),
    )))
}

#[utoipa::path(
    delete,
    path = "/api/departements/{id}",
    params(("id" = Uuid, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department deleted", body = MessageResponse),
        (status = 404, description = "Department not found", body = ErrorResponse)
    ),
    tag = "departments",
    security(("bearer_auth" = []))
)]
pub async fn delete_department(
    State(pool): State<DbPool>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    DeleteDepartmentUseCase::new(repo(pool)).execute(id).await?;

    Ok(Json(MessageResponse::new("Department deleted")))
}
