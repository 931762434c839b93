use crate::application::users::create::{CreateUserRequest, CreateUserUseCase};
use crate::application::users::delete::DeactivateUserUseCase;
use crate::application::users::get::GetUserUseCase;
use crate::application::users::list::{ListUsersRequest, ListUsersUseCase};
use crate::application::users::update::{UpdateUserRequest, UpdateUserUseCase};
use crate::infrastructure::password::PasswordService;
use crate::infrastructure::repositories::refresh_tokens::PostgresRefreshTokenRepository;
use crate::infrastructure::repositories::users::PostgresUserRepository;
use crate::infrastructure::state::AppState;
use crate::presentation::dtos::{UserResource, paginated};
use crate::presentation::extractors::AuthUser;
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

/// Create an employee account
#[utoipa::path(
    post,
    path = "/api/admin/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserResource>),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let repo = Arc::new(PostgresUserRepository::new(state.pool));
    let use_case = CreateUserUseCase::new(repo, Arc::new(PasswordService::new()));

    let user = use_case.execute(req).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("User created", UserResource::from(user))),
    ))
}

/// List employees
#[utoipa::path(
    get,
    path = "/api/admin/users",
    params(
        ("page[number]" = Option<i64>, Query, description = "Page number, starts at 1"),
        ("page[size]" = Option<i64>, Query, description = "Page size, at most 100"),
        ("filter[search]" = Option<String>, Query, description = "Name or email contains"),
        ("filter[department_id]" = Option<Uuid>, Query, description = "Department"),
        ("filter[role]" = Option<String>, Query, description = "admin, hr, manager or employee"),
        ("filter[active]" = Option<bool>, Query, description = "Active flag")
    ),
    responses(
        (status = 200, description = "Users", body = ApiResponse<Vec<UserResource>>),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn list_users(
    State(state): State<AppState>,
    uri: Uri,
    Qs(req): Qs<ListUsersRequest>,
) -> Result<impl IntoResponse, AppError> {
    let use_case = ListUsersUseCase::new(Arc::new(PostgresUserRepository::new(state.pool)));
    let result = use_case.execute(req).await?;

    Ok(Json(paginated::<_, UserResource>("Users", &uri, result)))
}

#[utoipa::path(
    get,
    path = "/api/admin/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = ApiResponse<UserResource>),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let use_case = GetUserUseCase::new(Arc::new(PostgresUserRepository::new(state.pool)));
    let user = use_case.execute(id).await?;

    Ok(Json(ApiResponse::new("User found", UserResource::from(user))))
}

#[utoipa::path(
    put,
    path = "/api/admin/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<UserResource>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let repo = Arc::new(PostgresUserRepository::new(state.pool));
    let use_case = UpdateUserUseCase::new(repo, Arc::new(PasswordService::new()));

    let user = use_case.execute(id, req).await?;

    Ok(Json(ApiResponse::new("User updated", UserResource::from(user))))
}

/// Deactivate an employee and revoke their sessions
#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deactivated", body = MessageResponse),
        (status = 403, description = "Cannot deactivate yourself", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn delete_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let use_case = DeactivateUserUseCase::new(
        Arc::new(PostgresUserRepository::new(state.pool.clone())),
        Arc::new(PostgresRefreshTokenRepository::new(state.pool)),
    );
    use_case.execute(auth_user.user_id, id).await?;

    Ok(Json(MessageResponse::new("User deactivated")))
}
