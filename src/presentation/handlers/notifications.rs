use crate::application::notifications::devices::{
    RegisterDeviceRequest, RegisterDeviceUseCase, UnregisterDeviceRequest, UnregisterDeviceUseCase,
};
use crate::application::notifications::dispatch::NotificationDispatcher;
use crate::application::notifications::inbox::{
    ListNotificationsRequest, NotificationInbox, RecentNotificationsQuery,
};
use crate::application::notifications::send::{SendNotificationRequest, SendNotificationUseCase};
use crate::application::notifications::templates::{
    CreateTemplateRequest, CreateTemplateUseCase, GetTemplateUseCase, ListTemplatesUseCase,
    UpdateTemplateRequest, UpdateTemplateUseCase,
};
use crate::infrastructure::db::DbPool;
use crate::infrastructure::repositories::devices::PostgresDeviceRepository;
use crate::infrastructure::repositories::notifications::PostgresNotificationRepository;
use crate::infrastructure::repositories::templates::PostgresNotificationTemplateRepository;
use crate::infrastructure::repositories::users::PostgresUserRepository;
use crate::infrastructure::state::AppState;
use crate::presentation::dtos::{
    DeviceResource, NotificationResource, TemplateResource, UnreadCountResource, paginated,
};
use crate::presentation::extractors::AuthUser;
use crate::shared::error::{AppError, ErrorResponse};
use crate::shared::query::Qs;
use crate::shared::response::{ApiResponse, MessageResponse};
use crate::shared::validation::ValidatedJson;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

/// Dispatcher wired to Postgres and the configured push provider
pub(crate) fn dispatcher(state: &AppState) -> NotificationDispatcher {
    NotificationDispatcher::new(
        Arc::new(PostgresNotificationTemplateRepository::new(state.pool.clone())),
        Arc::new(PostgresNotificationRepository::new(state.pool.clone())),
        Arc::new(PostgresDeviceRepository::new(state.pool.clone())),
        state.push_provider.clone(),
    )
}

fn inbox(pool: DbPool) -> NotificationInbox {
    NotificationInbox::new(Arc::new(PostgresNotificationRepository::new(pool)))
}

fn templates(pool: DbPool) -> Arc<PostgresNotificationTemplateRepository> {
    Arc::new(PostgresNotificationTemplateRepository::new(pool))
}

/// Newest notifications of the caller
#[utoipa::path(
    get,
    path = "/api/notifications/recent",
    params(RecentNotificationsQuery),
    responses(
        (status = 200, description = "Recent notifications", body = ApiResponse<Vec<NotificationResource>>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn recent_notifications(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(query): Query<RecentNotificationsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let notifications = inbox(state.pool).recent(auth_user.user_id, query).await?;
    let resources: Vec<NotificationResource> = notifications
        .into_iter()
        .map(NotificationResource::from)
        .collect();

    Ok(Json(ApiResponse::new("Recent notifications", resources)))
}

#[utoipa::path(
    get,
    path = "/api/notifications",
    params(
        ("page[number]" = Option<i64>, Query, description = "Page number, starts at 1"),
        ("page[size]" = Option<i64>, Query, description = "Page size, at most 100")
    ),
    responses(
        (status = 200, description = "Notifications", body = ApiResponse<Vec<NotificationResource>>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    auth_user: AuthUser,
    uri: Uri,
    Qs(req): Qs<ListNotificationsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let result = inbox(state.pool).list(auth_user.user_id, req).await?;

    Ok(Json(paginated::<_, NotificationResource>(
        "Notifications",
        &uri,
        result,
    )))
}

#[utoipa::path(
    get,
    path = "/api/notifications/unread-count",
    responses(
        (status = 200, description = "Unread notifications", body = ApiResponse<UnreadCountResource>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn unread_count(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let unread = inbox(state.pool).unread_count(auth_user.user_id).await?;

    Ok(Json(ApiResponse::new(
        "Unread notifications",
        UnreadCountResource { unread },
    )))
}

#[utoipa::path(
    post,
    path = "/api/notifications/{id}/read",
    params(("id" = Uuid, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Marked as read", body = MessageResponse),
        (status = 404, description = "Notification not found", body = ErrorResponse)
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn mark_read(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    inbox(state.pool).mark_read(auth_user.user_id, id).await?;

    Ok(Json(MessageResponse::new("Notification marked as read")))
}

#[utoipa::path(
    post,
    path = "/api/notifications/read-all",
    responses(
        (status = 200, description = "All marked as read", body = MessageResponse)
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let updated = inbox(state.pool).mark_all_read(auth_user.user_id).await?;

    Ok(Json(MessageResponse::new(format!(
        "{} notifications marked as read",
        updated
    ))))
}

/// Soft delete; the notification never shows up again
#[utoipa::path(
    delete,
    path = "/api/notifications/{id}",
    params(("id" = Uuid, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Notification deleted", body = MessageResponse),
        (status = 404, description = "Notification not found", body = ErrorResponse)
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn delete_notification(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    inbox(state.pool).delete(auth_user.user_id, id).await?;

    Ok(Json(MessageResponse::new("Notification deleted")))
}

/// Register (or re-assign) a push token to the caller
#[utoipa::path(
    post,
    path = "/api/mobile/devices",
    request_body = RegisterDeviceRequest,
    responses(
        (status = 200, description = "Device registered", body = ApiResponse<DeviceResource>),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "devices",
    security(("bearer_auth" = []))
)]
pub async fn register_device(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(req): ValidatedJson<RegisterDeviceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let use_case =
        RegisterDeviceUseCase::new(Arc::new(PostgresDeviceRepository::new(state.pool)));
    let device = use_case.execute(auth_user.user_id, req).await?;

    Ok(Json(ApiResponse::new(
        "Device registered",
        DeviceResource::from(device),
    )))
}

#[utoipa::path(
    delete,
    path = "/api/mobile/devices",
    request_body = UnregisterDeviceRequest,
    responses(
        (status = 200, description = "Device removed", body = MessageResponse),
        (status = 404, description = "Device not found", body = ErrorResponse)
    ),
    tag = "devices",
    security(("bearer_auth" = []))
)]
pub async fn unregister_device(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(req): ValidatedJson<UnregisterDeviceRequest>,
) -> Result<impl IntoResponse, AppError> {
    UnregisterDeviceUseCase::new(Arc::new(PostgresDeviceRepository::new(state.pool)))
        .execute(auth_user.user_id, req)
        .await?;

    Ok(Json(MessageResponse::new("Device removed")))
}

#[utoipa::path(
    get,
    path = "/api/admin/notification-templates",
    responses(
        (status = 200, description = "Templates", body = ApiResponse<Vec<TemplateResource>>),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    tag = "notification-templates",
    security(("bearer_auth" = []))
)]
pub async fn list_templates(State(pool): State<DbPool>) -> Result<impl IntoResponse, AppError> {
    let templates = ListTemplatesUseCase::new(templates(pool)).execute().await?;
    let resources: Vec<TemplateResource> =
        templates.into_iter().map(TemplateResource::from).collect();

    Ok(Json(ApiResponse::new("Notification templates", resources)))
}

#[utoipa::path(
    post,
    path = "/api/admin/notification-templates",
    request_body = CreateTemplateRequest,
    responses(
        (status = 201, description = "Template created", body = ApiResponse<TemplateResource>),
        (status = 409, description = "Event code already has a template", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "notification-templates",
    security(("bearer_auth" = []))
)]
pub async fn create_template(
    State(pool): State<DbPool>,
    ValidatedJson(req): ValidatedJson<CreateTemplateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let template = CreateTemplateUseCase::new(templates(pool)).execute(req).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            "Template created",
            TemplateResource::from(template),
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/admin/notification-templates/{id}",
    params(("id" = Uuid, Path, description = "Template ID")),
    responses(
        (status = 200, description = "Template found", body = ApiResponse<TemplateResource>),
        (status = 404, description = "Template not found", body = ErrorResponse)
    ),
    tag = "notification-templates",
    security(("bearer_auth" = []))
)]
pub async fn get_template(
    State(pool): State<DbPool>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let template = GetTemplateUseCase::new(templates(pool)).execute(id).await?;

    Ok(Json(ApiResponse::new(
        "Template found",
        TemplateResource::from(template),
    )))
}

#[utoipa::path(
    put,
    path = "/api/admin/notification-templates/{id}",
    params(("id" = Uuid, Path, description = "Template ID")),
    request_body = UpdateTemplateRequest,
    responses(
        (status = 200, description = "Template updated", body = ApiResponse<TemplateResource>),
        (status = 404, description = "Template not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "notification-templates",
    security(("bearer_auth" = []))
)]
pub async fn update_template(
    State(pool): State<DbPool>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateTemplateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let template = UpdateTemplateUseCase::new(templates(pool))
        .execute(id, req)
        .await?;

    Ok(Json(ApiResponse::new(
        "Template updated",
        TemplateResource::from(template),
    )))
}

/// Run the dispatcher for any event, user and template data
#[utoipa::path(
    post,
    path = "/api/admin/notifications/send",
    request_body = SendNotificationRequest,
    responses(
        (status = 201, description = "Notification sent", body = ApiResponse<NotificationResource>),
        (status = 404, description = "Unknown user or no active template", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn send_notification(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SendNotificationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let use_case = SendNotificationUseCase::new(
        Arc::new(PostgresUserRepository::new(state.pool.clone())),
        dispatcher(&state),
    );
    let notification = use_case.execute(req).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            "Notification sent",
            NotificationResource::from(notification),
        )),
    ))
}
