use crate::application::auth::change_password::{ChangePasswordRequest, ChangePasswordUseCase};
use crate::application::auth::login::{LoginRequest, LoginResult, LoginUseCase};
use crate::application::auth::logout::LogoutUseCase;
use crate::application::auth::mobile_login::{MobileLoginRequest, MobileLoginUseCase};
use crate::application::auth::refresh::{RefreshTokenRequest, RefreshTokenUseCase};
use crate::application::auth::token_utils::{TokenLifetimes, TokenResponse};
use crate::application::users::get::GetUserUseCase;
use crate::domain::auth::AuthService;
use crate::infrastructure::config::AuthConfig;
use crate::infrastructure::password::PasswordService;
use crate::infrastructure::repositories::devices::PostgresDeviceRepository;
use crate::infrastructure::repositories::refresh_tokens::PostgresRefreshTokenRepository;
use crate::infrastructure::repositories::users::PostgresUserRepository;
use crate::infrastructure::state::AppState;
use crate::presentation::dtos::{LoginResource, UserResource};
use crate::presentation::extractors::{AuthUser, SESSION_COOKIE};
use crate::shared::error::{AppError, ErrorResponse};
use crate::shared::response::{ApiResponse, MessageResponse};
use crate::shared::validation::ValidatedJson;
use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use std::sync::Arc;

fn lifetimes(config: &AuthConfig) -> TokenLifetimes {
    TokenLifetimes {
        access_token_expiry: config.access_token_expiry,
        refresh_token_expiry: config.refresh_token_expiry,
    }
}

fn login_use_case(state: &AppState) -> LoginUseCase {
    LoginUseCase::new(
        Arc::new(PostgresUserRepository::new(state.pool.clone())),
        Arc::new(PostgresRefreshTokenRepository::new(state.pool.clone())),
        state.auth_service.clone() as Arc<dyn AuthService>,
        Arc::new(PasswordService::new()),
        lifetimes(&state.auth_config),
    )
}

/// `Set-Cookie` value holding the access token
pub(crate) fn session_cookie(token: &str, config: &AuthConfig) -> String {
    let mut cookie = format!(
        "{}={}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, token, config.access_token_expiry
    );
    if config.session_cookie_secure {
        cookie.push_str("; Secure");
    }
    cookie
}

pub(crate) fn expired_session_cookie(config: &AuthConfig) -> String {
    session_cookie("", &AuthConfig {
        access_token_expiry: 0,
        ..config.clone()
    })
}

fn login_resource(result: LoginResult) -> LoginResource {
    LoginResource {
        tokens: result.tokens,
        user: UserResource::from(result.user),
    }
}

/// Web login; also sets the `session_token` cookie
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResource>),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 403, description = "Account inactive", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let result = login_use_case(&state).execute(req).await?;
    let cookie = session_cookie(&result.tokens.access_token, &state.auth_config);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(ApiResponse::new("Login successful", login_resource(result))),
    ))
}

/// Mobile login; optionally registers the device push token
#[utoipa::path(
    post,
    path = "/api/mobile/auth/login",
    request_body = MobileLoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResource>),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 403, description = "Account inactive", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn mobile_login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<MobileLoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let use_case = MobileLoginUseCase::new(
        login_use_case(&state),
        Arc::new(PostgresDeviceRepository::new(state.pool.clone())),
    );
    let result = use_case.execute(req).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::new("Login successful", login_resource(result))),
    ))
}

async fn rotate_refresh_token(
    state: &AppState,
    req: RefreshTokenRequest,
) -> Result<TokenResponse, AppError> {
    RefreshTokenUseCase::new(
        Arc::new(PostgresRefreshTokenRepository::new(state.pool.clone())),
        Arc::new(PostgresUserRepository::new(state.pool.clone())),
        state.auth_service.clone() as Arc<dyn AuthService>,
        lifetimes(&state.auth_config),
    )
    .execute(req)
    .await
}

/// Rotate a refresh token. A mismatch revokes the whole session.
#[utoipa::path(
    post,
    path = "/api/mobile/auth/refresh-token",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Token refreshed", body = ApiResponse<TokenResponse>),
        (status = 401, description = "Invalid or expired refresh token", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RefreshTokenRequest>,
) -> Result<impl IntoResponse, AppError> {
    let tokens = rotate_refresh_token(&state, req).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::new("Token refreshed", tokens)),
    ))
}

/// Web refresh; also renews the `session_token` cookie
#[utoipa::path(
    post,
    path = "/api/auth/refresh-token",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Token refreshed", body = ApiResponse<TokenResponse>),
        (status = 401, description = "Invalid or expired refresh token", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn web_refresh_token(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RefreshTokenRequest>,
) -> Result<impl IntoResponse, AppError> {
    let tokens = rotate_refresh_token(&state, req).await?;
    let cookie = session_cookie(&tokens.access_token, &state.auth_config);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(ApiResponse::new("Token refreshed", tokens)),
    ))
}

/// Revoke the current session and clear the cookie
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "auth",
    security(("bearer_auth" = []))
)]
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    LogoutUseCase::new(Arc::new(PostgresRefreshTokenRepository::new(
        state.pool.clone(),
    )))
    .execute(auth_user.session_id)
    .await?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, expired_session_cookie(&state.auth_config))],
        Json(MessageResponse::new("Logged out")),
    ))
}

/// Profile of the caller
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = ApiResponse<UserResource>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "auth",
    security(("bearer_auth" = []))
)]
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let user = GetUserUseCase::new(Arc::new(PostgresUserRepository::new(state.pool.clone())))
        .execute(auth_user.user_id)
        .await?;

    Ok(Json(ApiResponse::new("Current user", UserResource::from(user))))
}

#[utoipa::path(
    post,
    path = "/api/auth/change-password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed, every session revoked", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 422, description = "Wrong current password or invalid new one", body = ErrorResponse)
    ),
    tag = "auth",
    security(("bearer_auth" = []))
)]
pub async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(req): ValidatedJson<ChangePasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    let use_case = ChangePasswordUseCase::new(
        Arc::new(PostgresUserRepository::new(state.pool.clone())),
        Arc::new(PostgresRefreshTokenRepository::new(state.pool.clone())),
        Arc::new(PasswordService::new()),
    );
    use_case.execute(auth_user.user_id, req).await?;

    Ok(Json(MessageResponse::new("Password changed")))
}
