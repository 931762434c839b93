use crate::domain::users::{UserRepository, UserRole};
use crate::infrastructure::repositories::users::PostgresUserRepository;
use crate::infrastructure::state::AppState;
use crate::presentation::extractors::AuthUser;
use crate::shared::error::AppError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

/// Roles allowed through [`require_roles`]
#[derive(Clone, Debug)]
pub struct RequiredRoles(pub Vec<UserRole>);

impl RequiredRoles {
    pub fn allows(&self, role: UserRole) -> bool {
        self.0.contains(&role)
    }
}

/// Role guard. Reloads the caller so a role change or deactivation
/// takes effect before the access token expires.
pub async fn require_roles(
    State(state): State<AppState>,
    axum::Extension(required): axum::Extension<RequiredRoles>,
    auth_user: AuthUser,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let repo = PostgresUserRepository::new(state.pool.clone());
    let user = repo
        .find_by_id(auth_user.user_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load user {}: {}", auth_user.user_id, e);
            AppError::InternalServerError(e)
        })?
        .ok_or_else(|| AppError::Unauthorized("User no longer exists".to_string()))?;

    if !user.is_active {
        return Err(AppError::Forbidden("Account is inactive".to_string()));
    }

    if !required.allows(user.role) {
        tracing::debug!(user_id = %user.id, role = %user.role, "Role not allowed");
        return Err(AppError::Forbidden("Insufficient permissions".to_string()));
    }

    Ok(next.run(request).await)
}
