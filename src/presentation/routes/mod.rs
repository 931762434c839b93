pub mod admin;
pub mod attendance;
pub mod auth;
pub mod departments;
pub mod leave;
pub mod locations;
pub mod mobile;
pub mod notifications;
pub mod positions;
pub mod shifts;

use crate::domain::users::UserRole;
use crate::infrastructure::state::AppState;
use crate::presentation::middleware::auth::{RequiredRoles, require_roles};
use axum::{Extension, Router, middleware};

/// Restrict every route of `router` to active users holding one of `roles`
pub fn guarded(router: Router<AppState>, state: &AppState, roles: Vec<UserRole>) -> Router<AppState> {
    router
        .route_layer(middleware::from_fn_with_state(state.clone(), require_roles))
        .route_layer(Extension(RequiredRoles(roles)))
}
