use crate::domain::users::UserRole;
use crate::infrastructure::state::AppState;
use crate::presentation::handlers::leave;
use crate::presentation::routes::guarded;
use axum::{
    Router,
    routing::{get, post},
};

/// The caller's own leave requests
pub fn routes(state: AppState) -> Router<AppState> {
    let router = Router::new()
        .route("/", get(leave::my_leave).post(leave::submit_leave))
        .route("/{id}/cancel", post(leave::cancel_leave));

    guarded(router, &state, UserRole::all())
}
