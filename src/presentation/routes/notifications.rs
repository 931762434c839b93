use crate::domain::users::UserRole;
use crate::infrastructure::state::AppState;
use crate::presentation::handlers::notifications;
use crate::presentation::routes::guarded;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// Inbox of the caller
pub fn routes(state: AppState) -> Router<AppState> {
    let router = Router::new()
        .route("/", get(notifications::list_notifications))
        .route("/recent", get(notifications::recent_notifications))
        .route("/unread-count", get(notifications::unread_count))
        .route("/read-all", post(notifications::mark_all_read))
        .route("/{id}/read", post(notifications::mark_read))
        .route("/{id}", delete(notifications::delete_notification));

    guarded(router, &state, UserRole::all())
}
