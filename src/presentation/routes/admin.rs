use crate::domain::users::UserRole;
use crate::infrastructure::state::AppState;
use crate::presentation::handlers::{attendance, dashboard, leave, notifications, users};
use crate::presentation::routes::guarded;
use axum::{
    Router,
    routing::{get, post},
};

/// Back-office routes. Employee and template management need `admin`/`hr`,
/// reporting and leave review also admit managers.
pub fn routes(state: AppState) -> Router<AppState> {
    let management = Router::new()
        .route("/users", post(users::create_user).get(users::list_users))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route(
            "/notification-templates",
            get(notifications::list_templates).post(notifications::create_template),
        )
        .route(
            "/notification-templates/{id}",
            get(notifications::get_template).put(notifications::update_template),
        )
        .route("/notifications/send", post(notifications::send_notification));

    let reviewing = Router::new()
        .route("/absensi", get(attendance::list_attendance))
        .route("/leave", get(leave::list_leave))
        .route("/leave/{id}/approve", post(leave::approve_leave))
        .route("/leave/{id}/reject", post(leave::reject_leave))
        .route("/dashboard", get(dashboard::dashboard_summary));

    guarded(management, &state, UserRole::administrators()).merge(guarded(
        reviewing,
        &state,
        UserRole::reviewers(),
    ))
}
