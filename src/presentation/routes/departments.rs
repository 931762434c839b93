use crate::domain::users::UserRole;
use crate::infrastructure::state::AppState;
use crate::presentation::handlers::departments;
use crate::presentation::routes::guarded;
use axum::{
    Router,
    routing::{get, post, put},
};

/// Any active user may read, only administrators may write
pub fn routes(state: AppState) -> Router<AppState> {
    let reads = Router::new()
        .route("/", get(departments::list_departments))
        .route("/{id}", get(departments::get_department));

    let writes = Router::new()
        .route("/", post(departments::create_department))
        .route(
            "/{id}",
            put(departments::update_department).delete(departments::delete_department),
        );

    guarded(reads, &state, UserRole::all()).merge(guarded(
        writes,
        &state,
        UserRole::administrators(),
    ))
}
