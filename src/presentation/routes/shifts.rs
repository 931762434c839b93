use crate::domain::users::UserRole;
use crate::infrastructure::state::AppState;
use crate::presentation::handlers::shifts;
use crate::presentation::routes::guarded;
use axum::{
    Router,
    routing::{get, post, put},
};

/// Any active user may read, only administrators may write
pub fn routes(state: AppState) -> Router<AppState> {
    let reads = Router::new()
        .route("/", get(shifts::list_shifts))
        .route("/{id}", get(shifts::get_shift));

    let writes = Router::new()
        .route("/", post(shifts::create_shift))
        .route(
            "/{id}",
            put(shifts::update_shift).delete(shifts::delete_shift),
        );

    guarded(reads, &state, UserRole::all()).merge(guarded(
        writes,
        &state,
        UserRole::administrators(),
    ))
}
