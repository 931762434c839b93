use crate::domain::users::UserRole;
use crate::infrastructure::state::AppState;
use crate::presentation::handlers::positions;
use crate::presentation::routes::guarded;
use axum::{
    Router,
    routing::{get, post, put},
};

/// Any active user may read, only administrators may write
pub fn routes(state: AppState) -> Router<AppState> {
    let reads = Router::new()
        .route("/", get(positions::list_positions))
        .route("/{id}", get(positions::get_position));

    let writes = Router::new()
        .route("/", post(positions::create_position))
        .route(
            "/{id}",
            put(positions::update_position).delete(positions::delete_position),
        );

    guarded(reads, &state, UserRole::all()).merge(guarded(
        writes,
        &state,
        UserRole::administrators(),
    ))
}
