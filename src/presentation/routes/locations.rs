use crate::domain::users::UserRole;
use crate::infrastructure::state::AppState;
use crate::presentation::handlers::locations;
use crate::presentation::routes::guarded;
use axum::{
    Router,
    routing::{get, post, put},
};

/// Any active user may read, only administrators may write
pub fn routes(state: AppState) -> Router<AppState> {
    let reads = Router::new()
        .route("/", get(locations::list_locations))
        .route("/{id}", get(locations::get_location));

    let writes = Router::new()
        .route("/", post(locations::create_location))
        .route(
            "/{id}",
            put(locations::update_location).delete(locations::delete_location),
        );

    guarded(reads, &state, UserRole::all()).merge(guarded(
        writes,
        &state,
        UserRole::administrators(),
    ))
}
