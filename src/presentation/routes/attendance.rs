use crate::infrastructure::state::AppState;
use crate::presentation::handlers::attendance;
use axum::{
    Router,
    routing::{get, post},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/check-in", post(attendance::check_in))
        .route("/check-out", post(attendance::check_out))
        .route("/me", get(attendance::my_attendance))
}
