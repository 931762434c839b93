use crate::infrastructure::state::AppState;
use crate::presentation::handlers::{auth, notifications};
use axum::{Router, routing::post};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(auth::mobile_login))
        .route("/auth/refresh-token", post(auth::refresh_token))
        .route(
            "/devices",
            post(notifications::register_device).delete(notifications::unregister_device),
        )
}
