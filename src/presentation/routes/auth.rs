use crate::infrastructure::state::AppState;
use crate::presentation::handlers::auth;
use axum::{
    Router,
    routing::{get, post},
};

/// Web authentication; the access token is also set as the session cookie
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/refresh-token", post(auth::web_refresh_token))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
        .route("/change-password", post(auth::change_password))
}
