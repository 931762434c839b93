use crate::infrastructure::state::AppState;
use crate::presentation::handlers;
use crate::presentation::middleware::cors::cors_layer;
use crate::presentation::middleware::rate_limit::rate_limit_layer;
use crate::presentation::openapi::ApiDoc;
use crate::presentation::routes;
use axum::{Router, routing::get};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Full application router. Serve it with
/// `into_make_service_with_connect_info::<SocketAddr>()` so rate limiting keys on the peer.
pub fn app(state: AppState) -> anyhow::Result<Router> {
    let cors = cors_layer(&state.http_config.cors_allowed_origins)?;
    let rate_limit = rate_limit_layer(state.http_config.rate_limit_per_minute)?;

    let api = Router::new()
        .nest("/auth", routes::auth::routes())
        .nest("/mobile", routes::mobile::routes())
        .nest("/departements", routes::departments::routes(state.clone()))
        .nest("/positions", routes::positions::routes(state.clone()))
        .nest("/locations", routes::locations::routes(state.clone()))
        .nest("/shifts", routes::shifts::routes(state.clone()))
        .nest("/attendance", routes::attendance::routes())
        .nest("/leave", routes::leave::routes(state.clone()))
        .nest("/notifications", routes::notifications::routes(state.clone()))
        .nest("/admin", routes::admin::routes(state.clone()))
        .layer(rate_limit);

    Ok(Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(handlers::health::health_check))
        .nest("/api", api)
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
