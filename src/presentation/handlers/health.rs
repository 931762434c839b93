use crate::infrastructure::db::DbPool;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResource {
    pub status: &'static str,
    pub database: &'static str,
    pub version: &'static str,
}

/// Liveness plus a database round trip
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service healthy", body = HealthResource),
        (status = 503, description = "Database unreachable", body = HealthResource)
    ),
    tag = "health"
)]
pub async fn health_check(State(pool): State<DbPool>) -> impl IntoResponse {
    let (status, health, database) = match sqlx::query("SELECT 1").execute(&pool).await {
        Ok(_) => (StatusCode::OK, "healthy", "connected"),
        Err(e) => {
            tracing::error!("Database health check failed: {:?}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "unhealthy", "disconnected")
        }
    };

    (
        status,
        Json(HealthResource {
            status: health,
            database,
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}
