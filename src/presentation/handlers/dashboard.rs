use crate::application::dashboard::DashboardSummaryUseCase;
use crate::infrastructure::repositories::dashboard::PostgresDashboardRepository;
use crate::infrastructure::state::AppState;
use crate::presentation::dtos::DashboardResource;
use crate::shared::error::{AppError, ErrorResponse};
use crate::shared::response::ApiResponse;
use axum::{Json, extract::State, response::IntoResponse};
use std::sync::Arc;

/// Headcounts for the company's current local date
#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    responses(
        (status = 200, description = "Dashboard summary", body = ApiResponse<DashboardResource>),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    tag = "dashboard",
    security(("bearer_auth" = []))
)]
pub async fn dashboard_summary(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let use_case = DashboardSummaryUseCase::new(
        Arc::new(PostgresDashboardRepository::new(state.pool)),
        state.utc_offset,
    );
    let summary = use_case.execute().await?;

    Ok(Json(ApiResponse::new(
        "Dashboard summary",
        DashboardResource::from(summary),
    )))
}
