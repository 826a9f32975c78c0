use axum::{extract::State, Json};
use std::sync::Arc;

use crate::core::error::AppError;
use crate::core::extractor::AppQuery;
use crate::features::dashboard::dtos::*;
use crate::features::dashboard::services::DashboardService;
use crate::features::locations::dtos::DataLogDto;
use crate::shared::types::ApiResponse;

// ============================================================================
// Stats
// ============================================================================

/// Totals, recent activity and breakdowns by category and report status
#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Dashboard statistics", body = ApiResponse<DashboardStatsDto>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_stats(
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<ApiResponse<DashboardStatsDto>>, AppError> {
    let stats = service.stats().await?;
    Ok(Json(ApiResponse::success(Some(stats), None)))
}

/// Counts for the dashboard cards
#[utoipa::path(
    get,
    path = "/api/dashboard/quick-stats",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Quick statistics", body = ApiResponse<QuickStatsDto>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_quick_stats(
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<ApiResponse<QuickStatsDto>>, AppError> {
    let stats = service.quick_stats().await?;
    Ok(Json(ApiResponse::success(Some(stats), None)))
}

// ============================================================================
// Activities
// ============================================================================

/// Newest location audit rows
#[utoipa::path(
    get,
    path = "/api/dashboard/activities",
    tag = "Dashboard",
    params(ActivitiesQuery),
    responses(
        (status = 200, description = "Recent activities", body = ApiResponse<Vec<DataLogDto>>),
        (status = 400, description = "Invalid query"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_activities(
    State(service): State<Arc<DashboardService>>,
    AppQuery(query): AppQuery<ActivitiesQuery>,
) -> Result<Json<ApiResponse<Vec<DataLogDto>>>, AppError> {
    let activities = service.recent_activities(query.limit).await?;
    Ok(Json(ApiResponse::success(Some(activities), None)))
}

// ============================================================================
// Chart
// ============================================================================

/// Location and report creations over the last six months
#[utoipa::path(
    get,
    path = "/api/dashboard/chart",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Monthly creation counts", body = ApiResponse<Vec<ChartPointDto>>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_chart(
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<ApiResponse<Vec<ChartPointDto>>>, AppError> {
    let chart = service.chart().await?;
    Ok(Json(ApiResponse::success(Some(chart), None)))
}
