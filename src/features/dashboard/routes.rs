use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::dashboard::handlers;
use crate::features::dashboard::services::DashboardService;

/// Create dashboard routes
pub fn routes(dashboard_service: Arc<DashboardService>) -> Router {
    Router::new()
        .route("/api/dashboard/stats", get(handlers::get_stats))
        .route("/api/dashboard/quick-stats", get(handlers::get_quick_stats))
        .route("/api/dashboard/activities", get(handlers::get_activities))
        .route("/api/dashboard/chart", get(handlers::get_chart))
        .with_state(dashboard_service)
}
