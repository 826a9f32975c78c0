use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::reports::handlers;
use crate::features::reports::services::ReportService;

pub fn routes(service: Arc<ReportService>) -> Router {
    Router::new()
        .route(
            "/api/reports",
            get(handlers::list_reports).post(handlers::create_report),
        )
        .route("/api/reports/stats", get(handlers::get_report_stats))
        .route(
            "/api/reports/{id}",
            get(handlers::get_report)
                .put(handlers::update_report)
                .patch(handlers::update_report_status)
                .delete(handlers::delete_report),
        )
        .route("/api/reports/{id}/assign", post(handlers::assign_report))
        .route("/api/reports/{id}/resolve", post(handlers::resolve_report))
        .with_state(service)
}
