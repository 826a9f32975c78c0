use utoipa::{Modify, OpenApi};

use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::locations::{
    dtos as locations_dtos, handlers as locations_handlers, models as locations_models,
};
use crate::features::reports::{
    dtos as reports_dtos, handlers as reports_handlers, models as reports_models,
};
use crate::features::users::{dtos as users_dtos, handlers::user_handler, models as users_models};
use crate::shared::geometry::Geometry;
use crate::shared::types::{ApiResponse, PaginationMeta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Locations
        locations_handlers::list_locations,
        locations_handlers::list_locations_in_bounds,
        locations_handlers::get_location,
        locations_handlers::create_location,
        locations_handlers::update_location,
        locations_handlers::delete_location,
        // Reports
        reports_handlers::list_reports,
        reports_handlers::get_report_stats,
        reports_handlers::get_report,
        reports_handlers::create_report,
        reports_handlers::update_report,
        reports_handlers::update_report_status,
        reports_handlers::delete_report,
        reports_handlers::assign_report,
        reports_handlers::resolve_report,
        // Categories
        categories_handlers::list_categories,
        categories_handlers::list_root_categories,
        categories_handlers::get_category,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Users
        user_handler::get_default_user,
        // Dashboard
        dashboard_handlers::get_stats,
        dashboard_handlers::get_quick_stats,
        dashboard_handlers::get_activities,
        dashboard_handlers::get_chart,
    ),
    components(
        schemas(
            // Shared
            PaginationMeta,
            Geometry,
            // Locations
            locations_models::LocationStatus,
            locations_models::InfrastructureType,
            locations_models::LogAction,
            locations_dtos::LocationDto,
            locations_dtos::LocationListItemDto,
            locations_dtos::LocationDetailDto,
            locations_dtos::CreateLocationDto,
            locations_dtos::UpdateLocationDto,
            locations_dtos::InfrastructureDto,
            locations_dtos::DataLogDto,
            locations_dtos::DataLogUserDto,
            // Reports
            reports_models::ReportStatus,
            reports_dtos::ReportResponseDto,
            reports_dtos::ReportDetailDto,
            reports_dtos::CreateReportDto,
            reports_dtos::UpdateReportDto,
            reports_dtos::UpdateReportStatusDto,
            reports_dtos::AssignReportDto,
            reports_dtos::ReportStatsDto,
            // Categories
            categories_dtos::CategoryRefDto,
            categories_dtos::CategoryResponseDto,
            categories_dtos::CategoryListItemDto,
            categories_dtos::CategoryDetailDto,
            categories_dtos::CreateCategoryDto,
            categories_dtos::UpdateCategoryDto,
            // Users
            users_models::UserRole,
            users_dtos::UserSummaryDto,
            users_dtos::DefaultUserDto,
            // Dashboard
            dashboard_dtos::DashboardStatsDto,
            dashboard_dtos::CategoryCountDto,
            dashboard_dtos::StatusCountDto,
            dashboard_dtos::QuickStatsDto,
            dashboard_dtos::ChartPointDto,
            // Envelopes
            ApiResponse<locations_dtos::LocationDetailDto>,
            ApiResponse<Vec<locations_dtos::LocationListItemDto>>,
            ApiResponse<reports_dtos::ReportDetailDto>,
            ApiResponse<reports_dtos::ReportStatsDto>,
            ApiResponse<Vec<categories_dtos::CategoryListItemDto>>,
            ApiResponse<categories_dtos::CategoryDetailDto>,
            ApiResponse<users_dtos::DefaultUserDto>,
            ApiResponse<dashboard_dtos::DashboardStatsDto>,
            ApiResponse<Vec<dashboard_dtos::ChartPointDto>>,
        )
    ),
    tags(
        (name = "locations", description = "Village locations with audit history"),
        (name = "reports", description = "Public issue reports"),
        (name = "categories", description = "Location categories"),
        (name = "users", description = "Staff users"),
        (name = "Dashboard", description = "Aggregated statistics for the admin dashboard"),
    ),
    info(
        title = "Desa GIS API",
        version = "0.1.0",
        description = "API untuk pengelolaan data lokasi dan laporan warga desa",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
