use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::dashboard::models::CategoryLocationCount;
use crate::features::locations::dtos::DataLogDto;
use crate::features::reports::models::ReportStatus;
use crate::shared::constants::RECENT_ACTIVITY_LIMIT;

// ============================================================================
// Stats
// ============================================================================

/// Location count for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCountDto {
    pub category_name: String,
    pub color: Option<String>,
    pub count: i64,
}

impl From<CategoryLocationCount> for CategoryCountDto {
    fn from(c: CategoryLocationCount) -> Self {
        Self {
            category_name: c.category_name,
            color: c.color,
            count: c.count,
        }
    }
}

/// Report count for one status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusCountDto {
    pub status: ReportStatus,
    pub count: i64,
}

/// Full dashboard statistics
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsDto {
    pub total_locations: i64,
    /// Active categories only
    pub total_categories: i64,
    pub total_reports: i64,
    pub total_infrastructure: i64,
    pub recent_activities: Vec<DataLogDto>,
    pub location_by_category: Vec<CategoryCountDto>,
    pub reports_by_status: Vec<StatusCountDto>,
}

// ============================================================================
// Quick stats
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuickStatsDto {
    pub active_locations: i64,
    pub open_reports: i64,
    /// Locations created since the first day of the current UTC month
    pub new_this_month: i64,
}

// ============================================================================
// Activities
// ============================================================================

fn default_activity_limit() -> i64 {
    RECENT_ACTIVITY_LIMIT
}

/// Query params for the activity feed
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ActivitiesQuery {
    /// Number of entries (default 10, max 100)
    #[serde(default = "default_activity_limit")]
    pub limit: i64,
}

// ============================================================================
// Chart
// ============================================================================

/// Creation counts for one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChartPointDto {
    /// `YYYY-MM`
    pub month: String,
    /// Short Indonesian label, e.g. `Okt 2026`
    pub label: String,
    pub locations: i64,
    pub reports: i64,
}
