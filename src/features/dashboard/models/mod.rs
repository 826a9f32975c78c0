use sqlx::FromRow;

/// Row counts shown on the dashboard header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow)]
pub struct DashboardTotals {
    pub locations: i64,
    pub active_categories: i64,
    pub reports: i64,
    pub infrastructure: i64,
}

/// Counts behind the quick stat cards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow)]
pub struct QuickCounts {
    pub active_locations: i64,
    pub open_reports: i64,
    pub new_this_month: i64,
}

/// Location count for one active category
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct CategoryLocationCount {
    pub category_name: String,
    pub color: Option<String>,
    pub count: i64,
}
