/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 500;

/// Number of audit rows shown in the dashboard activity feed
pub const RECENT_ACTIVITY_LIMIT: i64 = 10;

/// Upper bound for the activity feed `limit` parameter
pub const MAX_RECENT_ACTIVITY_LIMIT: i64 = 100;

/// Months covered by the dashboard creation chart
pub const CHART_MONTHS: u32 = 6;

// =============================================================================
// AUDIT LOG
// =============================================================================

/// `table_name` recorded on location audit rows
pub const LOCATION_TABLE: &str = "Location";

/// Username preferred when resolving the default acting user
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
