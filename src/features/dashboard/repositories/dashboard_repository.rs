use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::dashboard::models::{CategoryLocationCount, DashboardTotals, QuickCounts};
use crate::features::locations::models::DataLogDetail;
use crate::features::locations::repositories::DATA_LOG_DETAIL_COLUMNS;

/// Read-only aggregates across locations, categories, reports and the audit trail
#[async_trait]
pub trait DashboardRepository: Send + Sync {
    async fn totals(&self) -> Result<DashboardTotals>;

    /// Newest audit rows first
    async fn recent_activities(&self, limit: i64) -> Result<Vec<DataLogDetail>>;

    /// One entry per active category, including categories without locations
    async fn locations_per_category(&self) -> Result<Vec<CategoryLocationCount>>;

    async fn quick_counts(&self, month_start: DateTime<Utc>) -> Result<QuickCounts>;

    /// Location creations grouped by the first day of their UTC month
    async fn location_creations_by_month(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<(NaiveDate, i64)>>;

    /// Report creations grouped by the first day of their UTC month
    async fn report_creations_by_month(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<(NaiveDate, i64)>>;
}

pub struct PgDashboardRepository {
    pool: PgPool,
}

impl PgDashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn creations_by_month(
        &self,
        table: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<(NaiveDate, i64)>> {
        sqlx::query_as::<_, (NaiveDate, i64)>(&format!(
            r#"
            SELECT date_trunc('month', created_at AT TIME ZONE 'UTC')::date AS month, COUNT(*)
            FROM {}
            WHERE created_at >= $1
            GROUP BY month
            ORDER BY month
            "#,
            table
        ))
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to group {} by month: {:?}", table, e);
            AppError::Database(e)
        })
    }
}

#[async_trait]
impl DashboardRepository for PgDashboardRepository {
    async fn totals(&self) -> Result<DashboardTotals> {
        sqlx::query_as::<_, DashboardTotals>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM locations) AS locations,
                (SELECT COUNT(*) FROM categories WHERE is_active) AS active_categories,
                (SELECT COUNT(*) FROM public_reports) AS reports,
                (SELECT COUNT(*) FROM infrastructures) AS infrastructure
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get dashboard totals: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn recent_activities(&self, limit: i64) -> Result<Vec<DataLogDetail>> {
        sqlx::query_as::<_, DataLogDetail>(&format!(
            r#"
            SELECT {}
            FROM data_logs dl
            LEFT JOIN users u ON u.id = dl.user_id
            LEFT JOIN locations l ON l.id = dl.location_id
            ORDER BY dl.created_at DESC, dl.id DESC
            LIMIT $1
            "#,
            DATA_LOG_DETAIL_COLUMNS
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get recent activities: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn locations_per_category(&self) -> Result<Vec<CategoryLocationCount>> {
        sqlx::query_as::<_, CategoryLocationCount>(
            r#"
            SELECT c.name AS category_name, c.color, COUNT(l.id) AS count
            FROM categories c
            LEFT JOIN locations l ON l.category_id = c.id
            WHERE c.is_active
            GROUP BY c.id, c.name, c.color
            ORDER BY c.name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count locations per category: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn quick_counts(&self, month_start: DateTime<Utc>) -> Result<QuickCounts> {
        sqlx::query_as::<_, QuickCounts>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM locations WHERE status = 'ACTIVE') AS active_locations,
                (SELECT COUNT(*) FROM public_reports WHERE status = 'OPEN') AS open_reports,
                (SELECT COUNT(*) FROM locations WHERE created_at >= $1) AS new_this_month
            "#,
        )
        .bind(month_start)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get quick stats: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn location_creations_by_month(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<(NaiveDate, i64)>> {
        self.creations_by_month("locations", since).await
    }

    async fn report_creations_by_month(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<(NaiveDate, i64)>> {
        self.creations_by_month("public_reports", since).await
    }
}
