use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::ReportFilter;
use crate::features::reports::models::{PublicReport, ReportStatus};
use crate::shared::search::contains_pattern;

/// Persistence for public reports
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Filtered page, newest first, plus the total matching count
    async fn list(
        &self,
        filter: &ReportFilter,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<PublicReport>, i64)>;

    async fn find(&self, id: Uuid) -> Result<Option<PublicReport>>;

    async fn insert(&self, report: &PublicReport) -> Result<()>;

    /// Returns false when the report is gone
    async fn update(&self, report: &PublicReport) -> Result<bool>;

    /// Returns false when the report is gone
    async fn delete(&self, id: Uuid) -> Result<bool>;

    /// Report count per status; statuses without rows are absent
    async fn count_by_status(&self) -> Result<HashMap<ReportStatus, i64>>;
}

const REPORT_COLUMNS: &str = "id, reporter_name, reporter_contact, title, description, \
     report_type, geometry, photos, status, assigned_to, created_at, updated_at";

pub struct PgReportRepository {
    pool: PgPool,
}

impl PgReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &ReportFilter) {
    builder.push(" WHERE TRUE");

    if let Some(status) = filter.status {
        builder.push(" AND status = ").push_bind(status);
    }
    if let Some(report_type) = &filter.report_type {
        builder.push(" AND report_type = ").push_bind(report_type.clone());
    }
    if let Some(search) = &filter.search {
        let pattern = contains_pattern(search);
        builder
            .push(" AND (title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR reporter_name ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

#[async_trait]
impl ReportRepository for PgReportRepository {
    async fn list(
        &self,
        filter: &ReportFilter,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<PublicReport>, i64)> {
        let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM public_reports");
        push_filter(&mut count_query, filter);
        let total = count_query
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count reports: {:?}", e);
                AppError::Database(e)
            })?;

        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM public_reports",
            REPORT_COLUMNS
        ));
        push_filter(&mut query, filter);
        query
            .push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let reports = query
            .build_query_as::<PublicReport>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list reports: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((reports, total))
    }

    async fn find(&self, id: Uuid) -> Result<Option<PublicReport>> {
        sqlx::query_as::<_, PublicReport>(&format!(
            "SELECT {} FROM public_reports WHERE id = $1",
            REPORT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get report: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn insert(&self, report: &PublicReport) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO public_reports
                (id, reporter_name, reporter_contact, title, description, report_type,
                 geometry, photos, status, assigned_to, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(report.id)
        .bind(&report.reporter_name)
        .bind(&report.reporter_contact)
        .bind(&report.title)
        .bind(&report.description)
        .bind(&report.report_type)
        .bind(&report.geometry)
        .bind(&report.photos)
        .bind(report.status)
        .bind(report.assigned_to)
        .bind(report.created_at)
        .bind(report.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create report: {:?}", e);
            AppError::from_write(e, "Report")
        })?;

        Ok(())
    }

    async fn update(&self, report: &PublicReport) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE public_reports
            SET reporter_name = $2, reporter_contact = $3, title = $4, description = $5,
                report_type = $6, geometry = $7, photos = $8, status = $9, assigned_to = $10,
                updated_at = $11
            WHERE id = $1
            "#,
        )
        .bind(report.id)
        .bind(&report.reporter_name)
        .bind(&report.reporter_contact)
        .bind(&report.title)
        .bind(&report.description)
        .bind(&report.report_type)
        .bind(&report.geometry)
        .bind(&report.photos)
        .bind(report.status)
        .bind(report.assigned_to)
        .bind(report.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update report: {:?}", e);
            AppError::from_write(e, "Report")
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM public_reports WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete report: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_by_status(&self) -> Result<HashMap<ReportStatus, i64>> {
        let rows: Vec<(ReportStatus, i64)> =
            sqlx::query_as("SELECT status, COUNT(*) FROM public_reports GROUP BY status")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to count reports by status: {:?}", e);
                    AppError::Database(e)
                })?;

        Ok(rows.into_iter().collect())
    }
}
