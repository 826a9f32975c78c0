use std::sync::Arc;

use chrono::Utc;
use sqlx::types::Json;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::{
    CreateReportDto, ReportDetailDto, ReportListQuery, ReportStatsDto, UpdateReportDto,
    UpdateReportStatusDto,
};
use crate::features::reports::models::{PublicReport, ReportStatus};
use crate::features::reports::repositories::ReportRepository;
use crate::features::users::UserService;
use crate::shared::types::Paginated;

/// Service for public report operations
pub struct ReportService {
    reports: Arc<dyn ReportRepository>,
    users: Arc<UserService>,
}

impl ReportService {
    pub fn new(reports: Arc<dyn ReportRepository>, users: Arc<UserService>) -> Self {
        Self { reports, users }
    }

    /// Filtered, paginated list, newest first
    pub async fn list(&self, query: &ReportListQuery) -> Result<Paginated<ReportDetailDto>> {
        let pagination = query.pagination();
        let (reports, total) = self
            .reports
            .list(&query.filter(), pagination.offset(), pagination.limit)
            .await?;

        let items = self.with_assignees(reports).await?;
        Ok(Paginated::new(items, pagination, total))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<ReportDetailDto> {
        let report = self.find_or_404(id).await?;
        self.single_with_assignee(report).await
    }

    /// Submit a report. New reports are always OPEN and unassigned.
    pub async fn create(&self, dto: CreateReportDto) -> Result<ReportDetailDto> {
        let now = Utc::now();
        let report = PublicReport {
            id: Uuid::now_v7(),
            reporter_name: dto.reporter_name,
            reporter_contact: dto.reporter_contact,
            title: dto.title.trim().to_string(),
            description: dto.description,
            report_type: dto.report_type,
            geometry: Json(dto.geometry),
            photos: dto.photos.map(Json),
            status: ReportStatus::Open,
            assigned_to: None,
            created_at: now,
            updated_at: now,
        };

        self.reports.insert(&report).await?;
        tracing::info!("Created report {} ({})", report.id, report.title);

        self.single_with_assignee(report).await
    }

    /// Merge the provided fields into an existing report
    pub async fn update(&self, id: Uuid, dto: UpdateReportDto) -> Result<ReportDetailDto> {
        let mut report = self.find_or_404(id).await?;

        if let Some(Some(user_id)) = dto.assigned_to {
            self.users.require(user_id, "assignedTo").await?;
        }

        if let Some(reporter_name) = dto.reporter_name {
            report.reporter_name = reporter_name;
        }
        if let Some(reporter_contact) = dto.reporter_contact {
            report.reporter_contact = reporter_contact;
        }
        if let Some(title) = dto.title {
            report.title = title.trim().to_string();
        }
        if let Some(description) = dto.description {
            report.description = description;
        }
        if let Some(report_type) = dto.report_type {
            report.report_type = report_type;
        }
        if let Some(geometry) = dto.geometry {
            report.geometry = Json(geometry);
        }
        if let Some(photos) = dto.photos {
            report.photos = photos.map(Json);
        }
        if let Some(status) = dto.status {
            report.status = status;
        }
        if let Some(assigned_to) = dto.assigned_to {
            report.assigned_to = assigned_to;
        }

        self.save(report).await
    }

    /// Change status and/or assignee only
    pub async fn update_status(
        &self,
        id: Uuid,
        dto: UpdateReportStatusDto,
    ) -> Result<ReportDetailDto> {
        self.update(id, dto.into()).await
    }

    /// Assign a staff user and move the report to IN_PROGRESS
    pub async fn assign(&self, id: Uuid, user_id: Uuid) -> Result<ReportDetailDto> {
        let mut report = self.find_or_404(id).await?;
        self.users.require(user_id, "userId").await?;

        report.assigned_to = Some(user_id);
        report.status = ReportStatus::InProgress;
        self.save(report).await
    }

    pub async fn resolve(&self, id: Uuid) -> Result<ReportDetailDto> {
        let mut report = self.find_or_404(id).await?;
        report.status = ReportStatus::Resolved;
        self.save(report).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.reports.delete(id).await? {
            return Err(not_found(id));
        }
        tracing::info!("Deleted report {}", id);
        Ok(())
    }

    pub async fn stats(&self) -> Result<ReportStatsDto> {
        let counts = self.reports.count_by_status().await?;
        let count = |status: ReportStatus| counts.get(&status).copied().unwrap_or(0);

        Ok(ReportStatsDto {
            total: counts.values().sum(),
            open: count(ReportStatus::Open),
            in_progress: count(ReportStatus::InProgress),
            resolved: count(ReportStatus::Resolved),
        })
    }

    async fn save(&self, mut report: PublicReport) -> Result<ReportDetailDto> {
        report.updated_at = Utc::now();
        if !self.reports.update(&report).await? {
            return Err(not_found(report.id));
        }
        tracing::info!("Updated report {} (status {})", report.id, report.status);

        self.single_with_assignee(report).await
    }

    async fn find_or_404(&self, id: Uuid) -> Result<PublicReport> {
        self.reports.find(id).await?.ok_or_else(|| not_found(id))
    }

    async fn single_with_assignee(&self, report: PublicReport) -> Result<ReportDetailDto> {
        self.with_assignees(vec![report])
            .await?
            .pop()
            .ok_or_else(|| AppError::Internal("Report vanished while loading".to_string()))
    }

    async fn with_assignees(&self, reports: Vec<PublicReport>) -> Result<Vec<ReportDetailDto>> {
        let assignee_ids: Vec<Uuid> = reports.iter().filter_map(|r| r.assigned_to).collect();
        let assignees = self.users.summaries(&assignee_ids).await?;

        Ok(reports
            .into_iter()
            .map(|r| ReportDetailDto {
                assignee: r.assigned_to.and_then(|id| assignees.get(&id).cloned()),
                report: r.into(),
            })
            .collect())
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Report {} not found", id))
}
