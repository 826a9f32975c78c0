use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::reports::models::{PublicReport, ReportStatus};
use crate::features::users::dtos::UserSummaryDto;
use crate::shared::geometry::{validate_geometry, Geometry};
use crate::shared::types::{
    default_page, default_page_size, deserialize_some, empty_as_none, PaginationQuery,
};
use crate::shared::validation::validate_not_blank;

/// Response DTO for report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponseDto {
    pub id: Uuid,
    pub reporter_name: Option<String>,
    pub reporter_contact: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub report_type: Option<String>,
    pub geometry: Geometry,
    pub photos: Option<Vec<String>>,
    pub status: ReportStatus,
    pub assigned_to: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PublicReport> for ReportResponseDto {
    fn from(r: PublicReport) -> Self {
        Self {
            id: r.id,
            reporter_name: r.reporter_name,
            reporter_contact: r.reporter_contact,
            title: r.title,
            description: r.description,
            report_type: r.report_type,
            geometry: r.geometry.0,
            photos: r.photos.map(|p| p.0),
            status: r.status,
            assigned_to: r.assigned_to,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Report with its assignee resolved
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportDetailDto {
    #[serde(flatten)]
    pub report: ReportResponseDto,
    pub assignee: Option<UserSummaryDto>,
}

/// Request DTO for submitting a report
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportDto {
    #[validate(length(max = 255, message = "Reporter name must not exceed 255 characters"))]
    pub reporter_name: Option<String>,

    #[validate(length(max = 255, message = "Reporter contact must not exceed 255 characters"))]
    pub reporter_contact: Option<String>,

    #[validate(
        length(min = 1, max = 255, message = "Title must be 1-255 characters"),
        custom(function = "validate_not_blank")
    )]
    pub title: String,

    pub description: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Report type must be 1-100 characters"))]
    pub report_type: Option<String>,

    #[validate(custom(function = "validate_geometry"))]
    pub geometry: Geometry,

    pub photos: Option<Vec<String>>,
}

/// Request DTO for updating a report.
/// Absent fields are kept; `null` clears optional fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReportDto {
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    #[validate(length(max = 255, message = "Reporter name must not exceed 255 characters"))]
    pub reporter_name: Option<Option<String>>,

    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    #[validate(length(max = 255, message = "Reporter contact must not exceed 255 characters"))]
    pub reporter_contact: Option<Option<String>>,

    #[validate(
        length(min = 1, max = 255, message = "Title must be 1-255 characters"),
        custom(function = "validate_not_blank")
    )]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,

    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    #[validate(length(min = 1, max = 100, message = "Report type must be 1-100 characters"))]
    pub report_type: Option<Option<String>>,

    #[validate(custom(function = "validate_geometry"))]
    pub geometry: Option<Geometry>,

    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<Vec<String>>)]
    pub photos: Option<Option<Vec<String>>>,

    pub status: Option<ReportStatus>,

    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<Uuid>)]
    pub assigned_to: Option<Option<Uuid>>,
}

/// Request DTO for a status change (PATCH)
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReportStatusDto {
    pub status: Option<ReportStatus>,

    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<Uuid>)]
    pub assigned_to: Option<Option<Uuid>>,
}

impl From<UpdateReportStatusDto> for UpdateReportDto {
    fn from(dto: UpdateReportStatusDto) -> Self {
        Self {
            status: dto.status,
            assigned_to: dto.assigned_to,
            ..Default::default()
        }
    }
}

/// Request DTO for assigning a report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignReportDto {
    pub user_id: Uuid,
}

/// Report counts by status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportStatsDto {
    pub total: i64,
    pub open: i64,
    pub in_progress: i64,
    pub resolved: i64,
}

/// Query params for listing reports
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ReportListQuery {
    /// Exact status
    #[serde(default, deserialize_with = "empty_as_none")]
    pub status: Option<ReportStatus>,
    /// Exact report type
    #[serde(default, deserialize_with = "empty_as_none")]
    pub report_type: Option<String>,
    /// Case-insensitive substring over title, description and reporter name
    #[serde(default, deserialize_with = "empty_as_none")]
    pub search: Option<String>,
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: i64,
    /// Items per page (max 500)
    #[serde(default = "default_page_size")]
    pub limit: i64,
}

impl ReportListQuery {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery::new(self.page, self.limit)
    }

    pub fn filter(&self) -> ReportFilter {
        ReportFilter {
            status: self.status,
            report_type: self.report_type.clone(),
            search: self.search.clone(),
        }
    }
}

/// Filter applied by the report repository
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportFilter {
    pub status: Option<ReportStatus>,
    pub report_type: Option<String>,
    pub search: Option<String>,
}
