use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::geometry::Geometry;

/// Report status enum matching database enum
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema,
)]
#[sqlx(type_name = "public_report_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
}

impl ReportStatus {
    pub const ALL: [ReportStatus; 3] = [
        ReportStatus::Open,
        ReportStatus::InProgress,
        ReportStatus::Resolved,
    ];
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportStatus::Open => write!(f, "OPEN"),
            ReportStatus::InProgress => write!(f, "IN_PROGRESS"),
            ReportStatus::Resolved => write!(f, "RESOLVED"),
        }
    }
}

/// Database model for a citizen-submitted issue report
#[derive(Debug, Clone, FromRow)]
pub struct PublicReport {
    pub id: Uuid,
    pub reporter_name: Option<String>,
    pub reporter_contact: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub report_type: Option<String>,
    pub geometry: Json<Geometry>,
    pub photos: Option<Json<Vec<String>>>,
    pub status: ReportStatus,
    pub assigned_to: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
