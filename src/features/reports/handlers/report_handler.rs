use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppPath, AppQuery};
use crate::features::reports::dtos::{
    AssignReportDto, CreateReportDto, ReportDetailDto, ReportListQuery, ReportStatsDto,
    UpdateReportDto, UpdateReportStatusDto,
};
use crate::features::reports::services::ReportService;
use crate::shared::types::{ApiResponse, Paginated};

/// List public reports
#[utoipa::path(
    get,
    path = "/api/reports",
    params(ReportListQuery),
    responses(
        (status = 200, description = "Page of reports", body = ApiResponse<Paginated<ReportDetailDto>>),
        (status = 400, description = "Invalid query")
    ),
    tag = "reports"
)]
pub async fn list_reports(
    State(service): State<Arc<ReportService>>,
    AppQuery(query): AppQuery<ReportListQuery>,
) -> Result<Json<ApiResponse<Paginated<ReportDetailDto>>>> {
    let page = service.list(&query).await?;
    Ok(Json(ApiResponse::success(Some(page), None)))
}

/// Report counts by status
#[utoipa::path(
    get,
    path = "/api/reports/stats",
    responses(
        (status = 200, description = "Report statistics", body = ApiResponse<ReportStatsDto>)
    ),
    tag = "reports"
)]
pub async fn get_report_stats(
    State(service): State<Arc<ReportService>>,
) -> Result<Json<ApiResponse<ReportStatsDto>>> {
    let stats = service.stats().await?;
    Ok(Json(ApiResponse::success(Some(stats), None)))
}

#[utoipa::path(
    get,
    path = "/api/reports/{id}",
    params(
        ("id" = Uuid, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Report found", body = ApiResponse<ReportDetailDto>),
        (status = 404, description = "Report not found")
    ),
    tag = "reports"
)]
pub async fn get_report(
    State(service): State<Arc<ReportService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<ReportDetailDto>>> {
    let report = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(report), None)))
}

/// Submit a report
#[utoipa::path(
    post,
    path = "/api/reports",
    request_body = CreateReportDto,
    responses(
        (status = 201, description = "Report created", body = ApiResponse<ReportDetailDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "reports"
)]
pub async fn create_report(
    State(service): State<Arc<ReportService>>,
    AppJson(dto): AppJson<CreateReportDto>,
) -> Result<(StatusCode, Json<ApiResponse<ReportDetailDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let report = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(report),
            Some("Report submitted successfully".to_string()),
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/reports/{id}",
    params(
        ("id" = Uuid, Path, description = "Report ID")
    ),
    request_body = UpdateReportDto,
    responses(
        (status = 200, description = "Report updated", body = ApiResponse<ReportDetailDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Report not found")
    ),
    tag = "reports"
)]
pub async fn update_report(
    State(service): State<Arc<ReportService>>,
    AppPath(id): AppPath<Uuid>,
    AppJson(dto): AppJson<UpdateReportDto>,
) -> Result<Json<ApiResponse<ReportDetailDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let report = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(report),
        Some("Report updated successfully".to_string()),
    )))
}

/// Change status and/or assignee
#[utoipa::path(
    patch,
    path = "/api/reports/{id}",
    params(
        ("id" = Uuid, Path, description = "Report ID")
    ),
    request_body = UpdateReportStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<ReportDetailDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Report not found")
    ),
    tag = "reports"
)]
pub async fn update_report_status(
    State(service): State<Arc<ReportService>>,
    AppPath(id): AppPath<Uuid>,
    AppJson(dto): AppJson<UpdateReportStatusDto>,
) -> Result<Json<ApiResponse<ReportDetailDto>>> {
    let report = service.update_status(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(report),
        Some("Report status updated successfully".to_string()),
    )))
}

#[utoipa::path(
    delete,
    path = "/api/reports/{id}",
    params(
        ("id" = Uuid, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Report deleted"),
        (status = 404, description = "Report not found")
    ),
    tag = "reports"
)]
pub async fn delete_report(
    State(service): State<Arc<ReportService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Report deleted successfully".to_string()),
    )))
}

/// Assign a report to a staff user (status becomes IN_PROGRESS)
#[utoipa::path(
    post,
    path = "/api/reports/{id}/assign",
    params(
        ("id" = Uuid, Path, description = "Report ID")
    ),
    request_body = AssignReportDto,
    responses(
        (status = 200, description = "Report assigned", body = ApiResponse<ReportDetailDto>),
        (status = 400, description = "Unknown user"),
        (status = 404, description = "Report not found")
    ),
    tag = "reports"
)]
pub async fn assign_report(
    State(service): State<Arc<ReportService>>,
    AppPath(id): AppPath<Uuid>,
    AppJson(dto): AppJson<AssignReportDto>,
) -> Result<Json<ApiResponse<ReportDetailDto>>> {
    let report = service.assign(id, dto.user_id).await?;
    Ok(Json(ApiResponse::success(
        Some(report),
        Some("Report assigned successfully".to_string()),
    )))
}

#[utoipa::path(
    post,
    path = "/api/reports/{id}/resolve",
    params(
        ("id" = Uuid, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Report resolved", body = ApiResponse<ReportDetailDto>),
        (status = 404, description = "Report not found")
    ),
    tag = "reports"
)]
pub async fn resolve_report(
    State(service): State<Arc<ReportService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<ReportDetailDto>>> {
    let report = service.resolve(id).await?;
    Ok(Json(ApiResponse::success(
        Some(report),
        Some("Report resolved successfully".to_string()),
    )))
}
