use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppPath, AppQuery};
use crate::features::locations::dtos::{
    CreateLocationDto, DeleteLocationQuery, LocationDetailDto, LocationListItemDto,
    LocationListQuery, UpdateLocationDto,
};
use crate::features::locations::services::LocationService;
use crate::shared::geometry::Bounds;
use crate::shared::types::{ApiResponse, Paginated};

/// List locations
///
/// Filter by category, status and a case-insensitive search over name,
/// description and address. Newest first.
#[utoipa::path(
    get,
    path = "/api/locations",
    params(LocationListQuery),
    responses(
        (status = 200, description = "Page of locations", body = ApiResponse<Paginated<LocationListItemDto>>),
        (status = 400, description = "Invalid query")
    ),
    tag = "locations"
)]
pub async fn list_locations(
    State(service): State<Arc<LocationService>>,
    AppQuery(query): AppQuery<LocationListQuery>,
) -> Result<Json<ApiResponse<Paginated<LocationListItemDto>>>> {
    let page = service.list(&query).await?;
    Ok(Json(ApiResponse::success(Some(page), None)))
}

/// Point locations inside a map viewport
#[utoipa::path(
    get,
    path = "/api/locations/bounds",
    params(Bounds),
    responses(
        (status = 200, description = "Locations inside the bounds", body = ApiResponse<Vec<LocationListItemDto>>),
        (status = 400, description = "Invalid bounds")
    ),
    tag = "locations"
)]
pub async fn list_locations_in_bounds(
    State(service): State<Arc<LocationService>>,
    AppQuery(bounds): AppQuery<Bounds>,
) -> Result<Json<ApiResponse<Vec<LocationListItemDto>>>> {
    let locations = service.list_in_bounds(&bounds).await?;
    Ok(Json(ApiResponse::success(Some(locations), None)))
}

/// Get location detail with infrastructure and audit history
#[utoipa::path(
    get,
    path = "/api/locations/{id}",
    params(
        ("id" = Uuid, Path, description = "Location ID")
    ),
    responses(
        (status = 200, description = "Location found", body = ApiResponse<LocationDetailDto>),
        (status = 404, description = "Location not found")
    ),
    tag = "locations"
)]
pub async fn get_location(
    State(service): State<Arc<LocationService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<LocationDetailDto>>> {
    let location = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(location), None)))
}

#[utoipa::path(
    post,
    path = "/api/locations",
    request_body = CreateLocationDto,
    responses(
        (status = 201, description = "Location created", body = ApiResponse<LocationListItemDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "locations"
)]
pub async fn create_location(
    State(service): State<Arc<LocationService>>,
    AppJson(dto): AppJson<CreateLocationDto>,
) -> Result<(StatusCode, Json<ApiResponse<LocationListItemDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let location = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(location),
            Some("Location created successfully".to_string()),
        )),
    ))
}

/// Partially update a location
///
/// Absent fields are kept, `null` clears optional fields. `userId` in the
/// body attributes the change; it defaults to the admin-like user.
#[utoipa::path(
    put,
    path = "/api/locations/{id}",
    params(
        ("id" = Uuid, Path, description = "Location ID")
    ),
    request_body = UpdateLocationDto,
    responses(
        (status = 200, description = "Location updated", body = ApiResponse<LocationListItemDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Location not found")
    ),
    tag = "locations"
)]
pub async fn update_location(
    State(service): State<Arc<LocationService>>,
    AppPath(id): AppPath<Uuid>,
    AppJson(dto): AppJson<UpdateLocationDto>,
) -> Result<Json<ApiResponse<LocationListItemDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let location = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(location),
        Some("Location updated successfully".to_string()),
    )))
}

#[utoipa::path(
    delete,
    path = "/api/locations/{id}",
    params(
        ("id" = Uuid, Path, description = "Location ID"),
        DeleteLocationQuery
    ),
    responses(
        (status = 200, description = "Location deleted"),
        (status = 404, description = "Location not found")
    ),
    tag = "locations"
)]
pub async fn delete_location(
    State(service): State<Arc<LocationService>>,
    AppPath(id): AppPath<Uuid>,
    AppQuery(query): AppQuery<DeleteLocationQuery>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id, query.user_id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Location deleted successfully".to_string()),
    )))
}
