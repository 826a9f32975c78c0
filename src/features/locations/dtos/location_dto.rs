use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::categories::dtos::CategoryRefDto;
use crate::features::locations::dtos::{DataLogDto, InfrastructureDto};
use crate::features::locations::models::{Location, LocationStatus};
use crate::features::users::dtos::UserSummaryDto;
use crate::shared::geometry::{validate_geometry, Geometry};
use crate::shared::types::{
    default_page, default_page_size, deserialize_some, empty_as_none, PaginationQuery,
};
use crate::shared::validation::validate_not_blank;

/// Plain location record, also used as the audit snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub geometry: Geometry,
    #[schema(value_type = Option<Object>)]
    pub properties: Option<Map<String, Value>>,
    pub photos: Option<Vec<String>>,
    pub status: LocationStatus,
    pub category_id: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Location> for LocationDto {
    fn from(l: Location) -> Self {
        Self {
            id: l.id,
            name: l.name,
            description: l.description,
            address: l.address,
            geometry: l.geometry.0,
            properties: l.properties.map(|p| p.0),
            photos: l.photos.map(|p| p.0),
            status: l.status,
            category_id: l.category_id,
            created_by: l.created_by,
            created_at: l.created_at,
            updated_at: l.updated_at,
        }
    }
}

/// Location with its category and creator resolved
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationListItemDto {
    #[serde(flatten)]
    pub location: LocationDto,
    pub category: Option<CategoryRefDto>,
    pub creator: Option<UserSummaryDto>,
}

/// Full location view: relations, attached infrastructure and audit history (newest first)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationDetailDto {
    #[serde(flatten)]
    pub location: LocationDto,
    pub category: Option<CategoryRefDto>,
    pub creator: Option<UserSummaryDto>,
    pub infrastructure: Vec<InfrastructureDto>,
    pub history: Vec<DataLogDto>,
}

/// Request DTO for creating a location
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocationDto {
    #[validate(
        length(min = 1, max = 255, message = "Name must be 1-255 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,

    pub description: Option<String>,

    pub address: Option<String>,

    #[validate(custom(function = "validate_geometry"))]
    pub geometry: Geometry,

    #[schema(value_type = Option<Object>)]
    pub properties: Option<Map<String, Value>>,

    pub photos: Option<Vec<String>>,

    pub status: Option<LocationStatus>,

    #[validate(length(min = 1, message = "categoryId is required"))]
    pub category_id: String,

    pub created_by: Uuid,
}

/// Request DTO for a partial location update.
/// Absent fields are kept; `null` clears optional fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLocationDto {
    #[validate(
        length(min = 1, max = 255, message = "Name must be 1-255 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,

    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub address: Option<Option<String>>,

    #[validate(custom(function = "validate_geometry"))]
    pub geometry: Option<Geometry>,

    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<Object>)]
    pub properties: Option<Option<Map<String, Value>>>,

    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<Vec<String>>)]
    pub photos: Option<Option<Vec<String>>>,

    pub status: Option<LocationStatus>,

    #[validate(length(min = 1, message = "categoryId must not be empty"))]
    pub category_id: Option<String>,

    /// Acting user; defaults to the admin-like user
    pub user_id: Option<Uuid>,
}

/// Query params for listing locations
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct LocationListQuery {
    /// Exact category id
    #[serde(default, deserialize_with = "empty_as_none")]
    pub category_id: Option<String>,
    /// Exact status
    #[serde(default, deserialize_with = "empty_as_none")]
    pub status: Option<LocationStatus>,
    /// Case-insensitive substring over name, description and address
    #[serde(default, deserialize_with = "empty_as_none")]
    pub search: Option<String>,
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: i64,
    /// Items per page (max 500)
    #[serde(default = "default_page_size")]
    pub limit: i64,
}

impl LocationListQuery {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery::new(self.page, self.limit)
    }

    pub fn filter(&self) -> LocationFilter {
        LocationFilter {
            category_id: self.category_id.clone(),
            status: self.status,
            search: self.search.clone(),
        }
    }
}

/// Filter applied by the location repository
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationFilter {
    pub category_id: Option<String>,
    pub status: Option<LocationStatus>,
    pub search: Option<String>,
}

/// Query params for deleting a location
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct DeleteLocationQuery {
    /// Acting user; defaults to the admin-like user
    #[serde(default, deserialize_with = "empty_as_none")]
    pub user_id: Option<Uuid>,
}
