use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::locations::models::{Infrastructure, InfrastructureType};
use crate::shared::geometry::Geometry;

/// Response DTO for infrastructure attached to a location
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InfrastructureDto {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: InfrastructureType,
    pub condition: Option<String>,
    pub length_km: Option<f64>,
    pub width_m: Option<f64>,
    pub construction_year: Option<i32>,
    pub last_maintenance_year: Option<i32>,
    pub geometry: Geometry,
    #[schema(value_type = Option<Object>)]
    pub properties: Option<Map<String, Value>>,
    pub location_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Infrastructure> for InfrastructureDto {
    fn from(i: Infrastructure) -> Self {
        Self {
            id: i.id,
            kind: i.kind,
            condition: i.condition,
            length_km: i.length_km,
            width_m: i.width_m,
            construction_year: i.construction_year,
            last_maintenance_year: i.last_maintenance_year,
            geometry: i.geometry.0,
            properties: i.properties.map(|p| p.0),
            location_id: i.location_id,
            created_at: i.created_at,
            updated_at: i.updated_at,
        }
    }
}
