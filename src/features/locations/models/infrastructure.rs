use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::geometry::Geometry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "infrastructure_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InfrastructureType {
    Jalan,
    Jembatan,
    Drainase,
    Irigasi,
    GarduListrik,
    LampuJalan,
    PipaAir,
    MenaraTelekomunikasi,
}

/// Physical asset attached to a location (road segment, bridge, drain, ...)
#[derive(Debug, Clone, FromRow)]
pub struct Infrastructure {
    pub id: Uuid,
    #[sqlx(rename = "type")]
    pub kind: InfrastructureType,
    pub condition: Option<String>,
    pub length_km: Option<f64>,
    pub width_m: Option<f64>,
    pub construction_year: Option<i32>,
    pub last_maintenance_year: Option<i32>,
    pub geometry: Json<Geometry>,
    pub properties: Option<Json<Map<String, Value>>>,
    pub location_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
