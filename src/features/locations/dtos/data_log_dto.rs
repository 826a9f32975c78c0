use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::locations::models::{DataLogDetail, LogAction};

/// Acting user as recorded on an audit row
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DataLogUserDto {
    pub id: Uuid,
    pub username: Option<String>,
    pub full_name: Option<String>,
}

/// Response DTO for an audit row
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DataLogDto {
    pub id: Uuid,
    pub table_name: String,
    pub record_id: Uuid,
    pub action: LogAction,
    #[schema(value_type = Option<Object>)]
    pub old_values: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub new_values: Option<Value>,
    pub user_id: Uuid,
    pub location_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub user: DataLogUserDto,
    /// Name of the referenced location, when it still exists
    pub location_name: Option<String>,
}

impl From<DataLogDetail> for DataLogDto {
    fn from(d: DataLogDetail) -> Self {
        let log = d.log;
        Self {
            id: log.id,
            table_name: log.table_name,
            record_id: log.record_id,
            action: log.action,
            old_values: log.old_values.map(|v| v.0),
            new_values: log.new_values.map(|v| v.0),
            user_id: log.user_id,
            location_id: log.location_id,
            created_at: log.created_at,
            user: DataLogUserDto {
                id: log.user_id,
                username: d.username,
                full_name: d.user_full_name,
            },
            location_name: d.location_name,
        }
    }
}
