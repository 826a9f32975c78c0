use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "log_action", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogAction {
    Create,
    Update,
    Delete,
}

/// Append-only audit row written alongside every location mutation
#[derive(Debug, Clone, FromRow)]
pub struct DataLog {
    pub id: Uuid,
    pub table_name: String,
    pub record_id: Uuid,
    pub action: LogAction,
    pub old_values: Option<Json<Value>>,
    pub new_values: Option<Json<Value>>,
    pub user_id: Uuid,
    /// Cleared on DELETE rows; the location no longer exists
    pub location_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Audit row joined with the acting user and the location it points at
#[derive(Debug, Clone, FromRow)]
pub struct DataLogDetail {
    #[sqlx(flatten)]
    pub log: DataLog,
    pub username: Option<String>,
    pub user_full_name: Option<String>,
    pub location_name: Option<String>,
}
