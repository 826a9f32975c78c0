use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for category.
/// `id` is the slug of the name at creation time and never changes.
#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub parent_id: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
