use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::users::models::User;
use crate::shared::constants::DEFAULT_ADMIN_USERNAME;

/// Read access to user accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find(&self, id: Uuid) -> Result<Option<User>>;

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<User>>;

    /// First admin-like user (username `admin` or role ADMIN), otherwise the oldest user
    async fn find_default(&self) -> Result<Option<User>>;
}

const USER_COLUMNS: &str =
    "id, username, email, full_name, role, is_active, created_at, updated_at";

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find(&self, id: Uuid) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get user: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = ANY($1)",
            USER_COLUMNS
        ))
        .bind(ids.to_vec())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get users: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_default(&self) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {}
            FROM users
            ORDER BY (username = $1 OR role = 'ADMIN') DESC, created_at ASC
            LIMIT 1
            "#,
            USER_COLUMNS
        ))
        .bind(DEFAULT_ADMIN_USERNAME)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get default user: {:?}", e);
            AppError::Database(e)
        })
    }
}
