use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::Category;

/// Persistence for categories, including soft-deleted rows
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Every category, active or not, ordered by name
    async fn list_all(&self) -> Result<Vec<Category>>;

    async fn find(&self, id: &str) -> Result<Option<Category>>;

    /// Fails with `Conflict` when the id is taken
    async fn insert(&self, category: &Category) -> Result<()>;

    async fn update(&self, category: &Category) -> Result<bool>;

    /// Soft delete. Returns false when the id is unknown.
    async fn deactivate(&self, id: &str) -> Result<bool>;

    /// Number of locations per category id
    async fn location_counts(&self) -> Result<HashMap<String, i64>>;
}

const CATEGORY_COLUMNS: &str =
    "id, name, icon, color, description, parent_id, is_active, created_at, updated_at";

pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn list_all(&self) -> Result<Vec<Category>> {
        sqlx::query_as::<_, Category>(&format!(
            "SELECT {} FROM categories ORDER BY name ASC",
            CATEGORY_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find(&self, id: &str) -> Result<Option<Category>> {
        sqlx::query_as::<_, Category>(&format!(
            "SELECT {} FROM categories WHERE id = $1",
            CATEGORY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get category: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn insert(&self, category: &Category) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO categories
                (id, name, icon, color, description, parent_id, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(&category.id)
        .bind(&category.name)
        .bind(&category.icon)
        .bind(&category.color)
        .bind(&category.description)
        .bind(&category.parent_id)
        .bind(category.is_active)
        .bind(category.created_at)
        .bind(category.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create category: {:?}", e);
            AppError::from_write(e, &format!("Category '{}'", category.id))
        })?;

        Ok(())
    }

    async fn update(&self, category: &Category) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE categories
            SET name = $2, icon = $3, color = $4, description = $5, parent_id = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(&category.id)
        .bind(&category.name)
        .bind(&category.icon)
        .bind(&category.color)
        .bind(&category.description)
        .bind(&category.parent_id)
        .bind(category.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update category: {:?}", e);
            AppError::from_write(e, "Category")
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn deactivate(&self, id: &str) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE categories SET is_active = FALSE, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to deactivate category: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn location_counts(&self) -> Result<HashMap<String, i64>> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT category_id, COUNT(*) FROM locations GROUP BY category_id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count locations per category: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(rows.into_iter().collect())
    }
}
