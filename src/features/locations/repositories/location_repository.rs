use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::locations::dtos::LocationFilter;
use crate::features::locations::models::{DataLog, DataLogDetail, Infrastructure, Location};
use crate::shared::search::contains_pattern;

/// Persistence for locations and their audit trail.
///
/// Every mutation takes the audit row to append with it; implementations
/// must persist both or neither.
#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// Filtered page, newest first, plus the total matching count
    async fn list(
        &self,
        filter: &LocationFilter,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Location>, i64)>;

    async fn list_all(&self) -> Result<Vec<Location>>;

    async fn list_by_category(&self, category_id: &str) -> Result<Vec<Location>>;

    async fn find(&self, id: Uuid) -> Result<Option<Location>>;

    /// Audit rows for a location, newest first
    async fn history(&self, location_id: Uuid) -> Result<Vec<DataLogDetail>>;

    async fn infrastructure(&self, location_id: Uuid) -> Result<Vec<Infrastructure>>;

    async fn insert(&self, location: &Location, log: &DataLog) -> Result<()>;

    /// Returns false (and writes nothing) when the location is gone
    async fn update(&self, location: &Location, log: &DataLog) -> Result<bool>;

    /// Returns false (and writes nothing) when the location is gone
    async fn delete(&self, id: Uuid, log: &DataLog) -> Result<bool>;
}

const LOCATION_COLUMNS: &str = "id, name, description, address, geometry, properties, photos, \
     status, category_id, created_by, created_at, updated_at";

/// Columns for `DataLogDetail`; expects `data_logs dl`, `users u`, `locations l`
pub const DATA_LOG_DETAIL_COLUMNS: &str = "dl.id, dl.table_name, dl.record_id, dl.action, \
     dl.old_values, dl.new_values, dl.user_id, dl.location_id, dl.created_at, \
     u.username, u.full_name AS user_full_name, l.name AS location_name";

pub struct PgLocationRepository {
    pool: PgPool,
}

impl PgLocationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &LocationFilter) {
    builder.push(" WHERE TRUE");

    if let Some(category_id) = &filter.category_id {
        builder.push(" AND category_id = ").push_bind(category_id.clone());
    }
    if let Some(status) = filter.status {
        builder.push(" AND status = ").push_bind(status);
    }
    if let Some(search) = &filter.search {
        let pattern = contains_pattern(search);
        builder
            .push(" AND (name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR address ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

async fn insert_log<'c, E>(executor: E, log: &DataLog) -> std::result::Result<(), sqlx::Error>
where
    E: sqlx::PgExecutor<'c>,
{
    sqlx::query(
        r#"
        INSERT INTO data_logs
            (id, table_name, record_id, action, old_values, new_values, user_id, location_id, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(log.id)
    .bind(&log.table_name)
    .bind(log.record_id)
    .bind(log.action)
    .bind(&log.old_values)
    .bind(&log.new_values)
    .bind(log.user_id)
    .bind(log.location_id)
    .bind(log.created_at)
    .execute(executor)
    .await?;

    Ok(())
}

#[async_trait]
impl LocationRepository for PgLocationRepository {
    async fn list(
        &self,
        filter: &LocationFilter,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Location>, i64)> {
        let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM locations");
        push_filter(&mut count_query, filter);
        let total: i64 = count_query
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count locations: {:?}", e);
                AppError::Database(e)
            })?;

        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM locations",
            LOCATION_COLUMNS
        ));
        push_filter(&mut query, filter);
        query
            .push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let locations = query
            .build_query_as::<Location>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list locations: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((locations, total))
    }

    async fn list_all(&self) -> Result<Vec<Location>> {
        sqlx::query_as::<_, Location>(&format!(
            "SELECT {} FROM locations ORDER BY created_at DESC",
            LOCATION_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load locations: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn list_by_category(&self, category_id: &str) -> Result<Vec<Location>> {
        sqlx::query_as::<_, Location>(&format!(
            "SELECT {} FROM locations WHERE category_id = $1 ORDER BY created_at DESC",
            LOCATION_COLUMNS
        ))
        .bind(category_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list locations by category: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find(&self, id: Uuid) -> Result<Option<Location>> {
        sqlx::query_as::<_, Location>(&format!(
            "SELECT {} FROM locations WHERE id = $1",
            LOCATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get location: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn history(&self, location_id: Uuid) -> Result<Vec<DataLogDetail>> {
        sqlx::query_as::<_, DataLogDetail>(&format!(
            r#"
            SELECT {}
            FROM data_logs dl
            LEFT JOIN users u ON u.id = dl.user_id
            LEFT JOIN locations l ON l.id = dl.location_id
            WHERE dl.location_id = $1
            ORDER BY dl.created_at DESC, dl.id DESC
            "#,
            DATA_LOG_DETAIL_COLUMNS
        ))
        .bind(location_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get location history: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn infrastructure(&self, location_id: Uuid) -> Result<Vec<Infrastructure>> {
        sqlx::query_as::<_, Infrastructure>(
            r#"
            SELECT id, type, condition, length_km, width_m, construction_year,
                   last_maintenance_year, geometry, properties, location_id, created_at, updated_at
            FROM infrastructures
            WHERE location_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(location_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get infrastructure: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn insert(&self, location: &Location, log: &DataLog) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO locations
                (id, name, description, address, geometry, properties, photos, status,
                 category_id, created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(location.id)
        .bind(&location.name)
        .bind(&location.description)
        .bind(&location.address)
        .bind(&location.geometry)
        .bind(&location.properties)
        .bind(&location.photos)
        .bind(location.status)
        .bind(&location.category_id)
        .bind(location.created_by)
        .bind(location.created_at)
        .bind(location.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create location: {:?}", e);
            AppError::from_write(e, "Location")
        })?;

        insert_log(&mut *tx, log).await.map_err(|e| {
            tracing::error!("Failed to write location audit row: {:?}", e);
            AppError::from_write(e, "Audit entry")
        })?;

        tx.commit().await?;
        Ok(())
    }

    async fn update(&self, location: &Location, log: &DataLog) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE locations
            SET name = $2, description = $3, address = $4, geometry = $5, properties = $6,
                photos = $7, status = $8, category_id = $9, updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(location.id)
        .bind(&location.name)
        .bind(&location.description)
        .bind(&location.address)
        .bind(&location.geometry)
        .bind(&location.properties)
        .bind(&location.photos)
        .bind(location.status)
        .bind(&location.category_id)
        .bind(location.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update location: {:?}", e);
            AppError::from_write(e, "Location")
        })?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        insert_log(&mut *tx, log).await.map_err(|e| {
            tracing::error!("Failed to write location audit row: {:?}", e);
            AppError::from_write(e, "Audit entry")
        })?;

        tx.commit().await?;
        Ok(true)
    }

    async fn delete(&self, id: Uuid, log: &DataLog) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM locations WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete location: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        insert_log(&mut *tx, log).await.map_err(|e| {
            tracing::error!("Failed to write location audit row: {:?}", e);
            AppError::from_write(e, "Audit entry")
        })?;

        tx.commit().await?;
        Ok(true)
    }
}
