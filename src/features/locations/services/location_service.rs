use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use sqlx::types::Json;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::CategoryRefDto;
use crate::features::categories::repositories::CategoryRepository;
use crate::features::locations::dtos::{
    CreateLocationDto, LocationDetailDto, LocationDto, LocationListItemDto, LocationListQuery,
    UpdateLocationDto,
};
use crate::features::locations::models::{DataLog, Location, LogAction};
use crate::features::locations::repositories::LocationRepository;
use crate::features::users::UserService;
use crate::shared::constants::LOCATION_TABLE;
use crate::shared::geometry::Bounds;
use crate::shared::types::Paginated;

/// Service for location operations. Every mutation appends an audit row.
pub struct LocationService {
    locations: Arc<dyn LocationRepository>,
    categories: Arc<dyn CategoryRepository>,
    users: Arc<UserService>,
}

impl LocationService {
    pub fn new(
        locations: Arc<dyn LocationRepository>,
        categories: Arc<dyn CategoryRepository>,
        users: Arc<UserService>,
    ) -> Self {
        Self {
            locations,
            categories,
            users,
        }
    }

    /// Filtered, paginated list, newest first
    pub async fn list(&self, query: &LocationListQuery) -> Result<Paginated<LocationListItemDto>> {
        let pagination = query.pagination();
        let (locations, total) = self
            .locations
            .list(&query.filter(), pagination.offset(), pagination.limit)
            .await?;

        let items = self.with_relations(locations).await?;
        Ok(Paginated::new(items, pagination, total))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<LocationDetailDto> {
        let location = self.find_or_404(id).await?;
        let infrastructure = self.locations.infrastructure(id).await?;
        let history = self.locations.history(id).await?;

        let mut items = self.with_relations(vec![location]).await?;
        let item = items
            .pop()
            .ok_or_else(|| AppError::Internal("Location vanished while loading".to_string()))?;

        Ok(LocationDetailDto {
            location: item.location,
            category: item.category,
            creator: item.creator,
            infrastructure: infrastructure.into_iter().map(Into::into).collect(),
            history: history.into_iter().map(Into::into).collect(),
        })
    }

    /// Insert a location and its CREATE audit row atomically
    pub async fn create(&self, dto: CreateLocationDto) -> Result<LocationListItemDto> {
        self.require_category(&dto.category_id).await?;
        self.users.require(dto.created_by, "createdBy").await?;

        let now = Utc::now();
        let location = Location {
            id: Uuid::now_v7(),
            name: dto.name.trim().to_string(),
            description: dto.description.clone(),
            address: dto.address.clone(),
            geometry: Json(dto.geometry.clone()),
            properties: dto.properties.clone().map(Json),
            photos: dto.photos.clone().map(Json),
            status: dto.status.unwrap_or_default(),
            category_id: dto.category_id.clone(),
            created_by: dto.created_by,
            created_at: now,
            updated_at: now,
        };

        let log = audit_row(
            location.id,
            LogAction::Create,
            None,
            Some(snapshot(&dto)?),
            dto.created_by,
            Some(location.id),
        );

        self.locations.insert(&location, &log).await?;
        tracing::info!("Created location {} ({})", location.id, location.name);

        self.single_with_relations(location).await
    }

    /// Merge provided fields and append an UPDATE audit row atomically
    pub async fn update(&self, id: Uuid, dto: UpdateLocationDto) -> Result<LocationListItemDto> {
        let existing = self.find_or_404(id).await?;
        let actor = self.users.resolve_actor(dto.user_id).await?;

        if let Some(category_id) = &dto.category_id {
            if *category_id != existing.category_id {
                self.require_category(category_id).await?;
            }
        }

        let before = LocationDto::from(existing.clone());
        let mut location = existing;

        if let Some(name) = dto.name {
            location.name = name.trim().to_string();
        }
        if let Some(description) = dto.description {
            location.description = description;
        }
        if let Some(address) = dto.address {
            location.address = address;
        }
        if let Some(geometry) = dto.geometry {
            location.geometry = Json(geometry);
        }
        if let Some(properties) = dto.properties {
            location.properties = properties.map(Json);
        }
        if let Some(photos) = dto.photos {
            location.photos = photos.map(Json);
        }
        if let Some(status) = dto.status {
            location.status = status;
        }
        if let Some(category_id) = dto.category_id {
            location.category_id = category_id;
        }
        location.updated_at = Utc::now();

        let after = LocationDto::from(location.clone());
        let log = audit_row(
            id,
            LogAction::Update,
            Some(snapshot(&before)?),
            Some(snapshot(&after)?),
            actor,
            Some(id),
        );

        if !self.locations.update(&location, &log).await? {
            return Err(not_found(id));
        }
        tracing::info!("Updated location {}", id);

        self.single_with_relations(location).await
    }

    /// Remove a location and append a DELETE audit row atomically.
    /// The audit row keeps the old snapshot but no location reference.
    pub async fn delete(&self, id: Uuid, user_id: Option<Uuid>) -> Result<()> {
        let existing = self.find_or_404(id).await?;
        let actor = self.users.resolve_actor(user_id).await?;

        let log = audit_row(
            id,
            LogAction::Delete,
            Some(snapshot(&LocationDto::from(existing))?),
            None,
            actor,
            None,
        );

        if !self.locations.delete(id, &log).await? {
            return Err(not_found(id));
        }
        tracing::info!("Deleted location {}", id);
        Ok(())
    }

    /// Point locations inside the viewport, edges inclusive
    pub async fn list_in_bounds(&self, bounds: &Bounds) -> Result<Vec<LocationListItemDto>> {
        bounds.check().map_err(AppError::BadRequest)?;

        let inside: Vec<Location> = self
            .locations
            .list_all()
            .await?
            .into_iter()
            .filter(|l| {
                l.geometry
                    .as_point()
                    .is_some_and(|(lon, lat)| bounds.contains(lon, lat))
            })
            .collect();

        self.with_relations(inside).await
    }

    async fn find_or_404(&self, id: Uuid) -> Result<Location> {
        self.locations
            .find(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    async fn require_category(&self, category_id: &str) -> Result<()> {
        match self.categories.find(category_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::Validation(format!(
                "Category '{}' does not exist",
                category_id
            ))),
        }
    }

    async fn single_with_relations(&self, location: Location) -> Result<LocationListItemDto> {
        self.with_relations(vec![location])
            .await?
            .pop()
            .ok_or_else(|| AppError::Internal("Location vanished while loading".to_string()))
    }

    /// Attach category and creator summaries
    async fn with_relations(&self, locations: Vec<Location>) -> Result<Vec<LocationListItemDto>> {
        if locations.is_empty() {
            return Ok(Vec::new());
        }

        let categories: HashMap<String, CategoryRefDto> = self
            .categories
            .list_all()
            .await?
            .iter()
            .map(|c| (c.id.clone(), CategoryRefDto::from(c)))
            .collect();

        let creator_ids: Vec<Uuid> = locations.iter().map(|l| l.created_by).collect();
        let creators = self.users.summaries(&creator_ids).await?;

        Ok(locations
            .into_iter()
            .map(|l| LocationListItemDto {
                category: categories.get(&l.category_id).cloned(),
                creator: creators.get(&l.created_by).cloned(),
                location: l.into(),
            })
            .collect())
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Location {} not found", id))
}

fn snapshot<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value)
        .map_err(|e| AppError::Internal(format!("Failed to serialize audit snapshot: {}", e)))
}

fn audit_row(
    record_id: Uuid,
    action: LogAction,
    old_values: Option<Value>,
    new_values: Option<Value>,
    user_id: Uuid,
    location_id: Option<Uuid>,
) -> DataLog {
    DataLog {
        id: Uuid::now_v7(),
        table_name: LOCATION_TABLE.to_string(),
        record_id,
        action,
        old_values: old_values.map(Json),
        new_values: new_values.map(Json),
        user_id,
        location_id,
        created_at: Utc::now(),
    }
}
