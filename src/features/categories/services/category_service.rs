use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{
    CategoryDetailDto, CategoryListItemDto, CategoryRefDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::models::Category;
use crate::features::categories::repositories::CategoryRepository;
use crate::features::locations::dtos::{LocationDto, LocationListItemDto};
use crate::features::locations::repositories::LocationRepository;
use crate::features::users::UserService;
use crate::shared::validation::{slugify, SLUG_REGEX};

/// Service for category operations
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
    locations: Arc<dyn LocationRepository>,
    users: Arc<UserService>,
}

impl CategoryService {
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        locations: Arc<dyn LocationRepository>,
        users: Arc<UserService>,
    ) -> Self {
        Self {
            categories,
            locations,
            users,
        }
    }

    /// List active categories ordered by name
    pub async fn list(&self) -> Result<Vec<CategoryListItemDto>> {
        let all = self.categories.list_all().await?;
        let counts = self.categories.location_counts().await?;

        Ok(all
            .iter()
            .filter(|c| c.is_active)
            .map(|c| list_item(c, &all, &counts))
            .collect())
    }

    /// List active top-level categories
    pub async fn list_roots(&self) -> Result<Vec<CategoryListItemDto>> {
        let all = self.categories.list_all().await?;
        let counts = self.categories.location_counts().await?;

        Ok(all
            .iter()
            .filter(|c| c.is_active && c.parent_id.is_none())
            .map(|c| list_item(c, &all, &counts))
            .collect())
    }

    /// Get any category, including soft-deleted ones, with its locations
    pub async fn get_by_id(&self, id: &str) -> Result<CategoryDetailDto> {
        let category = self.find_or_404(id).await?;
        let all = self.categories.list_all().await?;
        let locations = self.locations.list_by_category(id).await?;

        let creator_ids: Vec<_> = locations.iter().map(|l| l.created_by).collect();
        let creators = self.users.summaries(&creator_ids).await?;
        let category_ref = CategoryRefDto::from(&category);

        let locations = locations
            .into_iter()
            .map(|l| {
                let creator = creators.get(&l.created_by).cloned();
                LocationListItemDto {
                    location: LocationDto::from(l),
                    category: Some(category_ref.clone()),
                    creator,
                }
            })
            .collect();

        Ok(CategoryDetailDto {
            parent: parent_of(&category, &all),
            children: all
                .iter()
                .filter(|c| c.parent_id.as_deref() == Some(category.id.as_str()))
                .map(CategoryRefDto::from)
                .collect(),
            category: category.into(),
            locations,
        })
    }

    /// Create a category whose id is the slug of its name
    pub async fn create(&self, dto: CreateCategoryDto) -> Result<CategoryListItemDto> {
        let name = dto.name.trim().to_string();
        let id = slugify(&name);
        if !SLUG_REGEX.is_match(&id) {
            return Err(AppError::Validation(
                "Category name must contain at least one letter or digit".to_string(),
            ));
        }

        if self.categories.find(&id).await?.is_some() {
            return Err(AppError::Conflict(format!("Category '{}' already exists", id)));
        }

        if let Some(parent_id) = &dto.parent_id {
            self.require_parent(parent_id).await?;
        }

        let now = Utc::now();
        let category = Category {
            id,
            name,
            icon: dto.icon,
            color: dto.color,
            description: dto.description,
            parent_id: dto.parent_id,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        self.categories.insert(&category).await?;
        tracing::info!("Created category '{}'", category.id);

        let all = self.categories.list_all().await?;
        Ok(list_item(&category, &all, &HashMap::new()))
    }

    /// Merge the provided fields into an existing category
    pub async fn update(&self, id: &str, dto: UpdateCategoryDto) -> Result<CategoryListItemDto> {
        let mut category = self.find_or_404(id).await?;

        if let Some(name) = dto.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(AppError::Validation(
                    "Category name must not be blank".to_string(),
                ));
            }
            category.name = name.to_string();
        }
        if let Some(icon) = dto.icon {
            category.icon = icon;
        }
        if let Some(color) = dto.color {
            category.color = color;
        }
        if let Some(description) = dto.description {
            category.description = description;
        }
        if let Some(parent_id) = dto.parent_id {
            if let Some(parent_id) = &parent_id {
                self.check_reparent(&category.id, parent_id).await?;
            }
            category.parent_id = parent_id;
        }
        category.updated_at = Utc::now();

        if !self.categories.update(&category).await? {
            return Err(AppError::NotFound(format!("Category '{}' not found", id)));
        }

        let all = self.categories.list_all().await?;
        let counts = self.categories.location_counts().await?;
        Ok(list_item(&category, &all, &counts))
    }

    /// Soft delete: the category disappears from listings but stays resolvable
    pub async fn delete(&self, id: &str) -> Result<()> {
        if !self.categories.deactivate(id).await? {
            return Err(AppError::NotFound(format!("Category '{}' not found", id)));
        }
        tracing::info!("Deactivated category '{}'", id);
        Ok(())
    }

    async fn find_or_404(&self, id: &str) -> Result<Category> {
        self.categories
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", id)))
    }

    async fn require_parent(&self, parent_id: &str) -> Result<Category> {
        self.categories.find(parent_id).await?.ok_or_else(|| {
            AppError::Validation(format!("Parent category '{}' does not exist", parent_id))
        })
    }

    /// Reject self-parenting and cycles through the ancestor chain
    async fn check_reparent(&self, id: &str, parent_id: &str) -> Result<()> {
        if parent_id == id {
            return Err(AppError::Validation(
                "A category cannot be its own parent".to_string(),
            ));
        }

        let mut ancestor = Some(self.require_parent(parent_id).await?);
        while let Some(current) = ancestor {
            match current.parent_id {
                Some(ref next) if next == id => {
                    return Err(AppError::Validation(format!(
                        "Category '{}' is a descendant of '{}'",
                        parent_id, id
                    )));
                }
                Some(ref next) => ancestor = self.categories.find(next).await?,
                None => ancestor = None,
            }
        }
        Ok(())
    }
}

fn parent_of(category: &Category, all: &[Category]) -> Option<CategoryRefDto> {
    let parent_id = category.parent_id.as_deref()?;
    all.iter()
        .find(|c| c.id == parent_id)
        .map(CategoryRefDto::from)
}

fn list_item(
    category: &Category,
    all: &[Category],
    counts: &HashMap<String, i64>,
) -> CategoryListItemDto {
    CategoryListItemDto {
        parent: parent_of(category, all),
        children: all
            .iter()
            .filter(|c| c.is_active && c.parent_id.as_deref() == Some(category.id.as_str()))
            .map(CategoryRefDto::from)
            .collect(),
        location_count: counts.get(&category.id).copied().unwrap_or(0),
        category: category.clone().into(),
    }
}
