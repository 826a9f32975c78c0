use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::categories::models::Category;
use crate::features::locations::dtos::LocationListItemDto;
use crate::shared::types::deserialize_some;
use crate::shared::validation::{COLOR_REGEX, SLUG_REGEX};

/// Compact category reference embedded in other resources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRefDto {
    pub id: String,
    pub name: String,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub is_active: bool,
}

impl From<&Category> for CategoryRefDto {
    fn from(c: &Category) -> Self {
        Self {
            id: c.id.clone(),
            name: c.name.clone(),
            icon: c.icon.clone(),
            color: c.color.clone(),
            is_active: c.is_active,
        }
    }
}

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponseDto {
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

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            icon: c.icon,
            color: c.color,
            description: c.description,
            parent_id: c.parent_id,
            is_active: c.is_active,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Category as shown in listings: parent, active children and usage count
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryListItemDto {
    #[serde(flatten)]
    pub category: CategoryResponseDto,
    pub parent: Option<CategoryRefDto>,
    pub children: Vec<CategoryRefDto>,
    pub location_count: i64,
}

/// Category with parent, children and the locations filed under it
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDetailDto {
    #[serde(flatten)]
    pub category: CategoryResponseDto,
    pub parent: Option<CategoryRefDto>,
    pub children: Vec<CategoryRefDto>,
    pub locations: Vec<LocationListItemDto>,
}

/// Request DTO for creating a category. The id is derived from the name.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryDto {
    #[validate(length(min = 1, max = 150, message = "Category name is required (max 150 characters)"))]
    pub name: String,

    #[validate(length(max = 100, message = "Icon must not exceed 100 characters"))]
    pub icon: Option<String>,

    #[validate(regex(
        path = *COLOR_REGEX,
        message = "Color must be a hex value like #3B82F6"
    ))]
    pub color: Option<String>,

    pub description: Option<String>,

    #[validate(regex(path = *SLUG_REGEX, message = "Parent id must be a category slug"))]
    pub parent_id: Option<String>,
}

/// Request DTO for updating a category. The id never changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryDto {
    #[validate(length(min = 1, max = 150, message = "Category name must be 1-150 characters"))]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    #[validate(length(max = 100, message = "Icon must not exceed 100 characters"))]
    pub icon: Option<Option<String>>,

    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    #[validate(regex(
        path = *COLOR_REGEX,
        message = "Color must be a hex value like #3B82F6"
    ))]
    pub color: Option<Option<String>>,

    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,

    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    #[validate(regex(path = *SLUG_REGEX, message = "Parent id must be a category slug"))]
    pub parent_id: Option<Option<String>>,
}
