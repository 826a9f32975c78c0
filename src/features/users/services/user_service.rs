use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::users::dtos::{DefaultUserDto, UserSummaryDto};
use crate::features::users::models::User;
use crate::features::users::repositories::UserRepository;

/// Service for user lookups and acting-user resolution
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Admin-like user used for attribution when no session exists
    pub async fn default_user(&self) -> Result<DefaultUserDto> {
        self.users
            .find_default()
            .await?
            .map(DefaultUserDto::from)
            .ok_or_else(|| {
                AppError::NotFound("No users found in database. Please seed users first.".into())
            })
    }

    /// Ensure a referenced user exists
    pub async fn require(&self, id: Uuid, field: &str) -> Result<User> {
        self.users
            .find(id)
            .await?
            .ok_or_else(|| AppError::Validation(format!("{} {} does not exist", field, id)))
    }

    /// Resolve the user a mutation is attributed to.
    /// An explicit id must exist; otherwise fall back to the default user.
    pub async fn resolve_actor(&self, user_id: Option<Uuid>) -> Result<Uuid> {
        match user_id {
            Some(id) => self.require(id, "userId").await.map(|u| u.id),
            None => self
                .users
                .find_default()
                .await?
                .map(|u| u.id)
                .ok_or_else(|| {
                    AppError::Validation(
                        "userId is required: no default user is available".to_string(),
                    )
                }),
        }
    }

    /// Summaries keyed by id for embedding in responses
    pub async fn summaries(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, UserSummaryDto>> {
        let mut unique: Vec<Uuid> = ids.to_vec();
        unique.sort();
        unique.dedup();

        let users = self.users.find_many(&unique).await?;
        Ok(users
            .iter()
            .map(|u| (u.id, UserSummaryDto::from(u)))
            .collect())
    }
}
