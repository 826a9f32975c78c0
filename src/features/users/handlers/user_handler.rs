use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::users::dtos::DefaultUserDto;
use crate::features::users::services::UserService;
use crate::shared::types::ApiResponse;

#[utoipa::path(
    get,
    path = "/api/users/default",
    responses(
        (status = 200, description = "Default user retrieved successfully", body = ApiResponse<DefaultUserDto>),
        (status = 404, description = "No users exist")
    ),
    tag = "users"
)]
pub async fn get_default_user(
    State(service): State<Arc<UserService>>,
) -> Result<Json<ApiResponse<DefaultUserDto>>> {
    let user = service.default_user().await?;
    Ok(Json(ApiResponse::success(Some(user), None)))
}
