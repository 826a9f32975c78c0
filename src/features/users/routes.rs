use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::users::handlers::user_handler;
use crate::features::users::services::UserService;

pub fn routes(service: Arc<UserService>) -> Router {
    Router::new()
        .route("/api/users/default", get(user_handler::get_default_user))
        .with_state(service)
}
