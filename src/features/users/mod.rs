//! Staff accounts used for audit attribution and report assignment.
//!
//! There is no login flow: callers pass a `userId` and it is trusted as-is.
//! When none is given, the default (admin-like) user is used.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/users/default` | Admin-like user for attribution |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{PgUserRepository, UserRepository};
pub use services::UserService;
