//! Hierarchical categories for locations.
//!
//! A category's id is the slug of its name at creation time. Deleting a
//! category only deactivates it, so locations filed under it keep resolving.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/categories` | Active categories with parent, children, location count |
//! | POST | `/api/categories` | Create |
//! | GET | `/api/categories/roots` | Active top-level categories |
//! | GET | `/api/categories/{id}` | Detail with locations (inactive included) |
//! | PUT | `/api/categories/{id}` | Partial update |
//! | DELETE | `/api/categories/{id}` | Soft delete |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{CategoryRepository, PgCategoryRepository};
pub use services::CategoryService;
