//! Geotagged village facilities and their audit trail.
//!
//! Each create, update and delete writes the location change and one
//! `data_logs` row in the same transaction. Audit rows are never modified;
//! DELETE rows carry the old snapshot but no `location_id`.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/locations` | Paginated list (`categoryId`, `status`, `search`, `page`, `limit`) |
//! | POST | `/api/locations` | Create |
//! | GET | `/api/locations/bounds` | Point locations inside `north`/`south`/`east`/`west` |
//! | GET | `/api/locations/{id}` | Detail with infrastructure and history |
//! | PUT | `/api/locations/{id}` | Partial update (`userId` in body) |
//! | DELETE | `/api/locations/{id}` | Delete (`?userId=`) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{LocationRepository, PgLocationRepository};
pub use services::LocationService;
