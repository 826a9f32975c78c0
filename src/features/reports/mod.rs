//! Issue reports submitted by residents.
//!
//! Reports start OPEN, move to IN_PROGRESS when assigned to a staff user and
//! end RESOLVED. Report changes are not audited.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/reports` | Paginated list (`status`, `reportType`, `search`, `page`, `limit`) |
//! | POST | `/api/reports` | Submit |
//! | GET | `/api/reports/stats` | Counts by status |
//! | GET | `/api/reports/{id}` | Detail |
//! | PUT | `/api/reports/{id}` | Partial update |
//! | PATCH | `/api/reports/{id}` | Status and/or assignee |
//! | DELETE | `/api/reports/{id}` | Delete |
//! | POST | `/api/reports/{id}/assign` | Assign (IN_PROGRESS) |
//! | POST | `/api/reports/{id}/resolve` | Resolve |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{PgReportRepository, ReportRepository};
pub use services::ReportService;
