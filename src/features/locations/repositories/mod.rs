mod location_repository;

pub use location_repository::{LocationRepository, PgLocationRepository, DATA_LOG_DETAIL_COLUMNS};
