mod data_log;
mod infrastructure;
mod location;

pub use data_log::{DataLog, DataLogDetail, LogAction};
pub use infrastructure::{Infrastructure, InfrastructureType};
pub use location::{Location, LocationStatus};
