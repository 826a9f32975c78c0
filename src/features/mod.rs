pub mod categories;
pub mod dashboard;
pub mod locations;
pub mod reports;
pub mod users;
