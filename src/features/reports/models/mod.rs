mod report;

pub use report::{PublicReport, ReportStatus};
