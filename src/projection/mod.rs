//! Read-only snapshot projections for the dashboard and report views.

pub mod dashboard;
pub mod report;

pub use dashboard::{DashboardProjector, DashboardSnapshot};
pub use report::{HighestMonth, ReportProjector, ReportSnapshot, ReportSummary, TopCategory};
