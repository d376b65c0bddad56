//! Board report generation.
//!
//! Combines the projection, year-to-date performance, membership counts,
//! category grouping and CAPEX/maintenance lists into the `ReportData` a
//! document exporter renders.

pub mod error;
pub mod service;
pub mod types;


pub use error::ReportError;
pub use service::{BoardReporter, DEFAULT_MAINTENANCE_HORIZON_DAYS, ReportService};
pub use types::{CompletedMaintenance, ReportData, ReportInput};
