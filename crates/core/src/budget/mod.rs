//! Budgets, CAPEX planning and budget vs actual performance.
//!
//! This module implements:
//! - The fiscal-year budget with twelve monthly lines and month locking
//! - The single authoritative CAPEX line recalculation and its repair
//! - Major maintenance annotations and replacement alerts
//! - Year-to-date budget performance

pub mod alerts;
pub mod error;
pub mod planner;
pub mod service;
pub mod types;
pub mod variance;

#[cfg(test)]
mod tests;

pub use alerts::{CapexAlert, MaintenanceAlert, capex_alerts, maintenance_alerts};
pub use error::BudgetError;
pub use planner::CapexPlanner;
pub use service::{BudgetService, MAINTENANCE_NOTE_PREFIX};
pub use types::{
    Budget, CapexProject, MaintenanceOccurrence, MajorMaintenanceItem, MonthlyBudgetLine,
};
pub use variance::{BudgetPerformance, BudgetVariance, VarianceType, calculate_budget_performance};
