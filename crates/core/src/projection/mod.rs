//! Cash-flow projection over a fiscal year.
//!
//! Combines the budget with monthly actuals into twelve rows carrying running
//! actual and budgeted balances, and raises the year-end low balance warning.

pub mod engine;
pub mod error;
pub mod service;
pub mod warnings;


pub use engine::{ProjectionRow, generate_cash_flow_projection};
pub use error::ProjectionError;
pub use service::{ProjectionOverview, ProjectionService, YearOverview};
pub use warnings::{BalanceWarning, DEFAULT_LOW_BALANCE_THRESHOLD, check_balance_warnings};
