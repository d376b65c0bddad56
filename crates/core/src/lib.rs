//! Core business logic for Clubfin.
//!
//! This crate contains the fiscal-year accounting engine with ZERO database
//! dependencies. All domain types, validation rules, and calculations live
//! here; storage is reached only through the `ClubStore` trait.
//!
//! # Modules
//!
//! - `fiscal` - October-start fiscal calendar
//! - `ledger` - Transaction classification and monthly actuals
//! - `membership` - Dues, bylaw compliance, refunds and the dues ledger link
//! - `budget` - Budgets, CAPEX planning and budget performance
//! - `projection` - Cash-flow projection and year-end warnings
//! - `rollover` - Year-end roll-forward
//! - `reports` - Board report data
//! - `settings` - Club-wide category and payment method lists
//! - `store` - Storage collaborator contract

pub mod budget;
pub mod fiscal;
pub mod ledger;
pub mod membership;
pub mod projection;
pub mod reports;
pub mod rollover;
pub mod settings;
pub mod store;
