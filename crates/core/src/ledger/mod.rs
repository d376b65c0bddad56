//! Transaction ledger: classification, validation and monthly actuals.
//!
//! This module implements:
//! - Transaction records and their revenue/OPEX/CAPEX/G&A classification
//! - Boundary validation for transactions entering storage
//! - Aggregation into twelve fiscal-month actuals
//! - Category grouping for reports

pub mod actuals;
pub mod category;
pub mod error;
pub mod types;
pub mod validation;


pub use actuals::{
    MonthlyActual, MonthlyActuals, UnclassifiedTransactionWarning, calculate_monthly_actuals,
};
pub use category::{CategoryTotal, expense_by_category, revenue_by_category};
pub use error::LedgerError;
pub use types::{
    Classification, ExpenseType, FlowAmounts, Transaction, TransactionType, UnclassifiedReason,
};
pub use validation::validate_transaction;
