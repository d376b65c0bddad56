//! Ledger error types.

use rust_decimal::Decimal;
use thiserror::Error;

use clubfin_shared::AppError;

/// Errors raised when a transaction is rejected at the storage boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Amount is zero or negative.
    #[error("Transaction amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Amount carries sub-cent precision.
    #[error("Transaction amount must have at most 2 decimal places, got {0}")]
    TooPrecise(Decimal),

    /// Expense without an expense type.
    #[error("Expense transactions require an expense type")]
    MissingExpenseType,

    /// Revenue carrying an expense type.
    #[error("Revenue transactions must not carry an expense type")]
    UnexpectedExpenseType,

    /// Unrecognized transaction type.
    #[error("Unknown transaction type: {0}")]
    UnknownType(String),

    /// Unrecognized expense type.
    #[error("Unknown expense type: {0}")]
    UnknownExpenseType(String),

    /// Category is blank.
    #[error("Transaction category is required")]
    EmptyCategory,
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        Self::Validation(err.to_string())
    }
}
