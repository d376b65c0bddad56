//! Budget error types.

use rust_decimal::Decimal;
use thiserror::Error;

use clubfin_shared::AppError;
use clubfin_shared::types::CapexProjectId;

use crate::fiscal::{FiscalMonth, FiscalYear};
use crate::store::StoreError;

/// Budget-related errors.
#[derive(Debug, Error)]
pub enum BudgetError {
    /// No budget exists for the fiscal year.
    #[error("No budget for {0}")]
    NotFound(FiscalYear),

    /// Month is closed and cannot be edited.
    #[error("{0} is closed and cannot be modified")]
    MonthClosed(FiscalMonth),

    /// Month is already closed.
    #[error("{0} is already closed")]
    MonthAlreadyClosed(FiscalMonth),

    /// Month is not closed.
    #[error("{0} is not closed")]
    MonthNotClosed(FiscalMonth),

    /// Amount cannot be negative.
    #[error("Amount cannot be negative: {0}")]
    NegativeAmount(Decimal),

    /// Line stored at the wrong position.
    #[error("Budget line for {found} stored at position of {position}")]
    MisorderedLine {
        /// Position in the array.
        position: FiscalMonth,
        /// Month the line claims.
        found: FiscalMonth,
    },

    /// Capital project not found.
    #[error("Capital project not found: {0}")]
    ProjectNotFound(CapexProjectId),

    /// Project belongs to another fiscal year.
    #[error("Capital project is planned in {got}, expected {expected}")]
    FiscalYearMismatch {
        /// Budget's fiscal year.
        expected: FiscalYear,
        /// Project's fiscal year.
        got: FiscalYear,
    },

    /// Storage collaborator failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<BudgetError> for AppError {
    fn from(err: BudgetError) -> Self {
        match err {
            BudgetError::NotFound(_) | BudgetError::ProjectNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            BudgetError::MonthClosed(_)
            | BudgetError::MonthAlreadyClosed(_)
            | BudgetError::MonthNotClosed(_) => Self::Conflict(err.to_string()),
            BudgetError::Store(inner) => inner.into(),
            _ => Self::Validation(err.to_string()),
        }
    }
}
