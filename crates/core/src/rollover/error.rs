//! Year-end roll-forward error types.

use thiserror::Error;

use clubfin_shared::AppError;

use crate::fiscal::FiscalYear;
use crate::store::StoreError;

/// Roll-forward errors.
#[derive(Debug, Error)]
pub enum RolloverError {
    /// The closing year has no budget to roll forward.
    #[error("No budget for {0}")]
    BudgetMissing(FiscalYear),

    /// The next year already has a budget.
    #[error("A budget for {0} already exists")]
    NextYearExists(FiscalYear),

    /// Storage collaborator failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<RolloverError> for AppError {
    fn from(err: RolloverError) -> Self {
        match err {
            RolloverError::BudgetMissing(_) => Self::NotFound(err.to_string()),
            RolloverError::NextYearExists(_) => Self::Conflict(err.to_string()),
            RolloverError::Store(inner) => inner.into(),
        }
    }
}
