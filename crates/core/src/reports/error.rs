//! Report error types.

use thiserror::Error;

use clubfin_shared::AppError;

use crate::fiscal::FiscalYear;
use crate::store::StoreError;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// No budget exists for the fiscal year.
    #[error("No budget for {0}")]
    NoBudget(FiscalYear),

    /// Storage collaborator failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::NoBudget(_) => Self::NotFound(err.to_string()),
            ReportError::Store(inner) => inner.into(),
        }
    }
}
