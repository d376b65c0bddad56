//! Fiscal calendar error types.

use thiserror::Error;

use clubfin_shared::AppError;

/// Fiscal calendar errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FiscalError {
    /// Fiscal month index outside 0-11.
    #[error("Fiscal month out of range: {0} (expected 0-11)")]
    MonthOutOfRange(i64),
}

impl From<FiscalError> for AppError {
    fn from(err: FiscalError) -> Self {
        Self::Validation(err.to_string())
    }
}
