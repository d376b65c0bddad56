//! Projection service error types.

use thiserror::Error;

use clubfin_shared::AppError;

use crate::budget::BudgetError;
use crate::store::StoreError;

/// Projection service errors.
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// Budget operation failed.
    #[error(transparent)]
    Budget(#[from] BudgetError),

    /// Storage collaborator failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ProjectionError> for AppError {
    fn from(err: ProjectionError) -> Self {
        match err {
            ProjectionError::Budget(inner) => inner.into(),
            ProjectionError::Store(inner) => inner.into(),
        }
    }
}
