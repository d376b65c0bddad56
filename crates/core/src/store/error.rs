//! Storage collaborator error types.

use thiserror::Error;

use clubfin_shared::AppError;

use crate::ledger::LedgerError;

/// Errors surfaced by a `ClubStore` implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Document does not exist.
    #[error("{collection} document not found: {id}")]
    NotFound {
        /// Collection name.
        collection: &'static str,
        /// Document id.
        id: String,
    },

    /// Document with the same id already exists.
    #[error("{collection} document already exists: {id}")]
    AlreadyExists {
        /// Collection name.
        collection: &'static str,
        /// Document id.
        id: String,
    },

    /// Document rejected at the storage boundary.
    #[error("invalid {collection} document: {message}")]
    Invalid {
        /// Collection name.
        collection: &'static str,
        /// What is wrong with it.
        message: String,
    },

    /// Stored document cannot be decoded.
    #[error("corrupt {collection} document {id}: {message}")]
    Corrupt {
        /// Collection name.
        collection: &'static str,
        /// Document id.
        id: String,
        /// Decoder message.
        message: String,
    },

    /// Backend failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(collection: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            collection,
            id: id.to_string(),
        }
    }

    /// Create an invalid document error.
    #[must_use]
    pub fn invalid(collection: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            collection,
            message: message.into(),
        }
    }
}

impl From<LedgerError> for StoreError {
    fn from(err: LedgerError) -> Self {
        Self::invalid("transactions", err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => Self::NotFound(err.to_string()),
            StoreError::AlreadyExists { .. } => Self::Conflict(err.to_string()),
            StoreError::Invalid { .. } => Self::Validation(err.to_string()),
            StoreError::Corrupt { .. } | StoreError::Backend(_) => Self::Storage(err.to_string()),
        }
    }
}
