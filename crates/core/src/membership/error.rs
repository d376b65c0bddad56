//! Membership error types.

use rust_decimal::Decimal;
use thiserror::Error;

use clubfin_shared::AppError;
use clubfin_shared::types::MemberId;

use crate::store::StoreError;

/// Membership-related errors.
#[derive(Debug, Error)]
pub enum MembershipError {
    /// Member not found.
    #[error("Member not found: {0}")]
    NotFound(MemberId),

    /// Refund recorded without a prior payment.
    #[error("Cannot refund a member who has not paid")]
    RefundWithoutPayment,

    /// Refund amount missing or not positive.
    #[error("Refund amount must be positive")]
    InvalidRefundAmount,

    /// Refund exceeds what the club realized.
    #[error("Refund amount {amount} exceeds realized dues {realized}")]
    RefundExceedsDues {
        /// Requested refund.
        amount: Decimal,
        /// Realized dues.
        realized: Decimal,
    },

    /// Refund date missing or before the payment date.
    #[error("Refund date is missing or precedes the payment date")]
    InvalidRefundDate,

    /// Refund reason missing.
    #[error("Refund reason is required")]
    MissingRefundReason,

    /// Adding the member would break the bylaw residency limit.
    #[error("Outside members would reach {percentage} of membership, above the {limit} limit")]
    OutsideLimitExceeded {
        /// Outside share after the addition.
        percentage: Decimal,
        /// Bylaw limit.
        limit: Decimal,
    },

    /// Storage collaborator failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<MembershipError> for AppError {
    fn from(err: MembershipError) -> Self {
        match err {
            MembershipError::NotFound(_) => Self::NotFound(err.to_string()),
            MembershipError::OutsideLimitExceeded { .. } => Self::BusinessRule(err.to_string()),
            MembershipError::Store(inner) => inner.into(),
            _ => Self::Validation(err.to_string()),
        }
    }
}
