//! Refund validation at the member-edit boundary.

use rust_decimal::Decimal;

use super::error::MembershipError;
use super::types::Member;

/// Checks that a refunded member carries complete, consistent refund data.
///
/// Members that are not refunded always pass.
///
/// # Errors
///
/// Returns the first refund rule the member breaks.
pub fn validate_refund(member: &Member) -> Result<(), MembershipError> {
    if !member.refunded {
        return Ok(());
    }

    let Some(paid_on) = member.date_paid else {
        return Err(MembershipError::RefundWithoutPayment);
    };

    let amount = match member.refund_amount {
        Some(amount) if amount > Decimal::ZERO => amount,
        _ => return Err(MembershipError::InvalidRefundAmount),
    };

    if amount > member.dues.total_realized {
        return Err(MembershipError::RefundExceedsDues {
            amount,
            realized: member.dues.total_realized,
        });
    }

    match member.refund_date {
        Some(date) if date >= paid_on => {}
        _ => return Err(MembershipError::InvalidRefundDate),
    }

    if member
        .refund_reason
        .as_deref()
        .is_none_or(|reason| reason.trim().is_empty())
    {
        return Err(MembershipError::MissingRefundReason);
    }

    Ok(())
}
