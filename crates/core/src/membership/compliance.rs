//! Bylaw residency-mix compliance.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::error::MembershipError;
use super::types::{Member, OutsideOverride, Residence};

/// Maximum share of outside-neighborhood members allowed by the bylaws.
pub const MAX_OUTSIDE_PERCENTAGE: Decimal = Decimal::from_parts(50, 0, 0, false, 2);

/// Residency head counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidencyCount {
    /// Members living inside the neighborhood.
    pub inside: u32,
    /// Members living outside the neighborhood.
    pub outside: u32,
    /// All members.
    pub total: u32,
}

/// Outcome of a bylaw compliance check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// Whether the outside share is within the limit (inclusive).
    pub compliant: bool,
    /// Outside members divided by total members; zero for an empty roster.
    pub percentage: Decimal,
    /// Head counts.
    pub count: ResidencyCount,
    /// Limit applied.
    pub limit: Decimal,
    /// Outside members beyond the number the limit allows.
    pub over_limit: u32,
}

/// How an outside member was admitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdmissionDecision {
    /// Within the bylaw limit.
    WithinLimit,
    /// Over the limit, allowed by a recorded override.
    Overridden(OutsideOverride),
}

/// Counts members by residence.
#[must_use]
pub fn count_residency(members: &[Member]) -> ResidencyCount {
    members
        .iter()
        .fold(ResidencyCount::default(), |mut count, member| {
            match member.residence {
                Residence::Inside => count.inside += 1,
                Residence::Outside => count.outside += 1,
            }
            count.total += 1;
            count
        })
}

/// Checks the roster against the default 50% outside-member limit.
#[must_use]
pub fn check_bylaw_compliance(members: &[Member]) -> ComplianceReport {
    check_bylaw_compliance_with_limit(members, MAX_OUTSIDE_PERCENTAGE)
}

/// Checks the roster against `limit`.
#[must_use]
pub fn check_bylaw_compliance_with_limit(members: &[Member], limit: Decimal) -> ComplianceReport {
    evaluate(count_residency(members), limit)
}

fn evaluate(count: ResidencyCount, limit: Decimal) -> ComplianceReport {
    if count.total == 0 {
        return ComplianceReport {
            compliant: true,
            percentage: Decimal::ZERO,
            count,
            limit,
            over_limit: 0,
        };
    }

    let percentage = Decimal::from(count.outside) / Decimal::from(count.total);
    let allowed = (Decimal::from(count.total) * limit)
        .floor()
        .to_u32()
        .unwrap_or(0);

    ComplianceReport {
        compliant: percentage <= limit,
        percentage,
        count,
        limit,
        over_limit: count.outside.saturating_sub(allowed),
    }
}

/// Gates adding one more outside member to `members`.
///
/// The addition is allowed when the roster stays compliant afterwards;
/// otherwise it needs an override with a non-blank justification, which the
/// caller stores on the new member.
///
/// # Errors
///
/// Returns `MembershipError::OutsideLimitExceeded` when the limit would be
/// exceeded and no usable override was given.
pub fn check_outside_admission(
    members: &[Member],
    limit: Decimal,
    override_request: Option<OutsideOverride>,
) -> Result<AdmissionDecision, MembershipError> {
    let mut count = count_residency(members);
    count.outside += 1;
    count.total += 1;
    let projected = evaluate(count, limit);

    if projected.compliant {
        return Ok(AdmissionDecision::WithinLimit);
    }

    match override_request {
        Some(o) if !o.justification.trim().is_empty() => Ok(AdmissionDecision::Overridden(o)),
        _ => Err(MembershipError::OutsideLimitExceeded {
            percentage: projected.percentage,
            limit,
        }),
    }
}
