//! Roster head counts for board reports.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{Member, MemberStatus, MemberType, Residence};

/// Head counts and dues totals over a roster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipSummary {
    /// All members.
    pub total: u32,
    /// First-season members.
    pub new_members: u32,
    /// Returning members.
    pub returning: u32,
    /// Family memberships.
    pub family: u32,
    /// Single or senior memberships.
    pub single_senior: u32,
    /// Living inside the neighborhood.
    pub inside: u32,
    /// Living outside the neighborhood.
    pub outside: u32,
    /// Members whose dues are paid.
    pub paid: u32,
    /// Members who were refunded.
    pub refunded: u32,
    /// Realized dues of paid members, before refunds.
    pub dues_realized: Decimal,
    /// Refunded amounts.
    pub refunds: Decimal,
}

impl MembershipSummary {
    /// Summarizes `members`.
    #[must_use]
    pub fn from_members(members: &[Member]) -> Self {
        members.iter().fold(Self::default(), |mut s, m| {
            s.total += 1;
            match m.member_type {
                MemberType::New => s.new_members += 1,
                MemberType::Return => s.returning += 1,
            }
            match m.status {
                MemberStatus::Family => s.family += 1,
                MemberStatus::SingleSenior => s.single_senior += 1,
            }
            match m.residence {
                Residence::Inside => s.inside += 1,
                Residence::Outside => s.outside += 1,
            }
            if m.is_paid() {
                s.paid += 1;
                s.dues_realized += m.dues.total_realized;
            }
            if m.refunded {
                s.refunded += 1;
                s.refunds += m.refund_amount.unwrap_or_default();
            }
            s
        })
    }

    /// Dues kept after refunds.
    #[must_use]
    pub fn net_dues(&self) -> Decimal {
        self.dues_realized - self.refunds
    }
}
