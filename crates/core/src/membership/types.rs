//! Membership data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use clubfin_shared::types::{MemberId, TransactionId};

use super::dues::{DuesTotals, calculate_dues};
use crate::fiscal::FiscalYear;

/// Whether the member is joining for the first time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberType {
    /// First season with the club.
    New,
    /// Returning from a previous season.
    Return,
}

/// Membership tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberStatus {
    /// Family membership.
    Family,
    /// Single or senior membership.
    #[serde(rename = "Single/Senior")]
    SingleSenior,
}

/// Where the member lives relative to the club's neighborhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Residence {
    /// Inside the neighborhood.
    Inside,
    /// Outside the neighborhood; capped by the bylaws.
    Outside,
}

/// A fee line on a member's dues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeItem {
    /// Fee name (e.g. "Initiation").
    pub name: String,
    /// Positive fee amount.
    pub amount: Decimal,
    /// Whether the fee applies to this member.
    pub applied: bool,
}

/// A discount line on a member's dues.
///
/// Amounts are stored negative and are added, never subtracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountItem {
    /// Discount name (e.g. "Early bird").
    pub name: String,
    /// Negative discount amount.
    pub amount: Decimal,
    /// Whether the discount applies to this member.
    pub applied: bool,
}

/// Dues inputs with their derived totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDues {
    /// Base dues for the membership tier.
    pub base_dues: Decimal,
    /// Standard fees.
    #[serde(default)]
    pub fees: Vec<FeeItem>,
    /// Standard discounts.
    #[serde(default)]
    pub discounts: Vec<DiscountItem>,
    /// One-off discounts entered for this member.
    #[serde(default)]
    pub custom_discounts: Vec<DiscountItem>,
    /// Sum of applied fees.
    #[serde(default)]
    pub total_fees: Decimal,
    /// Sum of applied discounts (zero or negative).
    #[serde(default)]
    pub total_discounts: Decimal,
    /// Base dues plus fees.
    #[serde(default)]
    pub total_value: Decimal,
    /// Value plus discounts: the revenue the club actually realizes.
    #[serde(default)]
    pub total_realized: Decimal,
}

impl MemberDues {
    /// Dues with only a base amount.
    #[must_use]
    pub fn base(base_dues: Decimal) -> Self {
        let mut dues = Self {
            base_dues,
            fees: Vec::new(),
            discounts: Vec::new(),
            custom_discounts: Vec::new(),
            total_fees: Decimal::ZERO,
            total_discounts: Decimal::ZERO,
            total_value: Decimal::ZERO,
            total_realized: Decimal::ZERO,
        };
        dues.recalculate();
        dues
    }

    /// Recomputes the stored totals from the fee and discount lists.
    pub fn recalculate(&mut self) {
        let DuesTotals {
            total_fees,
            total_discounts,
            total_value,
            total_realized,
        } = calculate_dues(
            self.base_dues,
            &self.fees,
            &self.discounts,
            &self.custom_discounts,
        );
        self.total_fees = total_fees;
        self.total_discounts = total_discounts;
        self.total_value = total_value;
        self.total_realized = total_realized;
    }
}

/// Recorded justification for admitting an outside member past the bylaw cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutsideOverride {
    /// Why the board allowed it.
    pub justification: String,
    /// When the override was recorded.
    pub recorded_on: NaiveDate,
}

/// A club member for one fiscal year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Member ID.
    pub id: MemberId,
    /// Fiscal year of this membership.
    pub fiscal_year: FiscalYear,
    /// Display name (household or person).
    pub name: String,
    /// New or returning.
    pub member_type: MemberType,
    /// Membership tier.
    pub status: MemberStatus,
    /// Inside or outside the neighborhood.
    pub residence: Residence,
    /// Dues and their totals.
    pub dues: MemberDues,
    /// Date dues were paid.
    #[serde(default)]
    pub date_paid: Option<NaiveDate>,
    /// Payment method label.
    #[serde(default)]
    pub payment_method: Option<String>,
    /// Whether the dues were refunded.
    #[serde(default)]
    pub refunded: bool,
    /// Refunded amount.
    #[serde(default)]
    pub refund_amount: Option<Decimal>,
    /// Date of the refund.
    #[serde(default)]
    pub refund_date: Option<NaiveDate>,
    /// Why the dues were refunded.
    #[serde(default)]
    pub refund_reason: Option<String>,
    /// Override stored when admitted past the outside-member cap.
    #[serde(default)]
    pub outside_override: Option<OutsideOverride>,
    /// Revenue transaction recording the dues payment.
    #[serde(default)]
    pub payment_transaction_id: Option<TransactionId>,
    /// Expense transaction recording the refund.
    #[serde(default)]
    pub refund_transaction_id: Option<TransactionId>,
    /// Same member in the prior fiscal year.
    #[serde(default)]
    pub previous_member_id: Option<MemberId>,
}

impl Member {
    /// Creates an unpaid member.
    #[must_use]
    pub fn new(
        fiscal_year: FiscalYear,
        name: impl Into<String>,
        member_type: MemberType,
        status: MemberStatus,
        residence: Residence,
        dues: MemberDues,
    ) -> Self {
        Self {
            id: MemberId::new(),
            fiscal_year,
            name: name.into(),
            member_type,
            status,
            residence,
            dues,
            date_paid: None,
            payment_method: None,
            refunded: false,
            refund_amount: None,
            refund_date: None,
            refund_reason: None,
            outside_override: None,
            payment_transaction_id: None,
            refund_transaction_id: None,
            previous_member_id: None,
        }
    }

    /// Returns true once dues have been paid.
    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.date_paid.is_some()
    }

    /// Marks dues as paid on `date`.
    #[must_use]
    pub fn paid_on(mut self, date: NaiveDate) -> Self {
        self.date_paid = Some(date);
        self
    }

    /// Records a refund.
    #[must_use]
    pub fn refunded_on(mut self, date: NaiveDate, amount: Decimal, reason: impl Into<String>) -> Self {
        self.refunded = true;
        self.refund_date = Some(date);
        self.refund_amount = Some(amount);
        self.refund_reason = Some(reason.into());
        self
    }
}
