//! Dues calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{DiscountItem, FeeItem};

/// Derived dues totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuesTotals {
    /// Sum of applied fees.
    pub total_fees: Decimal,
    /// Sum of applied standard and custom discounts.
    pub total_discounts: Decimal,
    /// Base dues plus fees.
    pub total_value: Decimal,
    /// Value plus discounts.
    pub total_realized: Decimal,
}

/// Computes a member's dues totals.
///
/// Discount amounts are expected to be negative and are added as given; the
/// sign is not enforced and `total_realized` is not floored at zero.
#[must_use]
pub fn calculate_dues(
    base_dues: Decimal,
    fees: &[FeeItem],
    discounts: &[DiscountItem],
    custom_discounts: &[DiscountItem],
) -> DuesTotals {
    let total_fees: Decimal = fees.iter().filter(|f| f.applied).map(|f| f.amount).sum();
    let total_discounts: Decimal = discounts
        .iter()
        .chain(custom_discounts)
        .filter(|d| d.applied)
        .map(|d| d.amount)
        .sum();
    let total_value = base_dues + total_fees;

    DuesTotals {
        total_fees,
        total_discounts,
        total_value,
        total_realized: total_value + total_discounts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn fee(amount: Decimal, applied: bool) -> FeeItem {
        FeeItem {
            name: "Initiation".into(),
            amount,
            applied,
        }
    }

    fn discount(amount: Decimal, applied: bool) -> DiscountItem {
        DiscountItem {
            name: "Early bird".into(),
            amount,
            applied,
        }
    }

    #[test]
    fn test_fee_and_discount() {
        let totals = calculate_dues(
            dec!(675),
            &[fee(dec!(500), true)],
            &[discount(dec!(-200), true)],
            &[],
        );

        assert_eq!(totals.total_fees, dec!(500));
        assert_eq!(totals.total_discounts, dec!(-200));
        assert_eq!(totals.total_value, dec!(1175));
        assert_eq!(totals.total_realized, dec!(975));
    }

    #[test]
    fn test_unapplied_items_ignored() {
        let totals = calculate_dues(
            dec!(475),
            &[fee(dec!(500), false), fee(dec!(25), true)],
            &[discount(dec!(-100), false)],
            &[discount(dec!(-50), true)],
        );

        assert_eq!(totals.total_fees, dec!(25));
        assert_eq!(totals.total_discounts, dec!(-50));
        assert_eq!(totals.total_realized, dec!(450));
    }

    #[test]
    fn test_realized_can_go_negative() {
        let totals = calculate_dues(dec!(100), &[], &[discount(dec!(-150), true)], &[]);
        assert_eq!(totals.total_realized, dec!(-50));
    }

    #[test]
    fn test_positive_discount_is_added_as_given() {
        let totals = calculate_dues(dec!(100), &[], &[discount(dec!(20), true)], &[]);
        assert_eq!(totals.total_realized, dec!(120));
    }
}
