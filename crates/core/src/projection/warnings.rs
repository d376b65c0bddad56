//! Year-end low balance warnings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::engine::ProjectionRow;
use crate::fiscal::FiscalMonth;

/// Default year-end balance the board wants to stay above.
pub const DEFAULT_LOW_BALANCE_THRESHOLD: Decimal = Decimal::from_parts(20000, 0, 0, false, 0);

/// The year is budgeted to end below the threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceWarning {
    /// Month examined (always September).
    pub month: FiscalMonth,
    /// Calendar month name.
    pub month_name: String,
    /// Budgeted balance at the end of the month.
    pub balance: Decimal,
    /// Threshold applied.
    pub threshold: Decimal,
    /// Threshold minus balance.
    pub deficit: Decimal,
    /// The balance is negative.
    pub is_critical: bool,
}

/// Warns when the budgeted balance at fiscal year-end is below `threshold`.
///
/// Only September's budgeted balance is examined; intermediate dips and the
/// actual balance never warn.
#[must_use]
pub fn check_balance_warnings(projection: &[ProjectionRow], threshold: Decimal) -> Vec<BalanceWarning> {
    projection
        .iter()
        .filter(|row| row.month == FiscalMonth::SEPTEMBER)
        .filter(|row| row.budgeted_balance < threshold)
        .map(|row| BalanceWarning {
            month: row.month,
            month_name: row.month_name.clone(),
            balance: row.budgeted_balance,
            threshold,
            deficit: threshold - row.budgeted_balance,
            is_critical: row.budgeted_balance < Decimal::ZERO,
        })
        .collect()
}
