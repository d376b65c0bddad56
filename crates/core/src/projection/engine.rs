//! Month-by-month cash-flow projection.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::budget::Budget;
use crate::fiscal::FiscalMonth;
use crate::ledger::{FlowAmounts, MonthlyActuals};

/// One fiscal month of the projection.
///
/// Every view of the year (tables, widgets, board reports) renders these rows
/// as produced; nothing downstream re-derives the balances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionRow {
    /// Fiscal month.
    pub month: FiscalMonth,
    /// Calendar month name.
    pub month_name: String,
    /// "YYYY-MM" of the calendar month.
    pub period_key: String,
    /// Budget line amounts.
    pub budgeted: FlowAmounts,
    /// Actual amounts.
    pub actual: FlowAmounts,
    /// Budgeted revenue minus budgeted expenses.
    pub budgeted_net: Decimal,
    /// Actual revenue minus actual expenses.
    pub actual_net: Decimal,
    /// Starting balance plus budgeted nets through this month.
    pub budgeted_balance: Decimal,
    /// Starting balance plus actual nets through this month.
    pub actual_balance: Decimal,
    /// Transactions posted to this month.
    pub transaction_count: u32,
    /// At or before the current month.
    pub is_past: bool,
    /// The current month.
    pub is_current: bool,
    /// Has at least one posted transaction.
    pub is_actual: bool,
    /// Budget line notes.
    pub notes: String,
}

/// Builds the twelve projection rows of a fiscal year, October first.
///
/// Both running balances start at `starting_balance`. The actual balance
/// accumulates every month's actual net, so a future month with an
/// early-posted transaction moves it, while months without activity hold it
/// flat. The budgeted balance always follows the budget lines.
#[must_use]
pub fn generate_cash_flow_projection(
    budget: &Budget,
    actuals: &MonthlyActuals,
    current: FiscalMonth,
    starting_balance: Decimal,
) -> [ProjectionRow; 12] {
    let fiscal_year = budget.fiscal_year.value();
    let mut actual_balance = starting_balance;
    let mut budgeted_balance = starting_balance;

    FiscalMonth::ALL.map(|month| {
        let line = budget.line(month);
        let actual = actuals.month(month);

        let budgeted = line.amounts();
        let actual_amounts = actual.amounts();
        let budgeted_net = budgeted.net();
        let actual_net = actual_amounts.net();
        budgeted_balance += budgeted_net;
        actual_balance += actual_net;

        ProjectionRow {
            month,
            month_name: month.month_name().to_string(),
            period_key: month.period_key(fiscal_year),
            budgeted,
            actual: actual_amounts,
            budgeted_net,
            actual_net,
            budgeted_balance,
            actual_balance,
            transaction_count: actual.transaction_count,
            is_past: month <= current,
            is_current: month == current,
            is_actual: actual.has_activity(),
            notes: line.notes.clone(),
        }
    })
}
