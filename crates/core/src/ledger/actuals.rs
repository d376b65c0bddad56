//! Aggregation of posted transactions into fiscal-month actuals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use clubfin_shared::types::TransactionId;

use super::types::{Classification, FlowAmounts, Transaction, UnclassifiedReason};
use crate::fiscal::{FiscalMonth, FiscalYear};

/// Actual amounts for one fiscal month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyActual {
    /// Fiscal month.
    pub month: FiscalMonth,
    /// Revenue.
    pub revenue: Decimal,
    /// Operating expense.
    pub opex: Decimal,
    /// Capital expenditure.
    pub capex: Decimal,
    /// General and administrative expense.
    pub ga: Decimal,
    /// Revenue minus all expenses.
    pub net: Decimal,
    /// Number of transactions bucketed into this month.
    pub transaction_count: u32,
}

impl MonthlyActual {
    /// A month with no activity.
    #[must_use]
    pub fn empty(month: FiscalMonth) -> Self {
        Self {
            month,
            revenue: Decimal::ZERO,
            opex: Decimal::ZERO,
            capex: Decimal::ZERO,
            ga: Decimal::ZERO,
            net: Decimal::ZERO,
            transaction_count: 0,
        }
    }

    /// The four flow amounts of this month.
    #[must_use]
    pub fn amounts(&self) -> FlowAmounts {
        FlowAmounts {
            revenue: self.revenue,
            opex: self.opex,
            capex: self.capex,
            ga: self.ga,
        }
    }

    /// Returns true once any transaction has posted to this month.
    #[must_use]
    pub fn has_activity(&self) -> bool {
        self.transaction_count > 0
    }
}

/// A transaction left out of the actuals because it could not be classified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnclassifiedTransactionWarning {
    /// Offending transaction.
    pub transaction_id: TransactionId,
    /// Fiscal month it would have landed in.
    pub month: FiscalMonth,
    /// Amount that is missing from the actuals.
    pub amount: Decimal,
    /// Why it was not classified.
    pub reason: UnclassifiedReason,
}

/// Twelve months of actuals for one fiscal year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyActuals {
    /// Fiscal year aggregated.
    pub fiscal_year: FiscalYear,
    /// Actuals in fiscal-month order.
    pub months: [MonthlyActual; 12],
    /// Transactions in the year that could not be bucketed, ordered by id.
    pub warnings: Vec<UnclassifiedTransactionWarning>,
}

impl MonthlyActuals {
    /// A year with no activity.
    #[must_use]
    pub fn empty(fiscal_year: FiscalYear) -> Self {
        Self {
            fiscal_year,
            months: FiscalMonth::ALL.map(MonthlyActual::empty),
            warnings: Vec::new(),
        }
    }

    /// Actuals for `month`.
    #[must_use]
    pub fn month(&self, month: FiscalMonth) -> &MonthlyActual {
        &self.months[month.index()]
    }

    /// Full-year totals.
    #[must_use]
    pub fn totals(&self) -> FlowAmounts {
        self.months.iter().map(MonthlyActual::amounts).sum()
    }

    /// Returns true if aggregation dropped anything.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Buckets `transactions` into the twelve months of `fiscal_year`.
///
/// A transaction belongs to the year when its date falls between October 1
/// of `fiscal_year - 1` and September 30 of `fiscal_year`; anything outside
/// that window is skipped. Unclassifiable transactions inside the window are
/// reported in `warnings` rather than counted. The result depends only on the
/// set of transactions, not their order.
#[must_use]
pub fn calculate_monthly_actuals(
    transactions: &[Transaction],
    fiscal_year: FiscalYear,
) -> MonthlyActuals {
    let mut actuals = MonthlyActuals::empty(fiscal_year);

    for tx in transactions {
        let Some(month) = fiscal_year.month_of(tx.date) else {
            continue;
        };
        let bucket = &mut actuals.months[month.index()];

        match tx.classify() {
            Classification::Revenue => bucket.revenue += tx.amount,
            Classification::Opex => bucket.opex += tx.amount,
            Classification::Capex => bucket.capex += tx.amount,
            Classification::GeneralAdmin => bucket.ga += tx.amount,
            Classification::Unclassified(reason) => {
                warn!(
                    transaction_id = %tx.id,
                    %reason,
                    amount = %tx.amount,
                    "excluding unclassified transaction from actuals"
                );
                actuals.warnings.push(UnclassifiedTransactionWarning {
                    transaction_id: tx.id,
                    month,
                    amount: tx.amount,
                    reason,
                });
                continue;
            }
        }
        bucket.transaction_count += 1;
    }

    for bucket in &mut actuals.months {
        bucket.net = bucket.revenue - bucket.opex - bucket.capex - bucket.ga;
    }
    actuals.warnings.sort_by_key(|w| w.transaction_id);

    actuals
}
