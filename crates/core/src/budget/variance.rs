//! Year-to-date budget performance.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::Budget;
use crate::fiscal::FiscalMonth;
use crate::ledger::{FlowAmounts, MonthlyActuals};

/// Type of variance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarianceType {
    /// Better than planned.
    Favorable,
    /// Worse than planned.
    Unfavorable,
    /// No variance.
    None,
}

/// Budget vs actual for one line.
///
/// `variance` is always `actual - budget`; whether that is good news depends
/// on the line and is carried in `variance_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetVariance {
    /// Budgeted amount.
    pub budget: Decimal,
    /// Actual amount.
    pub actual: Decimal,
    /// Actual minus budget.
    pub variance: Decimal,
    /// Variance as a percentage of budget; zero when nothing was budgeted.
    pub variance_percentage: Decimal,
    /// Type of variance.
    pub variance_type: VarianceType,
}

impl BudgetVariance {
    /// Calculates variance for an expense line: spending less is favorable.
    #[must_use]
    pub fn for_expense(budget: Decimal, actual: Decimal) -> Self {
        Self::build(budget, actual, true)
    }

    /// Calculates variance for a revenue or net line: earning more is favorable.
    #[must_use]
    pub fn for_revenue(budget: Decimal, actual: Decimal) -> Self {
        Self::build(budget, actual, false)
    }

    fn build(budget: Decimal, actual: Decimal, lower_is_better: bool) -> Self {
        let variance = actual - budget;
        let variance_percentage = if budget.is_zero() {
            Decimal::ZERO
        } else {
            (variance / budget * Decimal::ONE_HUNDRED).round_dp(2)
        };

        let variance_type = match (variance.cmp(&Decimal::ZERO), lower_is_better) {
            (std::cmp::Ordering::Equal, _) => VarianceType::None,
            (std::cmp::Ordering::Greater, false) | (std::cmp::Ordering::Less, true) => {
                VarianceType::Favorable
            }
            _ => VarianceType::Unfavorable,
        };

        Self {
            budget,
            actual,
            variance,
            variance_percentage,
            variance_type,
        }
    }
}

/// Year-to-date budget vs actual for every line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetPerformance {
    /// Last month included.
    pub through_month: FiscalMonth,
    /// Revenue.
    pub revenue: BudgetVariance,
    /// Operating expense, including G&A.
    pub opex: BudgetVariance,
    /// Capital expenditure.
    pub capex: BudgetVariance,
    /// Always zero; G&A is reported inside `opex`.
    pub ga: BudgetVariance,
    /// Revenue minus expenses.
    pub net: BudgetVariance,
}

/// Compares budget and actuals for October through `current` inclusive.
///
/// Future months never contribute. G&A is folded into OPEX on both sides.
#[must_use]
pub fn calculate_budget_performance(
    budget: &Budget,
    actuals: &MonthlyActuals,
    current: FiscalMonth,
) -> BudgetPerformance {
    let planned: FlowAmounts = current
        .year_to_date()
        .map(|m| budget.line(m).amounts())
        .sum();
    let actual: FlowAmounts = current
        .year_to_date()
        .map(|m| actuals.month(m).amounts())
        .sum();

    let revenue = BudgetVariance::for_revenue(planned.revenue, actual.revenue);
    let opex = BudgetVariance::for_expense(planned.opex + planned.ga, actual.opex + actual.ga);
    let capex = BudgetVariance::for_expense(planned.capex, actual.capex);
    let net = BudgetVariance::for_revenue(
        revenue.budget - opex.budget - capex.budget,
        revenue.actual - opex.actual - capex.actual,
    );

    BudgetPerformance {
        through_month: current,
        revenue,
        opex,
        capex,
        ga: BudgetVariance::for_expense(Decimal::ZERO, Decimal::ZERO),
        net,
    }
}
