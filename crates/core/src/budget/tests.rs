//! Property-based tests for budget module.

use proptest::prelude::*;
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::service::BudgetService;
use super::types::{Budget, CapexProject};
use super::variance::{BudgetVariance, VarianceType, calculate_budget_performance};
use crate::fiscal::{FiscalMonth, FiscalYear};
use crate::ledger::MonthlyActuals;

const FY: FiscalYear = FiscalYear::new(2025);

fn cents(value: i64) -> Decimal {
    Decimal::new(value, 2)
}

prop_compose! {
    fn arb_project()(
        cents_amount in 1i64..5_000_000,
        month in proptest::option::of(0u8..12),
        completed in any::<bool>(),
    ) -> CapexProject {
        let mut project = CapexProject::new(FY, "Project", cents(cents_amount), month.map(FiscalMonth::new));
        project.completed = completed;
        project
    }
}

proptest! {
    /// After recalculation every open month's capex equals the sum of its projects.
    #[test]
    fn test_recalculated_capex_matches_projects(
        projects in prop::collection::vec(arb_project(), 0..20),
        closed in prop::collection::btree_set(0u8..12, 0..4),
    ) {
        let mut budget = Budget::new(FY, Decimal::ZERO, dec!(20000));
        for &month in &closed {
            budget.line_mut(FiscalMonth::new(month)).capex = dec!(123.45);
            budget.closed_months.insert(FiscalMonth::new(month));
        }

        BudgetService::recalculate_capex_lines(&mut budget, &projects);

        for month in FiscalMonth::ALL {
            let expected: Decimal = projects
                .iter()
                .filter(|p| p.month == Some(month))
                .map(|p| p.amount)
                .sum();
            if budget.is_closed(month) {
                prop_assert_eq!(budget.line(month).capex, dec!(123.45));
            } else {
                prop_assert_eq!(budget.line(month).capex, expected);
            }
        }
        prop_assert!(BudgetService::find_negative_capex(&budget).is_empty());
    }

    /// Recalculating twice changes nothing the second time.
    #[test]
    fn test_recalculation_is_idempotent(projects in prop::collection::vec(arb_project(), 0..20)) {
        let mut budget = Budget::new(FY, Decimal::ZERO, dec!(20000));
        BudgetService::recalculate_capex_lines(&mut budget, &projects);
        let again = BudgetService::recalculate_capex_lines(&mut budget, &projects);
        prop_assert!(again.is_empty());
    }

    /// Variance is actual minus budget for every line type.
    #[test]
    fn test_variance_is_actual_minus_budget(
        budget in 0i64..1_000_000_000,
        actual in 0i64..1_000_000_000,
    ) {
        let budget = cents(budget);
        let actual = cents(actual);

        let revenue = BudgetVariance::for_revenue(budget, actual);
        let expense = BudgetVariance::for_expense(budget, actual);

        prop_assert_eq!(revenue.variance, actual - budget);
        prop_assert_eq!(expense.variance, actual - budget);
        if actual == budget {
            prop_assert_eq!(revenue.variance_type, VarianceType::None);
            prop_assert_eq!(expense.variance_type, VarianceType::None);
        } else {
            prop_assert_ne!(revenue.variance_type, expense.variance_type);
        }
    }

    /// Future months never contribute to year-to-date performance.
    #[test]
    fn test_performance_ignores_future_months(
        current in 0u8..12,
        future_revenue in 1i64..1_000_000,
    ) {
        let current = FiscalMonth::new(current);
        let mut budget = Budget::new(FY, Decimal::ZERO, dec!(20000));
        let mut actuals = MonthlyActuals::empty(FY);
        for month in FiscalMonth::ALL.into_iter().filter(|m| *m > current) {
            budget.line_mut(month).revenue = cents(future_revenue);
            actuals.months[month.index()].revenue = cents(future_revenue);
        }

        let performance = calculate_budget_performance(&budget, &actuals, current);

        prop_assert_eq!(performance.revenue.budget, Decimal::ZERO);
        prop_assert_eq!(performance.revenue.actual, Decimal::ZERO);
        prop_assert_eq!(performance.net.variance, Decimal::ZERO);
    }
}

#[rstest]
#[case(dec!(1000), dec!(1200), VarianceType::Favorable, dec!(20.00))]
#[case(dec!(1000), dec!(800), VarianceType::Unfavorable, dec!(-20.00))]
#[case(dec!(1000), dec!(1000), VarianceType::None, dec!(0))]
#[case(dec!(0), dec!(500), VarianceType::Favorable, dec!(0))]
fn test_revenue_variance(
    #[case] budget: Decimal,
    #[case] actual: Decimal,
    #[case] variance_type: VarianceType,
    #[case] percentage: Decimal,
) {
    let result = BudgetVariance::for_revenue(budget, actual);
    assert_eq!(result.variance_type, variance_type);
    assert_eq!(result.variance_percentage, percentage);
}

#[rstest]
#[case(dec!(1000), dec!(800), VarianceType::Favorable)]
#[case(dec!(1000), dec!(1200), VarianceType::Unfavorable)]
#[case(dec!(1000), dec!(1000), VarianceType::None)]
fn test_expense_variance(
    #[case] budget: Decimal,
    #[case] actual: Decimal,
    #[case] variance_type: VarianceType,
) {
    assert_eq!(
        BudgetVariance::for_expense(budget, actual).variance_type,
        variance_type
    );
}

#[test]
fn test_performance_folds_ga_into_opex() {
    let mut budget = Budget::new(FY, Decimal::ZERO, dec!(20000));
    let mut actuals = MonthlyActuals::empty(FY);

    for month in FiscalMonth::new(2).year_to_date() {
        let line = budget.line_mut(month);
        line.revenue = dec!(1000);
        line.opex = dec!(400);
        line.ga = dec!(100);
        line.capex = dec!(50);

        let actual = &mut actuals.months[month.index()];
        actual.revenue = dec!(900);
        actual.opex = dec!(450);
        actual.ga = dec!(150);
    }
    // Outside the year-to-date window.
    budget.line_mut(FiscalMonth::new(3)).revenue = dec!(99999);

    let performance = calculate_budget_performance(&budget, &actuals, FiscalMonth::new(2));

    assert_eq!(performance.revenue.budget, dec!(3000));
    assert_eq!(performance.revenue.actual, dec!(2700));
    assert_eq!(performance.revenue.variance, dec!(-300));
    assert_eq!(performance.opex.budget, dec!(1500));
    assert_eq!(performance.opex.actual, dec!(1800));
    assert_eq!(performance.opex.variance, dec!(300));
    assert_eq!(performance.opex.variance_type, VarianceType::Unfavorable);
    assert_eq!(performance.capex.variance, dec!(-150));
    assert_eq!(performance.ga.budget, dec!(0));
    assert_eq!(performance.ga.actual, dec!(0));
    assert_eq!(performance.net.budget, dec!(1350));
    assert_eq!(performance.net.actual, dec!(900));
    assert_eq!(performance.net.variance, dec!(-450));
}
