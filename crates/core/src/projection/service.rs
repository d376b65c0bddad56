//! Storage-driven projection and month close.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::engine::{ProjectionRow, generate_cash_flow_projection};
use super::error::ProjectionError;
use super::warnings::{BalanceWarning, check_balance_warnings};
use crate::budget::{
    Budget, BudgetError, BudgetPerformance, BudgetService, calculate_budget_performance,
};
use crate::fiscal::{FiscalMonth, FiscalYear};
use crate::ledger::{MonthlyActuals, calculate_monthly_actuals};
use crate::store::ClubStore;

/// Everything the year view shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionOverview {
    /// Budget the projection was built from.
    pub budget: Budget,
    /// Month treated as current.
    pub current_month: FiscalMonth,
    /// Monthly actuals and unclassified-transaction warnings.
    pub actuals: MonthlyActuals,
    /// The twelve projection rows.
    pub projection: [ProjectionRow; 12],
    /// Year-to-date budget vs actual.
    pub performance: BudgetPerformance,
    /// Year-end low balance warnings.
    pub balance_warnings: Vec<BalanceWarning>,
}

/// Result of asking for a year's overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum YearOverview {
    /// No budget has been created for the year yet.
    NoBudget {
        /// Year asked for.
        fiscal_year: FiscalYear,
    },
    /// Budget exists.
    Ready(Box<ProjectionOverview>),
}

/// Projection service.
pub struct ProjectionService<S: ClubStore> {
    store: Arc<S>,
}

impl<S: ClubStore> ProjectionService<S> {
    /// Create a new projection service.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Compute the year's projection as seen on `today`.
    ///
    /// A year without a budget yields `YearOverview::NoBudget` rather than a
    /// zero budget.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn year_overview(
        &self,
        fiscal_year: FiscalYear,
        today: NaiveDate,
    ) -> Result<YearOverview, ProjectionError> {
        let (budget, transactions) = tokio::join!(
            self.store.get_budget(fiscal_year),
            self.store.get_transactions(fiscal_year)
        );
        let Some(budget) = budget? else {
            return Ok(YearOverview::NoBudget { fiscal_year });
        };
        let transactions = transactions?;

        let actuals = calculate_monthly_actuals(&transactions, fiscal_year);
        let current_month = fiscal_year.reporting_month(today);
        let projection =
            generate_cash_flow_projection(&budget, &actuals, current_month, budget.starting_balance);
        let performance = calculate_budget_performance(&budget, &actuals, current_month);
        let balance_warnings = check_balance_warnings(&projection, budget.low_balance_threshold);

        Ok(YearOverview::Ready(Box::new(ProjectionOverview {
            budget,
            current_month,
            actuals,
            projection,
            performance,
            balance_warnings,
        })))
    }

    /// Overwrite a month's budget line with its actuals and lock it.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no budget, the month is already closed,
    /// or the store fails.
    pub async fn close_month(
        &self,
        fiscal_year: FiscalYear,
        month: FiscalMonth,
    ) -> Result<Budget, ProjectionError> {
        let mut budget = self.load_budget(fiscal_year).await?;
        let transactions = self.store.get_transactions(fiscal_year).await?;
        let actuals = calculate_monthly_actuals(&transactions, fiscal_year);

        BudgetService::close_month(&mut budget, month, actuals.month(month))?;
        self.store.save_budget(&budget).await?;
        Ok(budget)
    }

    /// Unlock a closed month.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no budget, the month is open, or the
    /// store fails.
    pub async fn reopen_month(
        &self,
        fiscal_year: FiscalYear,
        month: FiscalMonth,
    ) -> Result<Budget, ProjectionError> {
        let mut budget = self.load_budget(fiscal_year).await?;
        BudgetService::reopen_month(&mut budget, month)?;
        self.store.save_budget(&budget).await?;
        Ok(budget)
    }

    async fn load_budget(&self, fiscal_year: FiscalYear) -> Result<Budget, ProjectionError> {
        self.store
            .get_budget(fiscal_year)
            .await?
            .ok_or_else(|| BudgetError::NotFound(fiscal_year).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{ExpenseType, Transaction};
    use crate::store::mock::MockClubStore;
    use rust_decimal_macros::dec;

    const FY: FiscalYear = FiscalYear::new(2025);

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_missing_budget_is_reported() {
        let service = ProjectionService::new(Arc::new(MockClubStore::new()));
        let overview = service.year_overview(FY, date(2025, 2, 1)).await.unwrap();
        assert_eq!(overview, YearOverview::NoBudget { fiscal_year: FY });
    }

    #[tokio::test]
    async fn test_year_overview() {
        let mut budget = Budget::new(FY, dec!(15000), dec!(20000));
        budget.line_mut(FiscalMonth::new(6)).revenue = dec!(30000);
        budget.line_mut(FiscalMonth::new(8)).opex = dec!(12000);
        let store = Arc::new(
            MockClubStore::new()
                .with_budget(budget)
                .with_transactions(vec![
                    Transaction::revenue("Membership Dues", dec!(5000), date(2025, 1, 10)),
                    Transaction::expense(ExpenseType::Opex, "Utilities", dec!(800), date(2025, 2, 3)),
                ]),
        );
        let service = ProjectionService::new(store);

        let YearOverview::Ready(overview) = service.year_overview(FY, date(2025, 2, 14)).await.unwrap()
        else {
            panic!("expected a budget");
        };

        assert_eq!(overview.current_month, FiscalMonth::new(4));
        let rows = &overview.projection;
        assert_eq!(rows[3].actual_balance, dec!(20000));
        assert_eq!(rows[4].actual_balance, dec!(19200));
        assert_eq!(rows[11].actual_balance, dec!(19200));
        assert_eq!(rows[11].budgeted_balance, dec!(33000));
        assert!(rows[4].is_current);
        assert!(rows[4].is_past);
        assert!(!rows[5].is_past);
        assert!(overview.balance_warnings.is_empty());
        assert_eq!(overview.performance.revenue.actual, dec!(5000));
    }

    #[tokio::test]
    async fn test_close_month_locks_actuals() {
        let store = Arc::new(
            MockClubStore::new()
                .with_budget(Budget::new(FY, dec!(0), dec!(20000)))
                .with_transactions(vec![Transaction::revenue(
                    "Guest Fees",
                    dec!(320),
                    date(2024, 11, 5),
                )]),
        );
        let service = ProjectionService::new(store.clone());
        let november = FiscalMonth::new(1);

        let budget = service.close_month(FY, november).await.unwrap();
        assert!(budget.is_closed(november));
        assert_eq!(budget.line(november).revenue, dec!(320));
        assert!(store.budget(FY).unwrap().is_closed(november));

        assert!(matches!(
            service.close_month(FY, november).await,
            Err(ProjectionError::Budget(BudgetError::MonthAlreadyClosed(_)))
        ));

        let budget = service.reopen_month(FY, november).await.unwrap();
        assert!(!budget.is_closed(november));
    }

    #[tokio::test]
    async fn test_close_month_without_budget() {
        let service = ProjectionService::new(Arc::new(MockClubStore::new()));
        assert!(matches!(
            service.close_month(FY, FiscalMonth::OCTOBER).await,
            Err(ProjectionError::Budget(BudgetError::NotFound(_)))
        ));
    }
}
