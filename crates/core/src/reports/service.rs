//! Board report generation.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::ReportError;
use super::types::{CompletedMaintenance, ReportData, ReportInput};
use crate::budget::{
    CapexProject, calculate_budget_performance, capex_alerts, maintenance_alerts,
};
use crate::fiscal::{FiscalMonth, FiscalYear, fiscal_month_info};
use crate::ledger::{calculate_monthly_actuals, expense_by_category, revenue_by_category};
use crate::membership::{MAX_OUTSIDE_PERCENTAGE, MembershipSummary, check_bylaw_compliance_with_limit};
use crate::projection::{check_balance_warnings, generate_cash_flow_projection};
use crate::store::ClubStore;

/// Default look-ahead for upcoming maintenance.
pub const DEFAULT_MAINTENANCE_HORIZON_DAYS: i64 = 365;

/// Service for generating board reports.
pub struct ReportService;

impl ReportService {
    /// Builds the board report for `input.month`.
    ///
    /// The projection and performance treat the report month as current, so
    /// a report for an earlier month shows what the board saw then, apart
    /// from transactions posted since.
    #[must_use]
    pub fn board_report(input: &ReportInput) -> ReportData {
        let budget = &input.budget;
        let fiscal_year = budget.fiscal_year;
        let month = input.month;

        let actuals = calculate_monthly_actuals(&input.transactions, fiscal_year);
        let projection =
            generate_cash_flow_projection(budget, &actuals, month, budget.starting_balance);
        let balance_warnings = check_balance_warnings(&projection, budget.low_balance_threshold);

        let mut planned_capex: Vec<CapexProject> = input
            .projects
            .iter()
            .filter(|p| p.fiscal_year == fiscal_year)
            .cloned()
            .collect();
        planned_capex.sort_by(|a, b| a.month.cmp(&b.month).then_with(|| a.name.cmp(&b.name)));

        let capex_completed = planned_capex.iter().filter(|p| p.completed).cloned().collect();
        let capex_upcoming = planned_capex
            .iter()
            .filter(|p| !p.completed && p.month.is_some_and(|m| m >= month))
            .cloned()
            .collect();

        let mut maintenance_completed: Vec<CompletedMaintenance> = input
            .maintenance
            .iter()
            .filter_map(|item| {
                let last = item.last_occurrence.as_ref()?;
                fiscal_year.contains(last.date).then(|| CompletedMaintenance {
                    name: item.name.clone(),
                    date: last.date,
                    amount: last.amount,
                })
            })
            .collect();
        maintenance_completed.sort_by(|a, b| a.date.cmp(&b.date));

        ReportData {
            fiscal_year,
            month: fiscal_month_info(month.value(), fiscal_year.value()),
            prepared_on: input.today,
            membership: MembershipSummary::from_members(&input.members),
            compliance: check_bylaw_compliance_with_limit(
                &input.members,
                input.max_outside_percentage,
            ),
            performance: calculate_budget_performance(budget, &actuals, month),
            capex_alerts: capex_alerts(&input.projects, fiscal_year),
            capex_completed,
            capex_upcoming,
            planned_capex,
            maintenance_completed,
            maintenance_upcoming: maintenance_alerts(
                &input.maintenance,
                input.today,
                input.maintenance_horizon_days,
            ),
            revenue_by_category: revenue_by_category(&input.transactions, fiscal_year),
            expense_by_category: expense_by_category(&input.transactions, fiscal_year),
            projection: projection.to_vec(),
            balance_warnings,
            unclassified_transactions: actuals.warnings,
        }
    }
}

/// Loads a year's snapshot from the store and builds board reports from it.
pub struct BoardReporter<S: ClubStore> {
    store: Arc<S>,
    max_outside_percentage: Decimal,
    maintenance_horizon_days: i64,
}

impl<S: ClubStore> BoardReporter<S> {
    /// Create a new reporter with the default limits.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            max_outside_percentage: MAX_OUTSIDE_PERCENTAGE,
            maintenance_horizon_days: DEFAULT_MAINTENANCE_HORIZON_DAYS,
        }
    }

    /// Use a different outside-member limit.
    #[must_use]
    pub fn with_outside_limit(mut self, limit: Decimal) -> Self {
        self.max_outside_percentage = limit;
        self
    }

    /// Use a different maintenance look-ahead.
    #[must_use]
    pub fn with_maintenance_horizon(mut self, days: i64) -> Self {
        self.maintenance_horizon_days = days;
        self
    }

    /// Build the board report of `month` in `fiscal_year`.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::NoBudget` if the year has no budget, or a store
    /// error.
    pub async fn board_report(
        &self,
        fiscal_year: FiscalYear,
        month: FiscalMonth,
        today: NaiveDate,
    ) -> Result<ReportData, ReportError> {
        let (budget, transactions, members, projects, maintenance) = tokio::try_join!(
            self.store.get_budget(fiscal_year),
            self.store.get_transactions(fiscal_year),
            self.store.get_members(fiscal_year),
            self.store.get_planned_capex(fiscal_year),
            self.store.get_major_maintenance_items(fiscal_year),
        )?;
        let budget = budget.ok_or(ReportError::NoBudget(fiscal_year))?;

        Ok(ReportService::board_report(&ReportInput {
            month,
            today,
            budget,
            transactions,
            members,
            projects,
            maintenance,
            max_outside_percentage: self.max_outside_percentage,
            maintenance_horizon_days: self.maintenance_horizon_days,
        }))
    }
}
