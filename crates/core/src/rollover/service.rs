//! Storage-driven year-end roll-forward.

use std::sync::Arc;

use tracing::info;

use super::error::RolloverError;
use super::steps::{RolloverPlan, YearEndRollover};
use crate::fiscal::FiscalYear;
use crate::ledger::calculate_monthly_actuals;
use crate::store::ClubStore;

/// Roll-forward service.
pub struct RolloverService<S: ClubStore> {
    store: Arc<S>,
}

impl<S: ClubStore> RolloverService<S> {
    /// Create a new roll-forward service.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Compute the plan for closing `fiscal_year` without writing anything.
    ///
    /// # Errors
    ///
    /// Returns `RolloverError::BudgetMissing` if the year has no budget, or a
    /// store error.
    pub async fn preview(&self, fiscal_year: FiscalYear) -> Result<RolloverPlan, RolloverError> {
        let (budget, transactions, maintenance, projects, members) = tokio::try_join!(
            self.store.get_budget(fiscal_year),
            self.store.get_transactions(fiscal_year),
            self.store.get_major_maintenance_items(fiscal_year),
            self.store.get_planned_capex(fiscal_year),
            self.store.get_members(fiscal_year),
        )?;
        let budget = budget.ok_or(RolloverError::BudgetMissing(fiscal_year))?;

        let actuals = calculate_monthly_actuals(&transactions, fiscal_year);
        Ok(YearEndRollover::prepare(
            &budget,
            &actuals,
            &maintenance,
            &projects,
            &members,
        ))
    }

    /// Persist a reviewed plan.
    ///
    /// The next-year budget is written last, so a commit interrupted by a
    /// store failure can be retried; members and projects are keyed by the
    /// plan's ids and are simply written again.
    ///
    /// # Errors
    ///
    /// Returns `RolloverError::NextYearExists` if the next year already has a
    /// budget, or a store error.
    pub async fn commit(&self, plan: &RolloverPlan) -> Result<(), RolloverError> {
        if self.store.get_budget(plan.to).await?.is_some() {
            return Err(RolloverError::NextYearExists(plan.to));
        }

        for member in &plan.members {
            self.store.save_member(member).await?;
        }
        for project in &plan.capex_to_replan {
            self.store.save_capex_project(project).await?;
        }
        self.store.save_budget(&plan.budget).await?;

        info!(
            from = %plan.from,
            to = %plan.to,
            starting_balance = %plan.starting_balance,
            members = plan.members.len(),
            projects = plan.capex_to_replan.len(),
            "Fiscal year rolled forward"
        );
        Ok(())
    }
}
