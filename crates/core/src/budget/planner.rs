//! Storage-driven CAPEX planning.
//!
//! Every project mutation is followed by the single CAPEX recalculation, so
//! budget lines cannot drift from the project list.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info};

use clubfin_shared::types::CapexProjectId;

use super::error::BudgetError;
use super::service::BudgetService;
use super::types::{Budget, CapexProject};
use crate::fiscal::{FiscalMonth, FiscalYear};
use crate::store::ClubStore;

/// Capital project planner.
pub struct CapexPlanner<S: ClubStore> {
    store: Arc<S>,
}

impl<S: ClubStore> CapexPlanner<S> {
    /// Create a new planner.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Create or update a project and recompute the budget's CAPEX lines.
    ///
    /// A project whose fiscal year changed is moved: it is removed from the
    /// year it was filed under and that year's CAPEX lines are recomputed too.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NegativeAmount` if the planned or actual amount
    /// is negative, `BudgetError::NotFound` if the project's fiscal year has
    /// no budget, or a store error.
    pub async fn save_project(&self, project: &CapexProject) -> Result<Budget, BudgetError> {
        check_not_negative(project.amount)?;
        if let Some(actual) = project.actual_amount {
            check_not_negative(actual)?;
        }

        let budget = self.load_budget(project.fiscal_year).await?;
        let previous = self.store.find_capex_project(project.id).await?;
        self.store.save_capex_project(project).await?;

        if let Some(previous) = previous.filter(|p| p.fiscal_year != project.fiscal_year) {
            self.store
                .delete_capex_project(previous.fiscal_year, project.id)
                .await?;
            if let Some(old_budget) = self.store.get_budget(previous.fiscal_year).await? {
                self.recalculate(old_budget).await?;
            }
            info!(
                project_id = %project.id,
                from = %previous.fiscal_year,
                to = %project.fiscal_year,
                "CAPEX project moved to another fiscal year"
            );
        }

        self.recalculate(budget).await
    }

    /// Delete a project and recompute the budget's CAPEX lines.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::ProjectNotFound` if the project does not exist,
    /// `BudgetError::NotFound` if there is no budget, or a store error.
    pub async fn delete_project(
        &self,
        fiscal_year: FiscalYear,
        id: CapexProjectId,
    ) -> Result<Budget, BudgetError> {
        let budget = self.load_budget(fiscal_year).await?;
        if !self.store.delete_capex_project(fiscal_year, id).await? {
            return Err(BudgetError::ProjectNotFound(id));
        }
        self.recalculate(budget).await
    }

    /// Mark a project completed at its final cost.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NegativeAmount` if `actual_amount` is negative,
    /// `BudgetError::ProjectNotFound` if the project does not exist,
    /// `BudgetError::NotFound` if there is no budget, or a store error.
    pub async fn complete_project(
        &self,
        fiscal_year: FiscalYear,
        id: CapexProjectId,
        actual_amount: Decimal,
    ) -> Result<CapexProject, BudgetError> {
        check_not_negative(actual_amount)?;
        let budget = self.load_budget(fiscal_year).await?;
        let mut project = self
            .store
            .get_planned_capex(fiscal_year)
            .await?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or(BudgetError::ProjectNotFound(id))?;

        project.complete(actual_amount);
        self.store.save_capex_project(&project).await?;
        self.recalculate(budget).await?;
        Ok(project)
    }

    /// Months of the year's budget with negative CAPEX.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NotFound` if there is no budget, or a store error.
    pub async fn negative_capex(&self, fiscal_year: FiscalYear) -> Result<Vec<FiscalMonth>, BudgetError> {
        let budget = self.load_budget(fiscal_year).await?;
        Ok(BudgetService::find_negative_capex(&budget))
    }

    /// Zero the negative CAPEX lines the user confirmed and save the budget.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NotFound` if there is no budget, or a store error.
    pub async fn repair_negative_capex(
        &self,
        fiscal_year: FiscalYear,
        confirmed: &[FiscalMonth],
    ) -> Result<Vec<FiscalMonth>, BudgetError> {
        let mut budget = self.load_budget(fiscal_year).await?;
        let repaired = BudgetService::reset_negative_capex(&mut budget, confirmed);
        if !repaired.is_empty() {
            self.store.save_budget(&budget).await?;
        }
        Ok(repaired)
    }

    async fn load_budget(&self, fiscal_year: FiscalYear) -> Result<Budget, BudgetError> {
        self.store
            .get_budget(fiscal_year)
            .await?
            .ok_or(BudgetError::NotFound(fiscal_year))
    }

    async fn recalculate(&self, mut budget: Budget) -> Result<Budget, BudgetError> {
        let projects = self.store.get_planned_capex(budget.fiscal_year).await?;
        let changed = BudgetService::recalculate_capex_lines(&mut budget, &projects);
        debug!(
            fiscal_year = %budget.fiscal_year,
            changed = changed.len(),
            "CAPEX lines recalculated"
        );
        self.store.save_budget(&budget).await?;
        Ok(budget)
    }
}

fn check_not_negative(amount: Decimal) -> Result<(), BudgetError> {
    if amount < Decimal::ZERO {
        return Err(BudgetError::NegativeAmount(amount));
    }
    Ok(())
}
