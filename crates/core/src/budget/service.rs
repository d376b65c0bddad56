//! Budget maintenance operations.

use rust_decimal::Decimal;
use tracing::info;

use super::error::BudgetError;
use super::types::{Budget, CapexProject, MajorMaintenanceItem};
use crate::fiscal::FiscalMonth;
use crate::ledger::{FlowAmounts, MonthlyActual};

/// Prefix of the maintenance annotation written into line notes.
pub const MAINTENANCE_NOTE_PREFIX: &str = "Major maintenance: ";

/// Budget service for business logic.
pub struct BudgetService;

impl BudgetService {
    /// Replace the planned amounts of an open month.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::MonthClosed` if the month is locked.
    /// Returns `BudgetError::NegativeAmount` if any amount is negative.
    pub fn update_line(
        budget: &mut Budget,
        month: FiscalMonth,
        amounts: FlowAmounts,
        notes: Option<String>,
    ) -> Result<(), BudgetError> {
        if budget.is_closed(month) {
            return Err(BudgetError::MonthClosed(month));
        }

        if let Some(negative) = [amounts.revenue, amounts.opex, amounts.capex, amounts.ga]
            .into_iter()
            .find(|amount| *amount < Decimal::ZERO)
        {
            return Err(BudgetError::NegativeAmount(negative));
        }

        let line = budget.line_mut(month);
        line.set_amounts(amounts);
        if let Some(notes) = notes {
            line.notes = notes;
        }
        Ok(())
    }

    /// Overwrite a month's line with its actuals and lock it.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::MonthAlreadyClosed` if the month is locked.
    pub fn close_month(
        budget: &mut Budget,
        month: FiscalMonth,
        actual: &MonthlyActual,
    ) -> Result<(), BudgetError> {
        if budget.is_closed(month) {
            return Err(BudgetError::MonthAlreadyClosed(month));
        }

        budget.line_mut(month).set_amounts(actual.amounts());
        budget.closed_months.insert(month);

        info!(fiscal_year = %budget.fiscal_year, %month, "Month closed");
        Ok(())
    }

    /// Unlock a closed month. The line keeps the actual figures.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::MonthNotClosed` if the month is open.
    pub fn reopen_month(budget: &mut Budget, month: FiscalMonth) -> Result<(), BudgetError> {
        if !budget.closed_months.remove(&month) {
            return Err(BudgetError::MonthNotClosed(month));
        }

        info!(fiscal_year = %budget.fiscal_year, %month, "Month reopened");
        Ok(())
    }

    /// Recompute every open month's CAPEX from the project list.
    ///
    /// Each open month's capex becomes the sum of the planned amounts of the
    /// budget year's projects scheduled in that month, completed or not.
    /// Closed months are left alone. Returns the months whose capex changed.
    pub fn recalculate_capex_lines(
        budget: &mut Budget,
        projects: &[CapexProject],
    ) -> Vec<FiscalMonth> {
        let mut planned = [Decimal::ZERO; FiscalMonth::COUNT];
        for project in projects
            .iter()
            .filter(|p| p.fiscal_year == budget.fiscal_year)
        {
            if let Some(month) = project.month {
                planned[month.index()] += project.amount;
            }
        }

        let mut changed = Vec::new();
        for month in FiscalMonth::ALL {
            if budget.is_closed(month) {
                continue;
            }
            let line = budget.line_mut(month);
            if line.capex != planned[month.index()] {
                line.capex = planned[month.index()];
                changed.push(month);
            }
        }
        changed
    }

    /// Months whose planned capex is negative.
    #[must_use]
    pub fn find_negative_capex(budget: &Budget) -> Vec<FiscalMonth> {
        budget
            .monthly_budgets
            .iter()
            .filter(|line| line.capex < Decimal::ZERO)
            .map(|line| line.month)
            .collect()
    }

    /// Zero the negative capex of the months the user confirmed.
    ///
    /// Confirmed months whose capex is not negative are left untouched.
    /// Returns the months that were repaired.
    pub fn reset_negative_capex(budget: &mut Budget, confirmed: &[FiscalMonth]) -> Vec<FiscalMonth> {
        let mut repaired = Vec::new();
        for &month in confirmed {
            let line = budget.line_mut(month);
            if line.capex < Decimal::ZERO {
                line.capex = Decimal::ZERO;
                repaired.push(month);
            }
        }
        repaired.sort_unstable();
        repaired.dedup();

        if !repaired.is_empty() {
            info!(
                fiscal_year = %budget.fiscal_year,
                months = ?repaired,
                "Negative CAPEX lines reset"
            );
        }
        repaired
    }

    /// Write maintenance annotations into the notes of each line.
    ///
    /// Any previous annotation is replaced; other note lines are kept.
    pub fn annotate_maintenance(budget: &mut Budget, items: &[MajorMaintenanceItem]) {
        for month in FiscalMonth::ALL {
            let names: Vec<&str> = items
                .iter()
                .filter(|item| item.month == Some(month))
                .map(|item| item.name.as_str())
                .collect();

            let line = budget.line_mut(month);
            let mut notes: Vec<&str> = line
                .notes
                .lines()
                .filter(|l| !l.starts_with(MAINTENANCE_NOTE_PREFIX))
                .collect();
            let annotation = format!("{MAINTENANCE_NOTE_PREFIX}{}", names.join(", "));
            if !names.is_empty() {
                notes.push(&annotation);
            }
            line.notes = notes.join("\n");
        }
    }

    /// Budgeted major maintenance per fiscal month.
    #[must_use]
    pub fn maintenance_by_month(items: &[MajorMaintenanceItem]) -> [Decimal; 12] {
        let mut totals = [Decimal::ZERO; FiscalMonth::COUNT];
        for item in items {
            if let Some(month) = item.month {
                totals[month.index()] += item.budget_amount;
            }
        }
        totals
    }
}
