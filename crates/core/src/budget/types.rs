//! Budget domain types.

use std::collections::BTreeSet;

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use clubfin_shared::types::{CapexProjectId, MaintenanceItemId};

use super::error::BudgetError;
use crate::fiscal::{FiscalMonth, FiscalYear};
use crate::ledger::FlowAmounts;

/// Planned amounts for one fiscal month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBudgetLine {
    /// Fiscal month.
    pub month: FiscalMonth,
    /// Planned revenue.
    pub revenue: Decimal,
    /// Planned operating expense.
    pub opex: Decimal,
    /// Planned capital expenditure, derived from the month's CAPEX projects.
    pub capex: Decimal,
    /// Planned general and administrative expense.
    pub ga: Decimal,
    /// Free-form notes, including maintenance annotations.
    #[serde(default)]
    pub notes: String,
}

impl MonthlyBudgetLine {
    /// A zero line.
    #[must_use]
    pub fn empty(month: FiscalMonth) -> Self {
        Self {
            month,
            revenue: Decimal::ZERO,
            opex: Decimal::ZERO,
            capex: Decimal::ZERO,
            ga: Decimal::ZERO,
            notes: String::new(),
        }
    }

    /// The four planned amounts.
    #[must_use]
    pub fn amounts(&self) -> FlowAmounts {
        FlowAmounts {
            revenue: self.revenue,
            opex: self.opex,
            capex: self.capex,
            ga: self.ga,
        }
    }

    /// Overwrites the four planned amounts.
    pub fn set_amounts(&mut self, amounts: FlowAmounts) {
        self.revenue = amounts.revenue;
        self.opex = amounts.opex;
        self.capex = amounts.capex;
        self.ga = amounts.ga;
    }

    /// Planned revenue minus planned expenses.
    #[must_use]
    pub fn net(&self) -> Decimal {
        self.amounts().net()
    }
}

/// A fiscal year's budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Fiscal year budgeted.
    pub fiscal_year: FiscalYear,
    /// Cash on hand on October 1.
    pub starting_balance: Decimal,
    /// Year-end balance below which the board is warned.
    pub low_balance_threshold: Decimal,
    /// Lines in fiscal-month order.
    pub monthly_budgets: [MonthlyBudgetLine; 12],
    /// Months overwritten with actuals and locked.
    #[serde(default)]
    pub closed_months: BTreeSet<FiscalMonth>,
}

impl Budget {
    /// A budget with twelve zero lines.
    #[must_use]
    pub fn new(
        fiscal_year: FiscalYear,
        starting_balance: Decimal,
        low_balance_threshold: Decimal,
    ) -> Self {
        Self {
            fiscal_year,
            starting_balance,
            low_balance_threshold,
            monthly_budgets: FiscalMonth::ALL.map(MonthlyBudgetLine::empty),
            closed_months: BTreeSet::new(),
        }
    }

    /// Line for `month`.
    #[must_use]
    pub fn line(&self, month: FiscalMonth) -> &MonthlyBudgetLine {
        &self.monthly_budgets[month.index()]
    }

    /// Mutable line for `month`.
    pub fn line_mut(&mut self, month: FiscalMonth) -> &mut MonthlyBudgetLine {
        &mut self.monthly_budgets[month.index()]
    }

    /// Returns true if `month` is locked.
    #[must_use]
    pub fn is_closed(&self, month: FiscalMonth) -> bool {
        self.closed_months.contains(&month)
    }

    /// Full-year planned totals.
    #[must_use]
    pub fn totals(&self) -> FlowAmounts {
        self.monthly_budgets.iter().map(MonthlyBudgetLine::amounts).sum()
    }

    /// Checks the structural invariants of a decoded budget.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::MisorderedLine` if a line sits at the wrong
    /// position.
    pub fn validate(&self) -> Result<(), BudgetError> {
        for (month, line) in FiscalMonth::ALL.iter().zip(&self.monthly_budgets) {
            if line.month != *month {
                return Err(BudgetError::MisorderedLine {
                    position: *month,
                    found: line.month,
                });
            }
        }
        Ok(())
    }
}

/// A planned capital project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapexProject {
    /// Project ID.
    pub id: CapexProjectId,
    /// Project name.
    pub name: String,
    /// Planned amount.
    pub amount: Decimal,
    /// Month the spend is planned for; unscheduled when absent.
    #[serde(default)]
    pub month: Option<FiscalMonth>,
    /// Fiscal year the project is planned in.
    pub fiscal_year: FiscalYear,
    /// Whether the work is done.
    #[serde(default)]
    pub completed: bool,
    /// Final cost once completed.
    #[serde(default)]
    pub actual_amount: Option<Decimal>,
    /// Fiscal year to be reminded about replacing the asset.
    #[serde(default)]
    pub alert_year: Option<FiscalYear>,
    /// Whether replacement reminders are wanted.
    #[serde(default)]
    pub tracking_enabled: bool,
}

impl CapexProject {
    /// Creates an incomplete project.
    #[must_use]
    pub fn new(
        fiscal_year: FiscalYear,
        name: impl Into<String>,
        amount: Decimal,
        month: Option<FiscalMonth>,
    ) -> Self {
        Self {
            id: CapexProjectId::new(),
            name: name.into(),
            amount,
            month,
            fiscal_year,
            completed: false,
            actual_amount: None,
            alert_year: None,
            tracking_enabled: false,
        }
    }

    /// Marks the project completed at `actual_amount`.
    ///
    /// The planned amount is kept, so the budget line does not move.
    pub fn complete(&mut self, actual_amount: Decimal) {
        self.completed = true;
        self.actual_amount = Some(actual_amount);
    }
}

/// When a maintenance item last happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceOccurrence {
    /// Date the work was done.
    pub date: NaiveDate,
    /// What it cost.
    pub amount: Decimal,
}

/// A recurring, non-routine maintenance job (resurfacing, pump rebuild).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MajorMaintenanceItem {
    /// Item ID.
    pub id: MaintenanceItemId,
    /// Fiscal year the item is tracked under.
    pub fiscal_year: FiscalYear,
    /// Item name.
    pub name: String,
    /// Amount budgeted when it is due.
    pub budget_amount: Decimal,
    /// Month the work is budgeted for this year, if any.
    #[serde(default)]
    pub month: Option<FiscalMonth>,
    /// Shortest interval between occurrences.
    pub recurrence_years_min: u32,
    /// Longest interval between occurrences.
    pub recurrence_years_max: u32,
    /// Last time the work was done.
    #[serde(default)]
    pub last_occurrence: Option<MaintenanceOccurrence>,
    /// Earliest date the work is next due.
    #[serde(default)]
    pub next_due_date_min: Option<NaiveDate>,
}

impl MajorMaintenanceItem {
    /// Earliest date the work is next due.
    ///
    /// Uses the stored date when present, otherwise derives it from the last
    /// occurrence and the minimum recurrence.
    #[must_use]
    pub fn next_due(&self) -> Option<NaiveDate> {
        self.next_due_date_min.or_else(|| {
            let last = self.last_occurrence.as_ref()?;
            last.date
                .checked_add_months(Months::new(self.recurrence_years_min.saturating_mul(12)))
        })
    }

    /// Latest date the work is next due.
    #[must_use]
    pub fn next_due_latest(&self) -> Option<NaiveDate> {
        let last = self.last_occurrence.as_ref()?;
        last.date
            .checked_add_months(Months::new(self.recurrence_years_max.saturating_mul(12)))
    }
}
