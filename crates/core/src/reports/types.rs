//! Report data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::budget::{
    Budget, BudgetPerformance, CapexAlert, CapexProject, MaintenanceAlert, MajorMaintenanceItem,
};
use crate::fiscal::{FiscalMonth, FiscalYear, MonthInfo};
use crate::ledger::{CategoryTotal, Transaction, UnclassifiedTransactionWarning};
use crate::membership::{ComplianceReport, Member, MembershipSummary};
use crate::projection::{BalanceWarning, ProjectionRow};

/// Snapshot a board report is built from.
#[derive(Debug, Clone)]
pub struct ReportInput {
    /// Fiscal month reported on.
    pub month: FiscalMonth,
    /// Date the report is prepared.
    pub today: NaiveDate,
    /// The year's budget.
    pub budget: Budget,
    /// The year's transactions.
    pub transactions: Vec<Transaction>,
    /// The year's roster.
    pub members: Vec<Member>,
    /// The year's capital projects.
    pub projects: Vec<CapexProject>,
    /// The year's major maintenance items.
    pub maintenance: Vec<MajorMaintenanceItem>,
    /// Bylaw outside-member limit.
    pub max_outside_percentage: Decimal,
    /// Days ahead to list upcoming maintenance.
    pub maintenance_horizon_days: i64,
}

/// A maintenance item done during the fiscal year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedMaintenance {
    /// Item name.
    pub name: String,
    /// When it was done.
    pub date: NaiveDate,
    /// What it cost.
    pub amount: Decimal,
}

/// Everything a board report document shows for one fiscal month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportData {
    /// Fiscal year reported on.
    pub fiscal_year: FiscalYear,
    /// Month reported on.
    pub month: MonthInfo,
    /// Date the report was prepared.
    pub prepared_on: NaiveDate,
    /// Roster head counts.
    pub membership: MembershipSummary,
    /// Bylaw residency compliance.
    pub compliance: ComplianceReport,
    /// Year-to-date budget vs actual through the report month.
    pub performance: BudgetPerformance,
    /// Capital projects completed this year.
    pub capex_completed: Vec<CapexProject>,
    /// Unfinished projects planned for the report month or later.
    pub capex_upcoming: Vec<CapexProject>,
    /// Every capital project planned this year.
    pub planned_capex: Vec<CapexProject>,
    /// Tracked assets due for replacement.
    pub capex_alerts: Vec<CapexAlert>,
    /// Maintenance done during the fiscal year.
    pub maintenance_completed: Vec<CompletedMaintenance>,
    /// Maintenance due within the horizon or overdue.
    pub maintenance_upcoming: Vec<MaintenanceAlert>,
    /// Revenue grouped by category.
    pub revenue_by_category: Vec<CategoryTotal>,
    /// Expenses grouped by category.
    pub expense_by_category: Vec<CategoryTotal>,
    /// The twelve projection rows.
    pub projection: Vec<ProjectionRow>,
    /// Year-end low balance warnings.
    pub balance_warnings: Vec<BalanceWarning>,
    /// Transactions left out of the actuals.
    pub unclassified_transactions: Vec<UnclassifiedTransactionWarning>,
}
