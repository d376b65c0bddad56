//! Maintenance and capital replacement reminders.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use clubfin_shared::types::{CapexProjectId, MaintenanceItemId};

use super::types::{CapexProject, MajorMaintenanceItem};
use crate::fiscal::FiscalYear;

/// A maintenance item due soon or overdue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceAlert {
    /// Item ID.
    pub item_id: MaintenanceItemId,
    /// Item name.
    pub name: String,
    /// Earliest due date.
    pub due: NaiveDate,
    /// Days from today until due; negative when overdue.
    pub days_until: i64,
    /// Whether the due date has passed.
    pub overdue: bool,
    /// Amount budgeted for the work.
    pub budget_amount: Decimal,
}

/// A tracked capital asset whose replacement reminder year has arrived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapexAlert {
    /// Project ID.
    pub project_id: CapexProjectId,
    /// Project name.
    pub name: String,
    /// Reminder year.
    pub alert_year: FiscalYear,
    /// Planned amount.
    pub amount: Decimal,
    /// Whether the reminder year is already behind the year viewed.
    pub overdue: bool,
}

/// Maintenance items whose earliest due date is within `horizon_days` of
/// `today` or already past, soonest first.
#[must_use]
pub fn maintenance_alerts(
    items: &[MajorMaintenanceItem],
    today: NaiveDate,
    horizon_days: i64,
) -> Vec<MaintenanceAlert> {
    let mut alerts: Vec<MaintenanceAlert> = items
        .iter()
        .filter_map(|item| {
            let due = item.next_due()?;
            let days_until = (due - today).num_days();
            (days_until <= horizon_days).then(|| MaintenanceAlert {
                item_id: item.id,
                name: item.name.clone(),
                due,
                days_until,
                overdue: days_until < 0,
                budget_amount: item.budget_amount,
            })
        })
        .collect();
    alerts.sort_by(|a, b| a.due.cmp(&b.due).then_with(|| a.name.cmp(&b.name)));
    alerts
}

/// Tracked, incomplete projects whose reminder year is `fiscal_year` or
/// earlier.
#[must_use]
pub fn capex_alerts(projects: &[CapexProject], fiscal_year: FiscalYear) -> Vec<CapexAlert> {
    let mut alerts: Vec<CapexAlert> = projects
        .iter()
        .filter(|p| p.tracking_enabled && !p.completed)
        .filter_map(|p| {
            let alert_year = p.alert_year?;
            (alert_year <= fiscal_year).then(|| CapexAlert {
                project_id: p.id,
                name: p.name.clone(),
                alert_year,
                amount: p.amount,
                overdue: alert_year < fiscal_year,
            })
        })
        .collect();
    alerts.sort_by(|a, b| {
        a.alert_year
            .cmp(&b.alert_year)
            .then_with(|| a.name.cmp(&b.name))
    });
    alerts
}
