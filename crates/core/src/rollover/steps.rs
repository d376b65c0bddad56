//! The reviewable steps of the year-end roll-forward.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use clubfin_shared::types::{CapexProjectId, MemberId};

use crate::budget::{Budget, BudgetService, CapexProject, MajorMaintenanceItem};
use crate::fiscal::{FiscalMonth, FiscalYear};
use crate::ledger::MonthlyActuals;
use crate::membership::{Member, MemberType};

/// Everything the next fiscal year starts with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolloverPlan {
    /// Year being closed.
    pub from: FiscalYear,
    /// Year being opened.
    pub to: FiscalYear,
    /// Next year's starting balance.
    pub starting_balance: Decimal,
    /// Seeded budget for the next year.
    pub budget: Budget,
    /// Roster carried into the next year.
    pub members: Vec<Member>,
    /// Unfinished projects to schedule again.
    pub capex_to_replan: Vec<CapexProject>,
}

/// Year-end roll-forward derivations.
pub struct YearEndRollover;

impl YearEndRollover {
    /// Starting balance plus the full year's actual net.
    #[must_use]
    pub fn next_starting_balance(budget: &Budget, actuals: &MonthlyActuals) -> Decimal {
        budget.starting_balance + actuals.totals().net()
    }

    /// Next year's budget, seeded from this year's actuals.
    ///
    /// Revenue and G&A repeat the actuals. OPEX repeats the actuals less the
    /// month's budgeted major maintenance, floored at zero. CAPEX starts at
    /// zero everywhere since projects are planned again by hand.
    #[must_use]
    pub fn seed_budget(
        budget: &Budget,
        actuals: &MonthlyActuals,
        maintenance: &[MajorMaintenanceItem],
    ) -> Budget {
        let maintenance = BudgetService::maintenance_by_month(maintenance);
        let mut next = Budget::new(
            budget.fiscal_year.next(),
            Self::next_starting_balance(budget, actuals),
            budget.low_balance_threshold,
        );
        let note = format!("Rolled forward from {}", budget.fiscal_year);

        for month in FiscalMonth::ALL {
            let actual = actuals.month(month);
            let line = next.line_mut(month);
            line.revenue = actual.revenue;
            line.opex = (actual.opex - maintenance[month.index()]).max(Decimal::ZERO);
            line.capex = Decimal::ZERO;
            line.ga = actual.ga;
            line.notes.clone_from(&note);
        }
        next
    }

    /// The roster for next year.
    ///
    /// Each member gets a new identity pointing back at this year's record,
    /// becomes a returning member, and starts unpaid. Dues inputs carry over
    /// except one-off custom discounts.
    #[must_use]
    pub fn carry_members(members: &[Member]) -> Vec<Member> {
        members
            .iter()
            .map(|member| {
                let mut next = member.clone();
                next.id = MemberId::new();
                next.previous_member_id = Some(member.id);
                next.fiscal_year = member.fiscal_year.next();
                next.member_type = MemberType::Return;
                next.date_paid = None;
                next.payment_method = None;
                next.refunded = false;
                next.refund_amount = None;
                next.refund_date = None;
                next.refund_reason = None;
                next.payment_transaction_id = None;
                next.refund_transaction_id = None;
                next.dues.custom_discounts.clear();
                next.dues.recalculate();
                next
            })
            .collect()
    }

    /// Unfinished projects, moved to next year and unscheduled.
    #[must_use]
    pub fn carry_capex(projects: &[CapexProject]) -> Vec<CapexProject> {
        projects
            .iter()
            .filter(|p| !p.completed)
            .map(|p| CapexProject {
                id: CapexProjectId::new(),
                fiscal_year: p.fiscal_year.next(),
                month: None,
                completed: false,
                actual_amount: None,
                ..p.clone()
            })
            .collect()
    }

    /// Runs every step.
    #[must_use]
    pub fn prepare(
        budget: &Budget,
        actuals: &MonthlyActuals,
        maintenance: &[MajorMaintenanceItem],
        projects: &[CapexProject],
        members: &[Member],
    ) -> RolloverPlan {
        let next = Self::seed_budget(budget, actuals, maintenance);
        RolloverPlan {
            from: budget.fiscal_year,
            to: next.fiscal_year,
            starting_balance: next.starting_balance,
            budget: next,
            members: Self::carry_members(members),
            capex_to_replan: Self::carry_capex(projects),
        }
    }
}
