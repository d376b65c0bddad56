//! Keeps a member's dues payment and refund mirrored 1:1 in the ledger.

use rust_decimal::Decimal;

use clubfin_shared::types::TransactionId;

use super::types::Member;
use crate::ledger::{ExpenseType, Transaction, TransactionType};

/// Category of dues payment transactions.
pub const DUES_CATEGORY: &str = "Membership Dues";

/// Category of dues refund transactions.
pub const REFUND_CATEGORY: &str = "Membership Refund";

/// A write the ledger needs so it matches the member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerChange {
    /// Add a new transaction.
    Create(Transaction),
    /// Replace an existing transaction with the same id.
    Update(Transaction),
    /// Remove a transaction.
    Delete(TransactionId),
}

/// Changes to apply plus the links to store on the member afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerSyncPlan {
    /// Ledger writes, payment first.
    pub changes: Vec<LedgerChange>,
    /// Payment transaction the member links to after the writes.
    pub payment_transaction_id: Option<TransactionId>,
    /// Refund transaction the member links to after the writes.
    pub refund_transaction_id: Option<TransactionId>,
}

impl LedgerSyncPlan {
    /// Returns true if the ledger already matches the member.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Works out how the ledger must change to reflect `member`.
///
/// `payment` and `refund` are the transactions the member currently links
/// to, if any. A paid member with positive realized dues owns exactly one
/// revenue transaction; a refunded member additionally owns one OPEX refund
/// that points back at the payment. Anything the member no longer warrants is
/// deleted. The refund data is assumed to be validated already.
#[must_use]
pub fn plan_ledger_sync(
    member: &Member,
    payment: Option<&Transaction>,
    refund: Option<&Transaction>,
) -> LedgerSyncPlan {
    let mut changes = Vec::new();

    let desired_payment = desired_payment(member, payment);
    let payment_transaction_id = reconcile(&mut changes, payment, desired_payment);

    let desired_refund =
        payment_transaction_id.and_then(|payment_id| desired_refund(member, refund, payment_id));
    let refund_transaction_id = reconcile(&mut changes, refund, desired_refund);

    LedgerSyncPlan {
        changes,
        payment_transaction_id,
        refund_transaction_id,
    }
}

fn reconcile(
    changes: &mut Vec<LedgerChange>,
    existing: Option<&Transaction>,
    desired: Option<Transaction>,
) -> Option<TransactionId> {
    match (existing, desired) {
        (None, None) => None,
        (Some(old), None) => {
            changes.push(LedgerChange::Delete(old.id));
            None
        }
        (None, Some(new)) => {
            let id = new.id;
            changes.push(LedgerChange::Create(new));
            Some(id)
        }
        (Some(old), Some(new)) => {
            let id = new.id;
            if old != &new {
                changes.push(LedgerChange::Update(new));
            }
            Some(id)
        }
    }
}

fn desired_payment(member: &Member, existing: Option<&Transaction>) -> Option<Transaction> {
    let paid_on = member.date_paid?;
    if member.dues.total_realized <= Decimal::ZERO {
        return None;
    }

    let mut tx = existing.cloned().unwrap_or_else(|| {
        Transaction::revenue(DUES_CATEGORY, member.dues.total_realized, paid_on)
    });
    tx.transaction_type = TransactionType::Revenue;
    tx.expense_type = None;
    tx.category = DUES_CATEGORY.to_string();
    tx.description = format!("Membership dues - {}", member.name);
    tx.amount = member.dues.total_realized;
    tx.date = paid_on;
    tx.fiscal_year = member.fiscal_year;
    tx.member_id = Some(member.id);
    tx.refund_of = None;
    tx.payment_method.clone_from(&member.payment_method);
    Some(tx)
}

fn desired_refund(
    member: &Member,
    existing: Option<&Transaction>,
    payment_id: TransactionId,
) -> Option<Transaction> {
    if !member.refunded {
        return None;
    }
    let amount = member.refund_amount?;
    let refunded_on = member.refund_date?;

    let mut tx = existing.cloned().unwrap_or_else(|| {
        Transaction::expense(ExpenseType::Opex, REFUND_CATEGORY, amount, refunded_on)
    });
    tx.transaction_type = TransactionType::Expense;
    tx.expense_type = Some(ExpenseType::Opex);
    tx.category = REFUND_CATEGORY.to_string();
    tx.description = format!("Membership refund - {}", member.name);
    tx.amount = amount;
    tx.date = refunded_on;
    tx.fiscal_year = member.fiscal_year;
    tx.member_id = Some(member.id);
    tx.refund_of = Some(payment_id);
    Some(tx)
}
