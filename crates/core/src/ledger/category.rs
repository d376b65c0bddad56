//! Category grouping of a fiscal year's transactions.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{Transaction, TransactionType};
use crate::fiscal::FiscalYear;

/// Total for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Category label.
    pub category: String,
    /// Sum of amounts.
    pub amount: Decimal,
    /// Number of transactions.
    pub transaction_count: u32,
}

/// Revenue in `fiscal_year` grouped by category, sorted by category name.
#[must_use]
pub fn revenue_by_category(transactions: &[Transaction], fiscal_year: FiscalYear) -> Vec<CategoryTotal> {
    group(transactions, fiscal_year, &TransactionType::Revenue)
}

/// Expenses in `fiscal_year` grouped by category, sorted by category name.
#[must_use]
pub fn expense_by_category(transactions: &[Transaction], fiscal_year: FiscalYear) -> Vec<CategoryTotal> {
    group(transactions, fiscal_year, &TransactionType::Expense)
}

fn group(
    transactions: &[Transaction],
    fiscal_year: FiscalYear,
    kind: &TransactionType,
) -> Vec<CategoryTotal> {
    let mut totals: BTreeMap<&str, (Decimal, u32)> = BTreeMap::new();

    for tx in transactions
        .iter()
        .filter(|tx| &tx.transaction_type == kind && fiscal_year.contains(tx.date))
    {
        let entry = totals.entry(tx.category.as_str()).or_default();
        entry.0 += tx.amount;
        entry.1 += 1;
    }

    totals
        .into_iter()
        .map(|(category, (amount, transaction_count))| CategoryTotal {
            category: category.to_string(),
            amount,
            transaction_count,
        })
        .collect()
}
