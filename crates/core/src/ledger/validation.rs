//! Business rule validation for transactions entering storage.

use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::{ExpenseType, Transaction, TransactionType};

/// Validates a transaction before it is written.
///
/// # Errors
///
/// Returns the first rule the transaction breaks.
pub fn validate_transaction(tx: &Transaction) -> Result<(), LedgerError> {
    if tx.amount <= Decimal::ZERO {
        return Err(LedgerError::NonPositiveAmount(tx.amount));
    }

    if tx.amount.normalize().scale() > 2 {
        return Err(LedgerError::TooPrecise(tx.amount));
    }

    match (&tx.transaction_type, &tx.expense_type) {
        (TransactionType::Revenue, None)
        | (
            TransactionType::Expense,
            Some(ExpenseType::Opex | ExpenseType::Capex | ExpenseType::GeneralAdmin),
        ) => {}
        (TransactionType::Revenue, Some(_)) => return Err(LedgerError::UnexpectedExpenseType),
        (TransactionType::Expense, None) => return Err(LedgerError::MissingExpenseType),
        (TransactionType::Expense, Some(ExpenseType::Other(raw))) => {
            return Err(LedgerError::UnknownExpenseType(raw.clone()));
        }
        (TransactionType::Other(raw), _) => return Err(LedgerError::UnknownType(raw.clone())),
    }

    if tx.category.trim().is_empty() {
        return Err(LedgerError::EmptyCategory);
    }

    Ok(())
}
