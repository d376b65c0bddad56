//! Ledger domain types: transactions and their classification.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use clubfin_shared::types::{CapexProjectId, MaintenanceItemId, MemberId, TransactionId};

use crate::fiscal::FiscalYear;

/// Transaction direction.
///
/// Unrecognized values read from storage are kept verbatim in `Other` so
/// aggregation can report them instead of failing to load the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in.
    Revenue,
    /// Money going out.
    Expense,
    /// Any other stored value.
    #[serde(untagged)]
    Other(String),
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Revenue => f.write_str("revenue"),
            Self::Expense => f.write_str("expense"),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}

/// Expense classification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseType {
    /// Operating expense.
    #[serde(rename = "OPEX")]
    Opex,
    /// Capital expenditure.
    #[serde(rename = "CAPEX")]
    Capex,
    /// General and administrative expense.
    #[serde(rename = "G&A")]
    GeneralAdmin,
    /// Any other stored value.
    #[serde(untagged)]
    Other(String),
}

impl std::fmt::Display for ExpenseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Opex => f.write_str("OPEX"),
            Self::Capex => f.write_str("CAPEX"),
            Self::GeneralAdmin => f.write_str("G&A"),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}

/// A posted ledger transaction.
///
/// Immutable once created; storage may supersede it with an explicit update
/// or delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction ID.
    pub id: TransactionId,
    /// Revenue or expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Expense classification, required iff this is an expense.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense_type: Option<ExpenseType>,
    /// Category label (e.g. "Membership Dues").
    pub category: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Positive amount in currency units.
    pub amount: Decimal,
    /// Calendar date the transaction posted.
    pub date: NaiveDate,
    /// Fiscal year whose collection owns this transaction.
    pub fiscal_year: FiscalYear,
    /// Member whose dues or refund produced this transaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_id: Option<MemberId>,
    /// Capital project this spend belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capex_project_id: Option<CapexProjectId>,
    /// Major maintenance item this spend belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_item_id: Option<MaintenanceItemId>,
    /// Original transaction this one refunds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refund_of: Option<TransactionId>,
    /// Payment method label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

impl Transaction {
    /// Creates a revenue transaction dated `date`, owned by the fiscal year
    /// containing that date.
    #[must_use]
    pub fn revenue(category: impl Into<String>, amount: Decimal, date: NaiveDate) -> Self {
        Self::build(TransactionType::Revenue, None, category.into(), amount, date)
    }

    /// Creates an expense transaction dated `date`, owned by the fiscal year
    /// containing that date.
    #[must_use]
    pub fn expense(
        expense_type: ExpenseType,
        category: impl Into<String>,
        amount: Decimal,
        date: NaiveDate,
    ) -> Self {
        Self::build(
            TransactionType::Expense,
            Some(expense_type),
            category.into(),
            amount,
            date,
        )
    }

    fn build(
        transaction_type: TransactionType,
        expense_type: Option<ExpenseType>,
        category: String,
        amount: Decimal,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            transaction_type,
            expense_type,
            category,
            description: String::new(),
            amount,
            date,
            fiscal_year: FiscalYear::for_date(date),
            member_id: None,
            capex_project_id: None,
            maintenance_item_id: None,
            refund_of: None,
            payment_method: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Links the transaction to a member.
    #[must_use]
    pub fn with_member(mut self, member_id: MemberId) -> Self {
        self.member_id = Some(member_id);
        self
    }

    /// Links the transaction to a capital project.
    #[must_use]
    pub fn with_capex_project(mut self, project_id: CapexProjectId) -> Self {
        self.capex_project_id = Some(project_id);
        self
    }

    /// Links the transaction to a major maintenance item.
    #[must_use]
    pub fn with_maintenance_item(mut self, item_id: MaintenanceItemId) -> Self {
        self.maintenance_item_id = Some(item_id);
        self
    }

    /// Marks the transaction as a refund of `original`.
    #[must_use]
    pub fn refunding(mut self, original: TransactionId) -> Self {
        self.refund_of = Some(original);
        self
    }

    /// Classifies the transaction into the bucket it aggregates into.
    #[must_use]
    pub fn classify(&self) -> Classification {
        match (&self.transaction_type, &self.expense_type) {
            (TransactionType::Revenue, _) => Classification::Revenue,
            (TransactionType::Expense, Some(ExpenseType::Opex)) => Classification::Opex,
            (TransactionType::Expense, Some(ExpenseType::Capex)) => Classification::Capex,
            (TransactionType::Expense, Some(ExpenseType::GeneralAdmin)) => {
                Classification::GeneralAdmin
            }
            (TransactionType::Expense, Some(ExpenseType::Other(raw))) => {
                Classification::Unclassified(UnclassifiedReason::UnknownExpenseType(raw.clone()))
            }
            (TransactionType::Expense, None) => {
                Classification::Unclassified(UnclassifiedReason::MissingExpenseType)
            }
            (TransactionType::Other(raw), _) => {
                Classification::Unclassified(UnclassifiedReason::UnknownType(raw.clone()))
            }
        }
    }
}

/// Bucket a transaction aggregates into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Revenue.
    Revenue,
    /// Operating expense.
    Opex,
    /// Capital expenditure.
    Capex,
    /// General and administrative expense.
    GeneralAdmin,
    /// Cannot be bucketed.
    Unclassified(UnclassifiedReason),
}

/// Why a transaction could not be classified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum UnclassifiedReason {
    /// `type` is neither revenue nor expense.
    UnknownType(String),
    /// Expense without an expense type.
    MissingExpenseType,
    /// Expense type is not OPEX, CAPEX or G&A.
    UnknownExpenseType(String),
}

impl std::fmt::Display for UnclassifiedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownType(raw) => write!(f, "unknown transaction type '{raw}'"),
            Self::MissingExpenseType => f.write_str("expense without expense type"),
            Self::UnknownExpenseType(raw) => write!(f, "unknown expense type '{raw}'"),
        }
    }
}

/// Revenue and the three expense classes for one period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowAmounts {
    /// Revenue.
    pub revenue: Decimal,
    /// Operating expense.
    pub opex: Decimal,
    /// Capital expenditure.
    pub capex: Decimal,
    /// General and administrative expense.
    pub ga: Decimal,
}

impl FlowAmounts {
    /// Revenue minus every expense class.
    #[must_use]
    pub fn net(&self) -> Decimal {
        self.revenue - self.opex - self.capex - self.ga
    }

    /// Returns true if any amount is negative.
    #[must_use]
    pub fn has_negative(&self) -> bool {
        [self.revenue, self.opex, self.capex, self.ga]
            .iter()
            .any(|amount| *amount < Decimal::ZERO)
    }
}

impl std::ops::Add for FlowAmounts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            revenue: self.revenue + rhs.revenue,
            opex: self.opex + rhs.opex,
            capex: self.capex + rhs.capex,
            ga: self.ga + rhs.ga,
        }
    }
}

impl std::iter::Sum for FlowAmounts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, x| acc + x)
    }
}
