//! Club-wide settings: category and payment method lists.

use serde::{Deserialize, Serialize};

use crate::membership::{DUES_CATEGORY, REFUND_CATEGORY};

/// Revenue categories every club starts with.
pub const BUILT_IN_REVENUE_CATEGORIES: [&str; 7] = [
    DUES_CATEGORY,
    "Guest Fees",
    "Swim Lessons",
    "Concessions",
    "Events",
    "Donations",
    "Interest",
];

/// Expense categories every club starts with.
pub const BUILT_IN_EXPENSE_CATEGORIES: [&str; 9] = [
    REFUND_CATEGORY,
    "Payroll",
    "Utilities",
    "Pool Chemicals",
    "Repairs & Maintenance",
    "Insurance",
    "Capital Improvements",
    "Professional Services",
    "Supplies",
];

/// Payment methods every club starts with.
pub const BUILT_IN_PAYMENT_METHODS: [&str; 4] = ["Cash", "Check", "Credit Card", "Bank Transfer"];

/// Which category list a custom category extends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    /// Revenue categories.
    Revenue,
    /// Expense categories.
    Expense,
}

/// Settings shared by every fiscal year of a club.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubSettings {
    /// Revenue categories added by the club.
    #[serde(default)]
    pub custom_revenue_categories: Vec<String>,
    /// Expense categories added by the club.
    #[serde(default)]
    pub custom_expense_categories: Vec<String>,
    /// Payment methods added by the club.
    #[serde(default)]
    pub payment_methods: Vec<String>,
}

impl ClubSettings {
    /// Built-in and custom revenue categories.
    #[must_use]
    pub fn revenue_categories(&self) -> Vec<String> {
        merge(&BUILT_IN_REVENUE_CATEGORIES, &self.custom_revenue_categories)
    }

    /// Built-in and custom expense categories.
    #[must_use]
    pub fn expense_categories(&self) -> Vec<String> {
        merge(&BUILT_IN_EXPENSE_CATEGORIES, &self.custom_expense_categories)
    }

    /// Built-in and custom payment methods.
    #[must_use]
    pub fn all_payment_methods(&self) -> Vec<String> {
        merge(&BUILT_IN_PAYMENT_METHODS, &self.payment_methods)
    }

    /// Adds a custom category unless it is blank or already known.
    ///
    /// Returns true if the category was added.
    pub fn add_custom_category(&mut self, kind: CategoryKind, name: &str) -> bool {
        let (known, custom) = match kind {
            CategoryKind::Revenue => (self.revenue_categories(), &mut self.custom_revenue_categories),
            CategoryKind::Expense => (self.expense_categories(), &mut self.custom_expense_categories),
        };
        push_unique(&known, custom, name)
    }

    /// Adds a payment method unless it is blank or already known.
    ///
    /// Returns true if the method was added.
    pub fn add_payment_method(&mut self, name: &str) -> bool {
        let known = self.all_payment_methods();
        push_unique(&known, &mut self.payment_methods, name)
    }
}

fn merge(built_in: &[&str], custom: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = built_in.iter().map(ToString::to_string).collect();
    for name in custom {
        if !contains_ignore_case(&merged, name) {
            merged.push(name.clone());
        }
    }
    merged
}

fn push_unique(known: &[String], custom: &mut Vec<String>, name: &str) -> bool {
    let name = name.trim();
    if name.is_empty() || contains_ignore_case(known, name) {
        return false;
    }
    custom.push(name.to_string());
    true
}

fn contains_ignore_case(list: &[String], name: &str) -> bool {
    list.iter().any(|existing| existing.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_list_built_ins() {
        let settings = ClubSettings::default();
        assert_eq!(settings.revenue_categories().len(), BUILT_IN_REVENUE_CATEGORIES.len());
        assert!(settings.revenue_categories().contains(&DUES_CATEGORY.to_string()));
        assert!(settings.expense_categories().contains(&REFUND_CATEGORY.to_string()));
    }

    #[test]
    fn test_add_custom_category_dedupes_case_insensitively() {
        let mut settings = ClubSettings::default();

        assert!(settings.add_custom_category(CategoryKind::Revenue, "Swim Team"));
        assert!(!settings.add_custom_category(CategoryKind::Revenue, "swim team"));
        assert!(!settings.add_custom_category(CategoryKind::Revenue, "guest fees"));
        assert!(!settings.add_custom_category(CategoryKind::Expense, "  "));

        assert_eq!(settings.custom_revenue_categories, vec!["Swim Team"]);
        assert!(settings.custom_expense_categories.is_empty());
        assert_eq!(
            settings.revenue_categories().last().map(String::as_str),
            Some("Swim Team")
        );
    }

    #[test]
    fn test_merge_ignores_stored_duplicates() {
        let settings = ClubSettings {
            custom_expense_categories: vec!["PAYROLL".into(), "Lifeguard Training".into()],
            ..ClubSettings::default()
        };
        let categories = settings.expense_categories();
        assert_eq!(categories.len(), BUILT_IN_EXPENSE_CATEGORIES.len() + 1);
    }

    #[test]
    fn test_add_payment_method() {
        let mut settings = ClubSettings::default();
        assert!(settings.add_payment_method(" Venmo "));
        assert!(!settings.add_payment_method("cash"));
        assert_eq!(settings.payment_methods, vec!["Venmo"]);
        assert_eq!(settings.all_payment_methods().len(), 5);
    }
}
