//! Derived totals, always recomputed from the current bill list

use rust_decimal::Decimal;
use serde::Serialize;

use super::models::Bill;
use super::types::Category;

/// Sum of every bill amount, saturating at the edges of `Decimal`
pub fn total_expenses(bills: &[Bill]) -> Decimal {
    bills.iter().fold(Decimal::ZERO, |acc, b| saturating_add(acc, b.amount))
}

/// Starting balance minus total expenses; may be negative
pub fn remaining_balance(initial: Decimal, bills: &[Bill]) -> Decimal {
    saturating_sub(initial, total_expenses(bills))
}

// Stored state is not bounded by form validation, so sums must not panic.
pub(crate) fn saturating_add(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b)
        .unwrap_or(if b.is_sign_negative() { Decimal::MIN } else { Decimal::MAX })
}

pub(crate) fn saturating_sub(a: Decimal, b: Decimal) -> Decimal {
    a.checked_sub(b)
        .unwrap_or(if b.is_sign_negative() { Decimal::MAX } else { Decimal::MIN })
}

/// Per-category subtotal and count
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryTotals {
    pub fixed_total: Decimal,
    pub fixed_count: usize,
    pub variable_total: Decimal,
    pub variable_count: usize,
}

impl CategoryTotals {
    pub fn total(&self, category: Category) -> Decimal {
        match category {
            Category::Fixed => self.fixed_total,
            Category::Variable => self.variable_total,
        }
    }

    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::Fixed => self.fixed_count,
            Category::Variable => self.variable_count,
        }
    }
}

pub fn category_totals(bills: &[Bill]) -> CategoryTotals {
    let mut totals = CategoryTotals::default();
    for bill in bills {
        match bill.category {
            Category::Fixed => {
                totals.fixed_total = saturating_add(totals.fixed_total, bill.amount);
                totals.fixed_count += 1;
            }
            Category::Variable => {
                totals.variable_total = saturating_add(totals.variable_total, bill.amount);
                totals.variable_count += 1;
            }
        }
    }
    totals
}

/// Every figure shown on the summary cards
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub initial_balance: Decimal,
    pub total_expenses: Decimal,
    pub remaining_balance: Decimal,
    pub is_positive: bool,
    pub bill_count: usize,
    pub categories: CategoryTotals,
}

impl Summary {
    pub fn compute(initial: Decimal, bills: &[Bill]) -> Self {
        let total = total_expenses(bills);
        let remaining = saturating_sub(initial, total);
        Self {
            initial_balance: initial,
            total_expenses: total,
            remaining_balance: remaining,
            is_positive: remaining >= Decimal::ZERO,
            bill_count: bills.len(),
            categories: category_totals(bills),
        }
    }

    /// Expenses as a percentage of the starting balance, 0 when there is no balance
    pub fn spend_percent(&self) -> Decimal {
        if self.initial_balance <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        self.total_expenses
            .checked_div(self.initial_balance)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::ZERO)
    }

    /// A report is only produced when there is something to report
    pub fn export_enabled(&self) -> bool {
        self.initial_balance > Decimal::ZERO || self.bill_count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn bill(id: &str, amount: &str, category: Category) -> Bill {
        Bill {
            id: id.to_string(),
            name: format!("Conta {}", id),
            amount: Decimal::from_str(amount).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            category,
            note: None,
        }
    }

    #[test]
    fn test_total_is_order_independent() {
        let mut bills = vec![
            bill("1", "0.1", Category::Fixed),
            bill("2", "0.2", Category::Variable),
            bill("3", "99.99", Category::Fixed),
        ];
        let forward = total_expenses(&bills);
        bills.reverse();
        assert_eq!(forward, total_expenses(&bills));
        assert_eq!(forward, Decimal::from_str("100.29").unwrap());
    }

    #[test]
    fn test_remaining_balance_exact() {
        let bills = vec![bill("1", "0.1", Category::Fixed), bill("2", "0.2", Category::Fixed)];
        let summary = Summary::compute(Decimal::from_str("0.3").unwrap(), &bills);
        assert_eq!(summary.remaining_balance, Decimal::ZERO);
        assert!(summary.is_positive);

        let summary = Summary::compute(Decimal::from_str("0.29").unwrap(), &bills);
        assert_eq!(summary.remaining_balance, Decimal::from_str("-0.01").unwrap());
        assert!(!summary.is_positive);
    }

    #[test]
    fn test_huge_amounts_saturate() {
        let huge = "50000000000000000000000000000";
        let bills = vec![bill("1", huge, Category::Fixed), bill("2", huge, Category::Fixed)];
        let summary = Summary::compute(Decimal::from(10), &bills);
        assert_eq!(summary.total_expenses, Decimal::MAX);
        assert_eq!(summary.remaining_balance, Decimal::from(10) - Decimal::MAX);
        assert!(!summary.is_positive);
        assert_eq!(summary.categories.total(Category::Fixed), Decimal::MAX);

        let summary = Summary::compute(Decimal::from(-10), &[bill("1", &Decimal::MAX.to_string(), Category::Fixed)]);
        assert_eq!(summary.remaining_balance, Decimal::MIN);
    }

    #[test]
    fn test_category_totals() {
        let bills = vec![
            bill("1", "100", Category::Fixed),
            bill("2", "50.5", Category::Variable),
            bill("3", "25", Category::Fixed),
        ];
        let totals = category_totals(&bills);
        assert_eq!(totals.total(Category::Fixed), Decimal::from(125));
        assert_eq!(totals.count(Category::Fixed), 2);
        assert_eq!(totals.total(Category::Variable), Decimal::from_str("50.5").unwrap());
        assert_eq!(totals.count(Category::Variable), 1);
    }

    #[test]
    fn test_spend_percent() {
        let bills = vec![bill("1", "95", Category::Fixed)];
        assert_eq!(Summary::compute(Decimal::from(100), &bills).spend_percent(), Decimal::from(95));
        assert_eq!(Summary::compute(Decimal::ZERO, &bills).spend_percent(), Decimal::ZERO);
    }

    #[test]
    fn test_export_enabled() {
        assert!(!Summary::compute(Decimal::ZERO, &[]).export_enabled());
        assert!(Summary::compute(Decimal::from(10), &[]).export_enabled());
        assert!(Summary::compute(Decimal::ZERO, &[bill("1", "5", Category::Fixed)]).export_enabled());
    }
}
