//! Due-date ordering and the due-soon flag

use chrono::{Local, NaiveDate};
use serde::Serialize;

use super::models::Bill;

/// Default due-soon window in days
pub const DEFAULT_DUE_SOON_DAYS: i64 = 7;

/// Today's date in local time
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Sort ascending by due date, keeping insertion order for ties
pub fn sort_by_due_date(bills: &mut [Bill]) {
    bills.sort_by_key(|b| b.due_date);
}

/// Sorted copy of a bill list
pub fn sorted_by_due_date(bills: &[Bill]) -> Vec<Bill> {
    let mut sorted = bills.to_vec();
    sort_by_due_date(&mut sorted);
    sorted
}

/// Whole calendar days from `today` until `due`, negative when overdue
pub fn days_until(due: NaiveDate, today: NaiveDate) -> i64 {
    (due - today).num_days()
}

/// Due today or within the next `window` days
pub fn is_due_soon(due: NaiveDate, today: NaiveDate, window: i64) -> bool {
    let days = days_until(due, today);
    (0..=window).contains(&days)
}

/// One row of the bill list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillEntry {
    #[serde(flatten)]
    pub bill: Bill,
    pub days_until: i64,
    pub due_soon: bool,
}

/// The bill list as displayed: sorted, each row flagged
pub fn list_entries(bills: &[Bill], today: NaiveDate, window: i64) -> Vec<BillEntry> {
    sorted_by_due_date(bills)
        .into_iter()
        .map(|bill| {
            let days = days_until(bill.due_date, today);
            BillEntry {
                due_soon: (0..=window).contains(&days),
                days_until: days,
                bill,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;
    use rust_decimal::Decimal;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn bill(id: &str, due: &str) -> Bill {
        Bill {
            id: id.to_string(),
            name: id.to_string(),
            amount: Decimal::ONE,
            due_date: date(due),
            category: Category::Fixed,
            note: None,
        }
    }

    #[test]
    fn test_sort_ascending() {
        let bills = vec![bill("a", "2024-05-01"), bill("b", "2024-03-10"), bill("c", "2024-04-20")];
        let order: Vec<String> = sorted_by_due_date(&bills).into_iter().map(|b| b.id).collect();
        assert_eq!(order, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let bills = vec![bill("x", "2024-04-01"), bill("y", "2024-03-01"), bill("z", "2024-04-01")];
        let order: Vec<String> = sorted_by_due_date(&bills).into_iter().map(|b| b.id).collect();
        assert_eq!(order, vec!["y", "x", "z"]);
    }

    #[test]
    fn test_due_soon_window_edges() {
        let today = date("2024-05-10");
        assert!(is_due_soon(date("2024-05-10"), today, 7));
        assert!(is_due_soon(date("2024-05-17"), today, 7));
        assert!(!is_due_soon(date("2024-05-18"), today, 7));
        assert!(!is_due_soon(date("2024-05-09"), today, 7));
    }

    #[test]
    fn test_days_until_crosses_month() {
        assert_eq!(days_until(date("2024-03-01"), date("2024-02-28")), 2);
        assert_eq!(days_until(date("2024-02-27"), date("2024-02-28")), -1);
    }

    #[test]
    fn test_list_entries_flags_rows() {
        let today = date("2024-05-10");
        let bills = vec![bill("late", "2024-06-30"), bill("soon", "2024-05-12")];
        let entries = list_entries(&bills, today, 7);
        assert_eq!(entries[0].bill.id, "soon");
        assert!(entries[0].due_soon);
        assert_eq!(entries[0].days_until, 2);
        assert!(!entries[1].due_soon);
    }
}
