//! Signal aggregators
//!
//! Pure reductions from raw transaction lists to the numeric summaries the
//! generators and the scorer consume. All of them are total on empty input.

use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::models::Transaction;

/// Sum of |amount| per category
pub fn group_by_category<'a, I>(transactions: I) -> HashMap<String, f64>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals: HashMap<String, f64> = HashMap::new();
    for tx in transactions {
        *totals.entry(tx.category.clone()).or_insert(0.0) += tx.amount.abs();
    }
    totals
}

/// Sum of |amount| for one category
pub fn category_amount<'a, I>(transactions: I, category: &str) -> f64
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(|t| t.category == category)
        .map(|t| t.amount.abs())
        .sum()
}

/// Partition by `date < boundary`: (before, at-or-after)
pub fn period_split<'a, I>(
    transactions: I,
    boundary: NaiveDate,
) -> (Vec<&'a Transaction>, Vec<&'a Transaction>)
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions.into_iter().partition(|t| t.date < boundary)
}

/// Mean of strictly positive amounts; 0 when there is no income
pub fn average_income<'a, I>(transactions: I) -> f64
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let incomes: Vec<f64> = transactions
        .into_iter()
        .filter(|t| t.is_income())
        .map(|t| t.amount)
        .collect();
    if incomes.is_empty() {
        0.0
    } else {
        incomes.iter().sum::<f64>() / incomes.len() as f64
    }
}

/// (total income, total expenses as a positive number)
pub fn income_expense_split<'a, I>(transactions: I) -> (f64, f64)
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut income = 0.0;
    let mut expenses = 0.0;
    for tx in transactions {
        if tx.is_income() {
            income += tx.amount;
        } else if tx.is_expense() {
            expenses += tx.amount.abs();
        }
    }
    (income, expenses)
}

/// Total expense |amount| per calendar month, emitted in month-key order
pub fn monthly_expense_series<'a, I>(transactions: I) -> Vec<f64>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut by_month: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for tx in transactions {
        if tx.is_expense() {
            *by_month.entry((tx.date.year(), tx.date.month())).or_insert(0.0) += tx.amount.abs();
        }
    }
    by_month.into_values().collect()
}

/// Total expense |amount| on the given calendar days
pub fn spending_on_days<'a, I>(transactions: I, days: &HashSet<NaiveDate>) -> f64
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(|t| t.is_expense() && days.contains(&t.date))
        .map(|t| t.amount.abs())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(date: (i32, u32, u32), amount: f64, category: &str) -> Transaction {
        Transaction {
            id: format!("{}-{}-{}-{}", date.0, date.1, date.2, amount),
            user_id: "u1".to_string(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            amount,
            category: category.to_string(),
            description: None,
        }
    }

    #[test]
    fn test_group_by_category_sums_absolute_amounts() {
        let txs = vec![
            tx((2026, 1, 1), -50.0, "dining"),
            tx((2026, 1, 2), -25.0, "dining"),
            tx((2026, 1, 3), 3000.0, "salary"),
        ];
        let grouped = group_by_category(&txs);
        assert_eq!(grouped["dining"], 75.0);
        assert_eq!(grouped["salary"], 3000.0);
    }

    #[test]
    fn test_empty_input_yields_empty_or_zero() {
        let txs: Vec<Transaction> = vec![];
        assert!(group_by_category(&txs).is_empty());
        assert_eq!(average_income(&txs), 0.0);
        assert_eq!(income_expense_split(&txs), (0.0, 0.0));
        assert!(monthly_expense_series(&txs).is_empty());
        assert_eq!(category_amount(&txs, "dining"), 0.0);
    }

    #[test]
    fn test_period_split_boundary_is_exclusive_on_before() {
        let boundary = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let txs = vec![
            tx((2026, 1, 31), -10.0, "a"),
            tx((2026, 2, 1), -20.0, "a"),
            tx((2026, 2, 2), -30.0, "a"),
        ];
        let (before, after) = period_split(&txs, boundary);
        assert_eq!(before.len(), 1);
        assert_eq!(after.len(), 2);
    }

    #[test]
    fn test_average_income_ignores_expenses() {
        let txs = vec![
            tx((2026, 1, 1), 1000.0, "salary"),
            tx((2026, 1, 15), 2000.0, "salary"),
            tx((2026, 1, 20), -500.0, "rent"),
        ];
        assert_eq!(average_income(&txs), 1500.0);
    }

    #[test]
    fn test_monthly_expense_series_is_ordered_by_month() {
        let txs = vec![
            tx((2026, 3, 5), -300.0, "a"),
            tx((2026, 1, 5), -100.0, "a"),
            tx((2026, 2, 5), -200.0, "a"),
            tx((2026, 1, 20), -50.0, "b"),
            tx((2026, 2, 10), 900.0, "salary"), // income excluded
        ];
        assert_eq!(monthly_expense_series(&txs), vec![150.0, 200.0, 300.0]);
    }

    #[test]
    fn test_spending_on_days_matches_calendar_day() {
        let stress_day = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
        let days: HashSet<NaiveDate> = [stress_day].into_iter().collect();
        let txs = vec![
            tx((2026, 1, 10), -40.0, "dining"),
            tx((2026, 1, 10), 100.0, "refund"), // income ignored
            tx((2026, 1, 11), -60.0, "dining"),
        ];
        assert_eq!(spending_on_days(&txs, &days), 40.0);
    }
}
