//! Dashboard aggregates.
//!
//! `compute_stats` is a pure full recompute over the current snapshot.
//! Nothing here is cached, patched incrementally or stored, so duplicate or
//! reordered change notifications cannot make the numbers drift; per-owner
//! entity counts are small enough that the recompute cost is irrelevant.

use serde::Serialize;

use crate::{SavingsGoal, Transaction, TransactionKind};

/// Derived totals shown on the dashboard. Never persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_income_minor: i64,
    pub total_expense_minor: i64,
    pub balance_minor: i64,
    pub savings_total_minor: i64,
}

/// Computes dashboard totals from a snapshot of transactions and goals.
///
/// All sums stay in integer arithmetic; `balance_minor` is always
/// `total_income_minor - total_expense_minor`, derived and never stored.
/// The result does not depend on the order of either slice.
#[must_use]
pub fn compute_stats(transactions: &[Transaction], goals: &[SavingsGoal]) -> DashboardStats {
    let (total_income_minor, total_expense_minor) =
        transactions
            .iter()
            .fold((0i64, 0i64), |(income, expense), tx| match tx.kind {
                TransactionKind::Income => (income.saturating_add(tx.amount_minor), expense),
                TransactionKind::Expense => (income, expense.saturating_add(tx.amount_minor)),
            });

    let savings_total_minor = goals
        .iter()
        .fold(0i64, |sum, goal| sum.saturating_add(goal.current_amount_minor));

    DashboardStats {
        total_income_minor,
        total_expense_minor,
        balance_minor: total_income_minor.saturating_sub(total_expense_minor),
        savings_total_minor,
    }
}

/// Percentage of a target reached, clamped to 0..=100.
///
/// Division happens only here, at presentation time; stored amounts are
/// never clamped or divided.
#[must_use]
pub fn progress_percent(accumulated_minor: i64, target_minor: i64) -> u8 {
    if target_minor <= 0 {
        return 0;
    }
    let pct = (i128::from(accumulated_minor.max(0)) * 100) / i128::from(target_minor);
    pct.min(100) as u8
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    use super::*;

    fn tx(kind: TransactionKind, amount_minor: i64) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            owner_id: "alice".to_string(),
            title: "entry".to_string(),
            kind,
            amount_minor,
            category: "Lainnya".to_string(),
            occurred_at: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            notes: None,
            created_at: Utc::now(),
        }
    }

    fn goal(current_amount_minor: i64) -> SavingsGoal {
        SavingsGoal {
            id: Uuid::new_v4(),
            owner_id: "alice".to_string(),
            title: "Dana Darurat".to_string(),
            target_amount_minor: 1_000_000,
            current_amount_minor,
            deadline: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn balance_is_income_minus_expense() {
        let transactions = vec![
            tx(TransactionKind::Income, 2_000_000),
            tx(TransactionKind::Expense, 500_000),
        ];
        let goals = vec![goal(100_000)];

        let stats = compute_stats(&transactions, &goals);
        assert_eq!(stats.total_income_minor, 2_000_000);
        assert_eq!(stats.total_expense_minor, 500_000);
        assert_eq!(stats.balance_minor, 1_500_000);
        assert_eq!(stats.savings_total_minor, 100_000);
    }

    #[test]
    fn empty_snapshot_is_all_zero() {
        assert_eq!(compute_stats(&[], &[]), DashboardStats::default());
    }

    #[test]
    fn result_is_order_independent() {
        let mut transactions = vec![
            tx(TransactionKind::Income, 100),
            tx(TransactionKind::Expense, 40),
            tx(TransactionKind::Income, 7),
            tx(TransactionKind::Expense, 3),
        ];
        let mut goals = vec![goal(10), goal(25), goal(1)];

        let reference = compute_stats(&transactions, &goals);
        transactions.reverse();
        goals.rotate_left(1);
        assert_eq!(compute_stats(&transactions, &goals), reference);
        // Recomputing over the same snapshot is idempotent.
        assert_eq!(compute_stats(&transactions, &goals), reference);
    }

    #[test]
    fn negative_balance_is_representable() {
        let transactions = vec![
            tx(TransactionKind::Income, 100),
            tx(TransactionKind::Expense, 250),
        ];
        let stats = compute_stats(&transactions, &[]);
        assert_eq!(stats.balance_minor, -150);
    }

    #[test]
    fn progress_is_clamped_for_display() {
        assert_eq!(progress_percent(0, 1_000_000), 0);
        assert_eq!(progress_percent(300_000, 1_000_000), 30);
        assert_eq!(progress_percent(1_000_000, 1_000_000), 100);
        assert_eq!(progress_percent(1_500_000, 1_000_000), 100);
        assert_eq!(progress_percent(-5, 1_000), 0);
        assert_eq!(progress_percent(10, 0), 0);
    }
}
