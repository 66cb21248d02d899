//! # Dashboard Aggregation
//!
//! Derived views over the aggregate, recomputed on demand. Nothing here is
//! incrementally maintained; each value is a fresh pass over the current
//! collections, which is cheap at one store's working-set size.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::state::StoreState;
use crate::types::TransactionKind;

// =============================================================================
// Dashboard Totals
// =============================================================================

/// The three headline numbers on the dashboard.
///
/// `total_sales` sums the **open**-sales collection: completing a sale
/// deletes its record, so completed revenue is visible only through the
/// cashbox transaction log, not here. The figure is a snapshot of carts in
/// progress, not historical turnover. Use [`PeriodSummary`] for the
/// transaction-log view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardTotals {
    /// Sum of open-sale totals at the moment of computation.
    pub total_sales: Money,

    /// Sum over the expenses collection.
    pub total_expenses: Money,

    /// `total_sales - total_expenses`.
    pub net_profit: Money,
}

impl From<&StoreState> for DashboardTotals {
    fn from(state: &StoreState) -> Self {
        let total_sales: Money = state.sales.iter().map(|s| s.total()).sum();
        let total_expenses: Money = state.expenses.iter().map(|e| e.amount()).sum();

        DashboardTotals {
            total_sales,
            total_expenses,
            net_profit: total_sales - total_expenses,
        }
    }
}

// =============================================================================
// Period Summary
// =============================================================================

/// Income and expense totals over a half-open time window `[from, to)`.
///
/// Income comes from the cashbox transaction log (i.e. completed sales),
/// expenses from the expenses collection, both bucketed by their recorded
/// timestamps. Daily/weekly/monthly reports are all just choices of window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// Window start (inclusive).
    pub from: DateTime<Utc>,

    /// Window end (exclusive).
    pub to: DateTime<Utc>,

    /// Sum of income transactions inside the window.
    pub income: Money,

    /// Number of income transactions inside the window.
    pub income_count: usize,

    /// Sum of expenses recorded inside the window.
    pub expenses: Money,

    /// Number of expenses recorded inside the window.
    pub expense_count: usize,

    /// `income - expenses`.
    pub net: Money,
}

impl PeriodSummary {
    /// Computes the summary for `[from, to)` over the current state.
    pub fn compute(state: &StoreState, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        let in_window = |at: DateTime<Utc>| at >= from && at < to;

        let income_entries = state
            .cashbox
            .transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Income && in_window(t.created_at));
        let (income, income_count) = income_entries
            .fold((Money::zero(), 0), |(sum, n), t| (sum + t.amount(), n + 1));

        let expense_entries = state.expenses.iter().filter(|e| in_window(e.created_at));
        let (expenses, expense_count) = expense_entries
            .fold((Money::zero(), 0), |(sum, n), e| (sum + e.amount(), n + 1));

        PeriodSummary {
            from,
            to,
            income,
            income_count,
            expenses,
            expense_count,
            net: income - expenses,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaymentMethod;
    use chrono::Duration;

    #[test]
    fn test_totals_on_empty_state() {
        let state = StoreState::new();
        let totals = DashboardTotals::from(&state);

        assert!(totals.total_sales.is_zero());
        assert!(totals.total_expenses.is_zero());
        assert!(totals.net_profit.is_zero());
    }

    #[test]
    fn test_totals_cover_open_sales_and_expenses() {
        let mut state = StoreState::new();
        let pen = state.add_product("Pen", Money::from_cents(250), 10, "Stationery");
        let sale = state.start_sale(None);
        state.add_item_to_sale(&sale.id, &pen.id, 4).unwrap();
        state.add_expense(Money::from_cents(300), "Supplies", "bags");

        let totals = DashboardTotals::from(&state);
        assert_eq!(totals.total_sales.cents(), 1000);
        assert_eq!(totals.total_expenses.cents(), 300);
        assert_eq!(totals.net_profit.cents(), 700);
    }

    #[test]
    fn test_completing_a_sale_moves_value_out_of_total_sales() {
        let mut state = StoreState::new();
        let pen = state.add_product("Pen", Money::from_cents(250), 10, "Stationery");
        let sale = state.start_sale(None);
        state.add_item_to_sale(&sale.id, &pen.id, 4).unwrap();

        assert_eq!(DashboardTotals::from(&state).total_sales.cents(), 1000);

        state
            .complete_sale(&sale.id, PaymentMethod::Cash, None)
            .unwrap();

        // The completed sale is gone from the dashboard; its value now
        // lives in the cashbox only.
        assert_eq!(DashboardTotals::from(&state).total_sales.cents(), 0);
        assert_eq!(state.cashbox.balance_cents, 1000);
    }

    #[test]
    fn test_net_profit_can_be_negative() {
        let mut state = StoreState::new();
        state.add_expense(Money::from_cents(5000), "Rent", "August");

        let totals = DashboardTotals::from(&state);
        assert_eq!(totals.net_profit.cents(), -5000);
        assert!(totals.net_profit.is_negative());
    }

    #[test]
    fn test_period_summary_half_open_window() {
        let mut state = StoreState::new();
        let pen = state.add_product("Pen", Money::from_cents(250), 10, "Stationery");
        let sale = state.start_sale(None);
        state.add_item_to_sale(&sale.id, &pen.id, 3).unwrap();
        state
            .complete_sale(&sale.id, PaymentMethod::Cash, None)
            .unwrap();
        state.add_expense(Money::from_cents(100), "Supplies", "tape");

        let now = Utc::now();
        let today = PeriodSummary::compute(
            &state,
            now - Duration::hours(1),
            now + Duration::hours(1),
        );
        assert_eq!(today.income.cents(), 750);
        assert_eq!(today.income_count, 1);
        assert_eq!(today.expenses.cents(), 100);
        assert_eq!(today.expense_count, 1);
        assert_eq!(today.net.cents(), 650);

        // A window that ends before the records were written sees nothing;
        // `to` is exclusive.
        let yesterday = PeriodSummary::compute(
            &state,
            now - Duration::hours(25),
            now - Duration::hours(1),
        );
        assert!(yesterday.income.is_zero());
        assert_eq!(yesterday.income_count, 0);
        assert!(yesterday.expenses.is_zero());
    }
}
