//! Summary calculations over transactions and budgets.
//!
//! These functions power the dashboard endpoints. They take plain slices so
//! that they can be tested without a store.

use serde::Serialize;

use crate::models::{Budget, CategoryId, MonthKey, Transaction, TransactionKind};

/// Income, expenses and net for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    /// The month the summary covers.
    pub month: MonthKey,
    /// The total income for the month.
    pub income: f64,
    /// The total expenses for the month.
    pub expenses: f64,
    /// Income minus expenses.
    pub net: f64,
}

/// Total expenses for one category in a month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// The category the total covers.
    pub category: CategoryId,
    /// The total expenses for the category.
    pub total: f64,
}

/// How a category's spending compares against its budget for a month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetComparison {
    /// The category the comparison covers.
    pub category: CategoryId,
    /// The budgeted amount, zero when no budget is set.
    pub budget: f64,
    /// The total expenses for the category.
    pub spent: f64,
    /// How much of the budget is left, never negative.
    pub remaining: f64,
    /// How far spending exceeds the budget, never negative.
    pub over: f64,
}

/// The `count` months ending at `latest`, oldest first.
pub fn last_months(latest: MonthKey, count: usize) -> Vec<MonthKey> {
    let mut months = Vec::with_capacity(count);
    let mut month = latest;

    for _ in 0..count {
        months.push(month);
        month = month.previous();
    }

    months.reverse();
    months
}

/// Summarise income and expenses for each of `months`.
///
/// Months with no transactions get a summary of zeros.
pub fn monthly_summary(transactions: &[Transaction], months: &[MonthKey]) -> Vec<MonthlySummary> {
    months
        .iter()
        .map(|&month| {
            let mut income = 0.0;
            let mut expenses = 0.0;

            for transaction in transactions {
                if !month.contains(transaction.date()) {
                    continue;
                }

                match transaction.kind() {
                    TransactionKind::Income => income += transaction.amount(),
                    TransactionKind::Expense => expenses += transaction.amount(),
                }
            }

            MonthlySummary {
                month,
                income,
                expenses,
                net: income - expenses,
            }
        })
        .collect()
}

/// Total expenses per category for `month`, largest total first.
///
/// Categories with no expenses in `month` are omitted.
pub fn category_totals(transactions: &[Transaction], month: MonthKey) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = CategoryId::ALL
        .iter()
        .filter_map(|&category| {
            let total = expenses_for(transactions, category, month);

            (total > 0.0).then_some(CategoryTotal { category, total })
        })
        .collect();

    totals.sort_by(|a, b| {
        b.total
            .total_cmp(&a.total)
            .then_with(|| a.category.as_str().cmp(b.category.as_str()))
    });

    totals
}

/// Compare spending against budgets per category for `month`.
///
/// Categories with neither a budget nor spending are omitted.
pub fn budget_comparison(
    budgets: &[Budget],
    transactions: &[Transaction],
    month: MonthKey,
) -> Vec<BudgetComparison> {
    CategoryId::ALL
        .iter()
        .filter_map(|&category| {
            let budget = budgets
                .iter()
                .find(|budget| budget.category_id() == category && budget.month() == month)
                .map(Budget::amount)
                .unwrap_or_default();
            let spent = expenses_for(transactions, category, month);

            if budget <= 0.0 && spent <= 0.0 {
                return None;
            }

            Some(BudgetComparison {
                category,
                budget,
                spent,
                remaining: (budget - spent).max(0.0),
                over: (spent - budget).max(0.0),
            })
        })
        .collect()
}

/// The percentage change from `previous` to `current`.
///
/// Returns zero when `previous` is zero or negative, since there is no
/// meaningful baseline to compare against.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous <= 0.0 {
        return 0.0;
    }

    (current - previous) / previous * 100.0
}

fn expenses_for(transactions: &[Transaction], category: CategoryId, month: MonthKey) -> f64 {
    transactions
        .iter()
        .filter(|transaction| {
            transaction.kind() == TransactionKind::Expense
                && transaction.category() == category
                && month.contains(transaction.date())
        })
        .map(Transaction::amount)
        .sum()
}

#[cfg(test)]
mod aggregation_tests {
    use time::macros::date;

    use crate::models::{
        Budget, CategoryId, MonthKey, Transaction, TransactionBuilder, TransactionKind,
    };

    use super::{
        budget_comparison, category_totals, last_months, monthly_summary, percent_change,
    };

    fn transaction(
        amount: f64,
        date: time::Date,
        category: CategoryId,
        kind: TransactionKind,
    ) -> Transaction {
        TransactionBuilder::new(amount, category, kind)
            .unwrap()
            .date(date)
            .finalise(0)
    }

    #[test]
    fn last_months_crosses_year_boundary_oldest_first() {
        let months = last_months(MonthKey::new(2024, 2).unwrap(), 4);

        let want: Vec<MonthKey> = ["2023-11", "2023-12", "2024-01", "2024-02"]
            .iter()
            .map(|text| text.parse().unwrap())
            .collect();

        assert_eq!(months, want);
    }

    #[test]
    fn monthly_summary_splits_income_and_expenses_by_month() {
        let transactions = vec![
            transaction(
                1000.0,
                date!(2024 - 01 - 01),
                CategoryId::Other,
                TransactionKind::Income,
            ),
            transaction(
                300.0,
                date!(2024 - 01 - 15),
                CategoryId::Food,
                TransactionKind::Expense,
            ),
            transaction(
                50.0,
                date!(2024 - 02 - 03),
                CategoryId::Transport,
                TransactionKind::Expense,
            ),
        ];
        let months = [
            "2024-01".parse().unwrap(),
            "2024-02".parse().unwrap(),
            "2024-03".parse().unwrap(),
        ];

        let summaries = monthly_summary(&transactions, &months);

        assert_eq!(summaries.len(), 3);
        assert_eq!(summaries[0].income, 1000.0);
        assert_eq!(summaries[0].expenses, 300.0);
        assert_eq!(summaries[0].net, 700.0);
        assert_eq!(summaries[1].expenses, 50.0);
        assert_eq!(summaries[1].net, -50.0);
        assert_eq!(summaries[2].income, 0.0);
        assert_eq!(summaries[2].expenses, 0.0);
    }

    #[test]
    fn category_totals_ignores_income_and_sorts_by_total() {
        let month: MonthKey = "2024-01".parse().unwrap();
        let transactions = vec![
            transaction(
                100.0,
                date!(2024 - 01 - 01),
                CategoryId::Food,
                TransactionKind::Expense,
            ),
            transaction(
                250.0,
                date!(2024 - 01 - 02),
                CategoryId::Rent,
                TransactionKind::Expense,
            ),
            transaction(
                1000.0,
                date!(2024 - 01 - 03),
                CategoryId::Other,
                TransactionKind::Income,
            ),
            transaction(
                40.0,
                date!(2024 - 02 - 01),
                CategoryId::Food,
                TransactionKind::Expense,
            ),
        ];

        let totals = category_totals(&transactions, month);

        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].category, CategoryId::Rent);
        assert_eq!(totals[0].total, 250.0);
        assert_eq!(totals[1].category, CategoryId::Food);
        assert_eq!(totals[1].total, 100.0);
    }

    #[test]
    fn budget_comparison_reports_remaining_and_over() {
        let month: MonthKey = "2024-01".parse().unwrap();
        let budgets = vec![
            Budget::new(CategoryId::Food, month, 200.0).unwrap(),
            Budget::new(CategoryId::Rent, month, 1000.0).unwrap(),
        ];
        let transactions = vec![
            transaction(
                250.0,
                date!(2024 - 01 - 10),
                CategoryId::Food,
                TransactionKind::Expense,
            ),
            transaction(
                800.0,
                date!(2024 - 01 - 01),
                CategoryId::Rent,
                TransactionKind::Expense,
            ),
            transaction(
                30.0,
                date!(2024 - 01 - 20),
                CategoryId::Transport,
                TransactionKind::Expense,
            ),
        ];

        let comparisons = budget_comparison(&budgets, &transactions, month);

        assert_eq!(comparisons.len(), 3);

        let food = &comparisons[0];
        assert_eq!(food.category, CategoryId::Food);
        assert_eq!(food.remaining, 0.0);
        assert_eq!(food.over, 50.0);

        let rent = comparisons
            .iter()
            .find(|comparison| comparison.category == CategoryId::Rent)
            .unwrap();
        assert_eq!(rent.remaining, 200.0);
        assert_eq!(rent.over, 0.0);

        // Spending without a budget still shows up.
        let transport = comparisons
            .iter()
            .find(|comparison| comparison.category == CategoryId::Transport)
            .unwrap();
        assert_eq!(transport.budget, 0.0);
        assert_eq!(transport.spent, 30.0);
    }

    #[test]
    fn budget_comparison_omits_untouched_categories() {
        let month: MonthKey = "2024-01".parse().unwrap();

        let comparisons = budget_comparison(&[], &[], month);

        assert_eq!(comparisons, vec![]);
    }

    #[test]
    fn percent_change_handles_zero_baseline() {
        assert_eq!(percent_change(150.0, 100.0), 50.0);
        assert_eq!(percent_change(50.0, 100.0), -50.0);
        assert_eq!(percent_change(100.0, 0.0), 0.0);
        assert_eq!(percent_change(100.0, -10.0), 0.0);
    }
}
