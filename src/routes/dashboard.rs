//! The endpoints for the dashboard summaries.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    aggregation::{
        BudgetComparison, CategoryTotal, MonthlySummary, budget_comparison, category_totals,
        last_months, monthly_summary, percent_change,
    },
    models::MonthKey,
    stores::{BudgetStore, TransactionStore},
};

/// The number of months the monthly summary covers when the client does not
/// ask for a specific count.
const DEFAULT_MONTH_COUNT: usize = 6;

/// The query parameters for the monthly summary endpoint.
#[derive(Debug, Deserialize)]
pub struct MonthlyParams {
    months: Option<usize>,
}

/// The query parameters for the per-month summary endpoints.
#[derive(Debug, Deserialize)]
pub struct MonthParam {
    month: Option<String>,
}

/// The response body for the monthly summary endpoint.
#[derive(Debug, Serialize)]
pub struct MonthlySummaryResponse {
    /// One summary per month, oldest first.
    pub months: Vec<MonthlySummary>,
    /// Percentage change in income from the previous month to the latest.
    pub income_change: f64,
    /// Percentage change in expenses from the previous month to the latest.
    pub expense_change: f64,
}

fn resolve_month(param: Option<String>) -> Result<MonthKey, Error> {
    match param {
        Some(text) => text.parse(),
        None => Ok(MonthKey::containing(OffsetDateTime::now_utc().date())),
    }
}

/// Summarise income and expenses for recent months.
///
/// The `months` query parameter controls how many months are covered,
/// clamped to `1..=24`.
pub async fn get_monthly_summary<T, B>(
    State(state): State<AppState<T, B>>,
    Query(params): Query<MonthlyParams>,
) -> Result<Json<MonthlySummaryResponse>, Error>
where
    T: TransactionStore + Clone + Send + Sync,
    B: BudgetStore + Clone + Send + Sync,
{
    let count = params.months.unwrap_or(DEFAULT_MONTH_COUNT).clamp(1, 24);
    let latest = MonthKey::containing(OffsetDateTime::now_utc().date());

    let transactions = state.transaction_store.get_all()?;
    let months = monthly_summary(&transactions, &last_months(latest, count));

    let (income_change, expense_change) = match months.as_slice() {
        [.., previous, latest] => (
            percent_change(latest.income, previous.income),
            percent_change(latest.expenses, previous.expenses),
        ),
        _ => (0.0, 0.0),
    };

    Ok(Json(MonthlySummaryResponse {
        months,
        income_change,
        expense_change,
    }))
}

/// Total expenses per category for a month, defaulting to the current month.
pub async fn get_category_summary<T, B>(
    State(state): State<AppState<T, B>>,
    Query(params): Query<MonthParam>,
) -> Result<Json<Vec<CategoryTotal>>, Error>
where
    T: TransactionStore + Clone + Send + Sync,
    B: BudgetStore + Clone + Send + Sync,
{
    let month = resolve_month(params.month)?;
    let transactions = state.transaction_store.get_all()?;

    Ok(Json(category_totals(&transactions, month)))
}

/// Compare spending against budgets for a month, defaulting to the current
/// month.
pub async fn get_budget_summary<T, B>(
    State(state): State<AppState<T, B>>,
    Query(params): Query<MonthParam>,
) -> Result<Json<Vec<BudgetComparison>>, Error>
where
    T: TransactionStore + Clone + Send + Sync,
    B: BudgetStore + Clone + Send + Sync,
{
    let month = resolve_month(params.month)?;
    let transactions = state.transaction_store.get_all()?;
    let budgets = state.budget_store.get_all()?;

    Ok(Json(budget_comparison(&budgets, &transactions, month)))
}
