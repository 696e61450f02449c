//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/transactions/{transaction_id}',
//! use [format_endpoint].

/// The route to list and create transactions.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route to update and delete a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to list and set budgets.
pub const BUDGETS: &str = "/api/budgets";
/// The route to list the fixed spending categories.
pub const CATEGORIES: &str = "/api/categories";
/// The route for income and expense totals over recent months.
pub const MONTHLY_SUMMARY: &str = "/api/summary/monthly";
/// The route for expense totals per category in a month.
pub const CATEGORY_SUMMARY: &str = "/api/summary/categories";
/// The route for budget versus spending comparisons in a month.
pub const BUDGET_SUMMARY: &str = "/api/summary/budgets";

/// Replace the path parameter in `endpoint_path` with `id`.
///
/// This function assumes that an endpoint path will only have a single
/// parameter, and will only replace the first one.
///
/// # Examples
///
/// ```
/// use pocketbook::routes::endpoints::format_endpoint;
///
/// assert_eq!(
///     format_endpoint("/api/transactions/{transaction_id}", 42),
///     "/api/transactions/42"
/// );
/// ```
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };
    let Some(end) = endpoint_path[start..].find('}') else {
        return endpoint_path.to_string();
    };

    format!(
        "{}{}{}",
        &endpoint_path[..start],
        id,
        &endpoint_path[start + end + 1..]
    )
}
