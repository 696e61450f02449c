//! The JSON REST API of the application.
//!
//! Each submodule implements the handlers for one resource. [build_router]
//! wires the handlers to their URIs, which are defined in [endpoints].

use axum::{
    Json, Router, middleware,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
};

use crate::{
    AppState, logging_middleware,
    stores::{BudgetStore, TransactionStore},
};

mod budget;
mod category;
mod dashboard;
pub mod endpoints;
mod transaction;

/// Return a router with all the routes of the application.
pub fn build_router<T, B>(state: AppState<T, B>) -> Router
where
    T: TransactionStore + Clone + Send + Sync + 'static,
    B: BudgetStore + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            endpoints::TRANSACTIONS,
            get(transaction::get_transactions::<T, B>).post(transaction::create_transaction::<T, B>),
        )
        .route(
            endpoints::TRANSACTION,
            put(transaction::update_transaction::<T, B>)
                .delete(transaction::delete_transaction::<T, B>),
        )
        .route(
            endpoints::BUDGETS,
            get(budget::get_budgets::<T, B>).post(budget::upsert_budget::<T, B>),
        )
        .route(endpoints::CATEGORIES, get(category::get_categories))
        .route(
            endpoints::MONTHLY_SUMMARY,
            get(dashboard::get_monthly_summary::<T, B>),
        )
        .route(
            endpoints::CATEGORY_SUMMARY,
            get(dashboard::get_category_summary::<T, B>),
        )
        .route(
            endpoints::BUDGET_SUMMARY,
            get(dashboard::get_budget_summary::<T, B>),
        )
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

async fn get_404_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({"error": "not found"})),
    )
        .into_response()
}
