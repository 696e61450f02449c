//! The endpoints for listing and setting budgets.

use axum::{Json, extract::State};
use serde::Deserialize;

use crate::{
    AppState, Error,
    models::Budget,
    stores::{BudgetStore, TransactionStore},
};

/// The request body for setting a budget.
///
/// All fields are optional so that a missing field can be reported as a bad
/// request instead of a deserialization failure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetData {
    category_id: Option<String>,
    amount: Option<f64>,
    month: Option<String>,
}

/// List every budget.
pub async fn get_budgets<T, B>(
    State(state): State<AppState<T, B>>,
) -> Result<Json<Vec<Budget>>, Error>
where
    T: TransactionStore + Clone + Send + Sync,
    B: BudgetStore + Clone + Send + Sync,
{
    state.budget_store.get_all().map(Json)
}

/// Set the budget for a category and month, replacing any existing one.
///
/// Responds with the stored budget.
pub async fn upsert_budget<T, B>(
    State(state): State<AppState<T, B>>,
    Json(data): Json<BudgetData>,
) -> Result<Json<Budget>, Error>
where
    T: TransactionStore + Clone + Send + Sync,
    B: BudgetStore + Clone + Send + Sync,
{
    let category_id = data.category_id.ok_or(Error::MissingField("categoryId"))?;
    let amount = data.amount.ok_or(Error::MissingField("amount"))?;
    let month = data.month.ok_or(Error::MissingField("month"))?;

    let budget = Budget::new(category_id.parse()?, month.parse()?, amount)?;

    state.budget_store.clone().upsert(budget).map(Json)
}

#[cfg(test)]
mod budget_route_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    use crate::{
        AppState,
        models::Budget,
        routes::{build_router, endpoints},
        stores::sqlite::open_stores_in_memory,
    };

    fn get_server() -> TestServer {
        let (transaction_store, budget_store) = open_stores_in_memory().unwrap();
        let state = AppState::new(transaction_store, budget_store);

        TestServer::new(build_router(state))
    }

    #[tokio::test]
    async fn upsert_then_get_round_trips() {
        let server = get_server();

        let response = server
            .post(endpoints::BUDGETS)
            .json(&json!({"categoryId": "food", "amount": 250.0, "month": "2024-03"}))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({"categoryId": "food", "amount": 250.0, "month": "2024-03"}));

        let budgets: Vec<Budget> = server.get(endpoints::BUDGETS).await.json();
        assert_eq!(budgets.len(), 1);
    }

    #[tokio::test]
    async fn upsert_twice_keeps_one_record_with_latest_amount() {
        let server = get_server();

        for amount in [250.0, 300.0] {
            let response = server
                .post(endpoints::BUDGETS)
                .json(&json!({"categoryId": "food", "amount": amount, "month": "2024-03"}))
                .await;

            response.assert_status_ok();
        }

        let budgets: Vec<Budget> = server.get(endpoints::BUDGETS).await.json();

        assert_eq!(budgets.len(), 1, "want a single budget record, got {budgets:?}");
        assert_eq!(budgets[0].amount(), 300.0);
    }

    #[tokio::test]
    async fn upsert_fails_on_missing_field() {
        let server = get_server();

        let response = server
            .post(endpoints::BUDGETS)
            .json(&json!({"categoryId": "food", "month": "2024-03"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn upsert_fails_on_negative_amount() {
        let server = get_server();

        let response = server
            .post(endpoints::BUDGETS)
            .json(&json!({"categoryId": "food", "amount": -1.0, "month": "2024-03"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn upsert_fails_on_invalid_month() {
        let server = get_server();

        let response = server
            .post(endpoints::BUDGETS)
            .json(&json!({"categoryId": "food", "amount": 100.0, "month": "March 2024"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn upsert_allows_zero_amount() {
        let server = get_server();

        let response = server
            .post(endpoints::BUDGETS)
            .json(&json!({"categoryId": "food", "amount": 0.0, "month": "2024-03"}))
            .await;

        response.assert_status_ok();
    }
}
