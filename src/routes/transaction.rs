//! The endpoints for creating, listing, updating and deleting transactions.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    AppState, Error,
    models::{DatabaseID, Transaction, TransactionBuilder, TransactionUpdate},
    stores::{BudgetStore, TransactionStore},
};

/// The date format used on the wire, e.g. "2024-01-15".
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

fn parse_date(text: &str) -> Result<Date, Error> {
    Date::parse(text, DATE_FORMAT).map_err(|_| Error::InvalidDate(text.to_string()))
}

/// The request body for creating a transaction.
///
/// All fields are optional so that a missing field can be reported as a bad
/// request instead of a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionData {
    amount: Option<f64>,
    date: Option<String>,
    description: Option<String>,
    category: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// The request body for updating a transaction. Absent fields keep their
/// stored value.
#[derive(Debug, Deserialize)]
pub struct UpdateTransactionData {
    amount: Option<f64>,
    date: Option<String>,
    description: Option<String>,
    category: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// List every transaction, newest first.
pub async fn get_transactions<T, B>(
    State(state): State<AppState<T, B>>,
) -> Result<Json<Vec<Transaction>>, Error>
where
    T: TransactionStore + Clone + Send + Sync,
    B: BudgetStore + Clone + Send + Sync,
{
    state.transaction_store.get_all().map(Json)
}

/// Create a transaction from the request body and respond with the created
/// transaction and a 201 status.
pub async fn create_transaction<T, B>(
    State(state): State<AppState<T, B>>,
    Json(data): Json<CreateTransactionData>,
) -> Result<Response, Error>
where
    T: TransactionStore + Clone + Send + Sync,
    B: BudgetStore + Clone + Send + Sync,
{
    let amount = data.amount.ok_or(Error::MissingField("amount"))?;
    let date = data.date.ok_or(Error::MissingField("date"))?;
    let description = data.description.ok_or(Error::MissingField("description"))?;
    let category = data.category.ok_or(Error::MissingField("category"))?;
    let kind = data.kind.ok_or(Error::MissingField("type"))?;

    let builder = TransactionBuilder::new(amount, category.parse()?, kind.parse()?)?
        .date(parse_date(&date)?)
        .description(description.trim());

    let transaction = state.transaction_store.clone().create(builder)?;

    Ok((StatusCode::CREATED, Json(transaction)).into_response())
}

/// Apply a partial update to the transaction with the given ID.
pub async fn update_transaction<T, B>(
    State(state): State<AppState<T, B>>,
    Path(transaction_id): Path<DatabaseID>,
    Json(data): Json<UpdateTransactionData>,
) -> Result<Json<Transaction>, Error>
where
    T: TransactionStore + Clone + Send + Sync,
    B: BudgetStore + Clone + Send + Sync,
{
    let update = TransactionUpdate {
        amount: data.amount,
        date: data.date.as_deref().map(parse_date).transpose()?,
        description: data.description,
        category: data.category.as_deref().map(str::parse).transpose()?,
        kind: data.kind.as_deref().map(str::parse).transpose()?,
    };

    state
        .transaction_store
        .clone()
        .update(transaction_id, update)
        .map(Json)
}

/// Delete the transaction with the given ID.
pub async fn delete_transaction<T, B>(
    State(state): State<AppState<T, B>>,
    Path(transaction_id): Path<DatabaseID>,
) -> Result<Json<serde_json::Value>, Error>
where
    T: TransactionStore + Clone + Send + Sync,
    B: BudgetStore + Clone + Send + Sync,
{
    state.transaction_store.clone().delete(transaction_id)?;

    Ok(Json(serde_json::json!({"success": true})))
}
